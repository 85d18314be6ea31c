use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use spamfilter_classifiers::config::{ModelConfig, ModelType};
use spamfilter_classifiers::io::CorpusReaderConfig;

use crate::util::validate_tsv_or_csv_file;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub version: String,
    pub data_path: String,
    pub reader: CorpusReaderConfig,
    /// Fraction of the corpus held out for evaluation.
    pub test_size: f64,
    pub seed: u64,
    /// Messages of at most this many characters, whitespace included, are
    /// dropped after splitting.
    pub min_message_chars: usize,
    pub output_dir: String,
    /// Model directory, relative to `output_dir`.
    pub models_dir: String,
    pub classifiers: Vec<ModelConfig>,
    pub html_report: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            version: clap::crate_version!().to_string(),
            data_path: String::from("data/spam.csv"),
            reader: CorpusReaderConfig::default(),
            test_size: 0.2,
            seed: 42,
            min_message_chars: 2,
            output_dir: String::from("."),
            models_dir: String::from("models"),
            classifiers: vec![
                ModelConfig::new(ModelType::logistic()),
                ModelConfig::new(ModelType::linear_svm()),
            ],
            html_report: true,
        }
    }
}

impl TrainConfig {
    /// Build the configuration from an optional JSON file, then apply CLI
    /// overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                let config_json = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                serde_json::from_str(&config_json)
                    .with_context(|| format!("Failed to parse config file: {:?}", path))?
            }
            None => TrainConfig::default(),
        };

        // Apply CLI overrides
        if let Some(data_path) = matches.get_one::<String>("data") {
            config.data_path = data_path.clone();
        }
        validate_tsv_or_csv_file(&config.data_path)?;

        if let Some(output_dir) = matches.get_one::<String>("output_dir") {
            config.output_dir = output_dir.clone();
        }

        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = *seed;
        }

        if let Some(test_size) = matches.get_one::<f64>("test_size") {
            config.test_size = *test_size;
        }

        if matches.get_flag("no_html_report") {
            config.html_report = false;
        }

        if config.classifiers.is_empty() {
            anyhow::bail!("No classifiers configured");
        }

        Ok(config)
    }
}
