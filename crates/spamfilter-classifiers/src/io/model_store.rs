//! JSON persistence of trained classifiers.
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ClassifierError;
use crate::models::{SpamClassifier, TextClassifier};

/// Serialize a trained classifier (vectorizer and linear model) to
/// `destination`, creating parent directories and overwriting any existing
/// file.
pub fn persist<P: AsRef<Path>>(classifier: &SpamClassifier, destination: P) -> Result<()> {
    let path = destination.as_ref();
    if !classifier.is_trained() {
        return Err(ClassifierError::Untrained)
            .with_context(|| format!("Refusing to persist {} to {}", classifier.name(), path.display()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create model directory: {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create model file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, classifier)
        .with_context(|| format!("Failed to serialize model to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write model file: {}", path.display()))?;

    log::info!("Saved {} model to {}", classifier.display_name(), path.display());
    Ok(())
}

/// Load a classifier previously written by [`persist`].
pub fn load_classifier<P: AsRef<Path>>(path: P) -> Result<SpamClassifier> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open model file: {}", path.display()))?;
    let classifier: SpamClassifier = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse model file: {}", path.display()))?;
    log::debug!("Loaded {} model from {}", classifier.display_name(), path.display());
    Ok(classifier)
}
