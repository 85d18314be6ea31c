use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;

use spamfilter_cli::predict::{format_prediction, run_prediction};
use spamfilter_cli::train::input::TrainConfig;
use spamfilter_cli::train::trainer;
use spamfilter_cli::util::read_messages;

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("SPAMFILTER_LOG", "error,spamfilter=info"))
        .init();

    let matches = Command::new("spamfilter")
        .version(clap::crate_version!())
        .about("\u{1F4E8} spamfilter - TF-IDF linear classifiers for spam/ham messages")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train, evaluate and report logistic regression and linear SVM classifiers")
                .arg(
                    Arg::new("config")
                        .help("Path to training configuration file (JSON)")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("data")
                        .short('d')
                        .long("data")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Path to the labeled corpus (*.csv or *.tsv). Overrides the data \
                             file specified in the configuration file.",
                        )
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .help(
                            "Directory that models, figures and reports are written to. \
                             Overrides the directory specified in the configuration file.",
                        )
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed of the train/test split.")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("test_size")
                        .long("test-size")
                        .help("Fraction of messages held out for evaluation, in (0, 1).")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("no_html_report")
                        .long("no-html-report")
                        .help("Disable HTML report generation.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("predict")
                .about("Classify messages with a trained model")
                .arg(
                    Arg::new("model_path")
                        .short('m')
                        .long("model")
                        .help("Path to the trained model file (*.json)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("input")
                        .short('i')
                        .long("input")
                        .help("Text file with one message per line")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("messages")
                        .help("Messages to classify")
                        .num_args(0..)
                        .value_hint(ValueHint::Other),
                ),
        )
        .help_template(
            "{usage-heading} {usage}\n\n\
             {about-with-newline}\n\
             Version {version}\n\n\
             {all-args}{after-help}",
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let config_path: Option<&PathBuf> = matches.get_one("config");

    if config_path.is_none() && matches.get_one::<String>("data").is_none() {
        eprintln!("[spamfilter::train] No config file provided; default configuration:");
        println!("{}", serde_json::to_string_pretty(&TrainConfig::default())?);
        return Ok(());
    }

    if let Some(path) = config_path {
        log::info!("[spamfilter::train] Training from config: {:?}", path);
    }

    let params = match TrainConfig::from_arguments(config_path, matches) {
        Ok(params) => params,
        Err(e) => {
            log::error!("Invalid configuration: {:#}", e);
            std::process::exit(1)
        }
    };

    match trainer::run_training(&params) {
        Ok(entries) => {
            for entry in &entries {
                eprintln!(
                    "[spamfilter::train] {}: accuracy {:.4}",
                    entry.evaluation.display_name, entry.evaluation.accuracy
                );
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let model_path: &PathBuf = matches.get_one("model_path").unwrap();

    let mut messages: Vec<String> = matches
        .get_many::<String>("messages")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    if let Some(input) = matches.get_one::<PathBuf>("input") {
        match read_messages(input) {
            Ok(lines) => messages.extend(lines),
            Err(e) => {
                log::error!("Prediction failed: {:#}", e);
                std::process::exit(1)
            }
        }
    }

    match run_prediction(model_path, &messages) {
        Ok(predictions) => {
            for prediction in &predictions {
                println!("{}", format_prediction(prediction));
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
