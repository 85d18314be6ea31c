//! Apply a persisted classifier to new messages.
use std::path::Path;

use anyhow::{Context, Result};

use spamfilter_classifiers::dataset::Label;
use spamfilter_classifiers::io::load_classifier;
use spamfilter_classifiers::models::TextClassifier;

/// One classified message.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Spam probability, for classifiers that expose one.
    pub spam_probability: Option<f64>,
    pub message: String,
}

/// Load the model at `model_path` and classify `messages` in order.
pub fn run_prediction<P: AsRef<Path>>(model_path: P, messages: &[String]) -> Result<Vec<Prediction>> {
    if messages.is_empty() {
        anyhow::bail!("No messages to classify");
    }

    let classifier = load_classifier(&model_path)?;
    let labels = classifier
        .predict(messages)
        .with_context(|| format!("{} failed to predict", classifier.display_name()))?;
    let probabilities = classifier.predict_proba(messages)?;

    log::info!(
        "Classified {} messages with {}",
        messages.len(),
        classifier.display_name()
    );

    Ok(labels
        .into_iter()
        .zip(messages.iter())
        .enumerate()
        .map(|(i, (label, message))| Prediction {
            label,
            spam_probability: probabilities.as_ref().map(|p| p[i]),
            message: message.clone(),
        })
        .collect())
}

/// Tab-separated output line: label, optional probability, message.
pub fn format_prediction(prediction: &Prediction) -> String {
    match prediction.spam_probability {
        Some(p) => format!("{}\t{:.4}\t{}", prediction.label, p, prediction.message),
        None => format!("{}\t{}", prediction.label, prediction.message),
    }
}
