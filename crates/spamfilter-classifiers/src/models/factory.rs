use serde::{Deserialize, Serialize};

use crate::config::{ModelConfig, ModelType};
use crate::dataset::Label;
use crate::error::ClassifierError;
use crate::models::classifier_trait::TextClassifier;
use crate::models::logistic::LogisticTextClassifier;
use crate::models::svm::SvmTextClassifier;

/// The closed set of classifier variants. Serializes with its variant tag so
/// a persisted file restores the right model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SpamClassifier {
    Logistic(LogisticTextClassifier),
    Svm(SvmTextClassifier),
}

impl SpamClassifier {
    fn inner(&self) -> &dyn TextClassifier {
        match self {
            SpamClassifier::Logistic(m) => m,
            SpamClassifier::Svm(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TextClassifier {
        match self {
            SpamClassifier::Logistic(m) => m,
            SpamClassifier::Svm(m) => m,
        }
    }
}

impl TextClassifier for SpamClassifier {
    fn train(&mut self, x: &[String], y: &[Label]) -> Result<(), ClassifierError> {
        self.inner_mut().train(x, y)
    }

    fn predict(&self, x: &[String]) -> Result<Vec<Label>, ClassifierError> {
        self.inner().predict(x)
    }

    fn decision_function(&self, x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        self.inner().decision_function(x)
    }

    fn predict_proba(&self, x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        self.inner().predict_proba(x)
    }

    fn is_trained(&self) -> bool {
        self.inner().is_trained()
    }

    fn name(&self) -> &str {
        self.inner().name()
    }

    fn display_name(&self) -> &str {
        self.inner().display_name()
    }
}

/// Build an untrained classifier from a `ModelConfig`.
pub fn build_classifier(config: &ModelConfig) -> SpamClassifier {
    match &config.model_type {
        ModelType::Logistic(params) => SpamClassifier::Logistic(LogisticTextClassifier::new(
            params.clone(),
            config.tfidf.clone(),
        )),
        ModelType::LinearSvm(params) => {
            SpamClassifier::Svm(SvmTextClassifier::new(params.clone(), config.tfidf.clone()))
        }
    }
}
