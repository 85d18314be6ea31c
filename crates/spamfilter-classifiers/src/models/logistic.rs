use serde::{Deserialize, Serialize};

use crate::config::{LogisticParams, TfidfConfig};
use crate::dataset::Label;
use crate::error::ClassifierError;
use crate::models::classifier_trait::TextClassifier;
use crate::models::linear::{check_training_input, fit_logistic, sigmoid, FittedText};
use crate::preprocessing::TfidfVectorizer;

/// TF-IDF features followed by L2-regularized logistic regression.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticTextClassifier {
    params: LogisticParams,
    tfidf: TfidfConfig,
    fitted: Option<FittedText>,
}

impl LogisticTextClassifier {
    pub fn new(params: LogisticParams, tfidf: TfidfConfig) -> Self {
        LogisticTextClassifier {
            params,
            tfidf,
            fitted: None,
        }
    }

    pub fn params(&self) -> &LogisticParams {
        &self.params
    }

    pub fn fitted(&self) -> Option<&FittedText> {
        self.fitted.as_ref()
    }

    fn require_fitted(&self) -> Result<&FittedText, ClassifierError> {
        self.fitted.as_ref().ok_or(ClassifierError::Untrained)
    }
}

impl Default for LogisticTextClassifier {
    fn default() -> Self {
        Self::new(LogisticParams::default(), TfidfConfig::default())
    }
}

impl TextClassifier for LogisticTextClassifier {
    fn train(&mut self, x: &[String], y: &[Label]) -> Result<(), ClassifierError> {
        check_training_input(x, y)?;

        let mut vectorizer = TfidfVectorizer::new(self.tfidf.clone());
        let features = vectorizer.fit_transform(x)?;
        let model = fit_logistic(&features, y, &self.params)?;
        log::debug!(
            "Logistic regression fitted on {} messages x {} terms",
            features.nrows(),
            features.ncols()
        );

        self.fitted = Some(FittedText { vectorizer, model });
        Ok(())
    }

    fn predict(&self, x: &[String]) -> Result<Vec<Label>, ClassifierError> {
        Ok(self.require_fitted()?.predict(x))
    }

    fn decision_function(&self, x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        Ok(Some(self.require_fitted()?.margins(x)))
    }

    fn predict_proba(&self, x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        let margins = self.require_fitted()?.margins(x);
        Ok(Some(margins.into_iter().map(sigmoid).collect()))
    }

    fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    fn name(&self) -> &str {
        "logistic"
    }

    fn display_name(&self) -> &str {
        "Logistic Regression"
    }
}
