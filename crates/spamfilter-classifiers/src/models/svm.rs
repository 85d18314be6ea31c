use serde::{Deserialize, Serialize};

use crate::config::{SvmParams, TfidfConfig};
use crate::dataset::Label;
use crate::error::ClassifierError;
use crate::models::classifier_trait::TextClassifier;
use crate::models::linear::{check_training_input, fit_linear_svm, FittedText};
use crate::preprocessing::TfidfVectorizer;

/// TF-IDF features followed by a linear-kernel SVM.
///
/// The SVM is not calibrated: it exposes margins through
/// `decision_function` but no probabilities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SvmTextClassifier {
    params: SvmParams,
    tfidf: TfidfConfig,
    fitted: Option<FittedText>,
}

impl SvmTextClassifier {
    pub fn new(params: SvmParams, tfidf: TfidfConfig) -> Self {
        SvmTextClassifier {
            params,
            tfidf,
            fitted: None,
        }
    }

    pub fn params(&self) -> &SvmParams {
        &self.params
    }

    pub fn fitted(&self) -> Option<&FittedText> {
        self.fitted.as_ref()
    }

    fn require_fitted(&self) -> Result<&FittedText, ClassifierError> {
        self.fitted.as_ref().ok_or(ClassifierError::Untrained)
    }
}

impl Default for SvmTextClassifier {
    fn default() -> Self {
        Self::new(SvmParams::default(), TfidfConfig::default())
    }
}

impl TextClassifier for SvmTextClassifier {
    fn train(&mut self, x: &[String], y: &[Label]) -> Result<(), ClassifierError> {
        check_training_input(x, y)?;

        let mut vectorizer = TfidfVectorizer::new(self.tfidf.clone());
        let features = vectorizer.fit_transform(x)?;
        let model = fit_linear_svm(&features, y, &self.params)?;
        log::debug!(
            "Linear SVM fitted on {} messages x {} terms",
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

    fn predict_proba(&self, _x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        self.require_fitted()?;
        Ok(None)
    }

    fn is_trained(&self) -> bool {
        self.fitted.is_some()
    }

    fn name(&self) -> &str {
        "svm"
    }

    fn display_name(&self) -> &str {
        "SVM"
    }
}
