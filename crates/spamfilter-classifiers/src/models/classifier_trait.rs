use crate::dataset::Label;
use crate::error::ClassifierError;

/// Contract shared by the text classifiers.
///
/// A classifier starts untrained. `train` is the only transition to the
/// trained state and always re-fits from scratch; every scoring method
/// fails with [`ClassifierError::Untrained`] before it.
pub trait TextClassifier {
    /// Fit the vectorizer and the linear model on `x` / `y`.
    fn train(&mut self, x: &[String], y: &[Label]) -> Result<(), ClassifierError>;

    /// Predict a label per message. Does not mutate the classifier.
    fn predict(&self, x: &[String]) -> Result<Vec<Label>, ClassifierError>;

    /// Signed distance to the decision boundary (positive = spam), when the
    /// model exposes one.
    fn decision_function(&self, _x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        Ok(None)
    }

    /// Calibrated spam probability, when the model exposes one.
    fn predict_proba(&self, _x: &[String]) -> Result<Option<Vec<f64>>, ClassifierError> {
        Ok(None)
    }

    fn is_trained(&self) -> bool;

    /// Short machine name, used as output file prefix.
    fn name(&self) -> &str {
        "classifier"
    }

    /// Human readable name for reports.
    fn display_name(&self) -> &str {
        self.name()
    }
}
