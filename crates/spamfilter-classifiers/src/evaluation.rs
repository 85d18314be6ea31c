//! Train/evaluate helpers tying classifiers to metrics.
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dataset::Label;
use crate::error::MetricsError;
use crate::metrics::{accuracy, roc_curve, ConfusionMatrix, RocCurve};
use crate::models::TextClassifier;

/// Kind of ranking score used for a ROC curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    Margin,
    Probability,
}

/// Train `classifier` on the training set, predict the test set and return
/// the fraction of exact matches.
///
/// The classifier is left trained.
pub fn evaluate<C: TextClassifier + ?Sized>(
    classifier: &mut C,
    x_train: &[String],
    y_train: &[Label],
    x_test: &[String],
    y_test: &[Label],
) -> Result<f64> {
    classifier.train(x_train, y_train)?;
    let y_pred = classifier.predict(x_test)?;
    let acc = accuracy(y_test, &y_pred)?;
    log::info!("{} accuracy: {:.4}", classifier.display_name(), acc);
    Ok(acc)
}

/// Ranking scores for ROC analysis: margins when available, otherwise
/// probabilities, otherwise `None`.
pub fn ranking_scores<C: TextClassifier + ?Sized>(
    classifier: &C,
    x: &[String],
) -> Result<Option<(ScoreKind, Vec<f64>)>> {
    if let Some(margins) = classifier.decision_function(x)? {
        return Ok(Some((ScoreKind::Margin, margins)));
    }
    if let Some(probs) = classifier.predict_proba(x)? {
        return Ok(Some((ScoreKind::Probability, probs)));
    }
    Ok(None)
}

/// Everything derived from a trained classifier on a held-out set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierEvaluation {
    pub name: String,
    pub display_name: String,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
    pub predictions: Vec<Label>,
    /// `None` when the classifier exposes no ranking score or the test set
    /// holds a single class.
    pub roc: Option<RocCurve>,
    pub score_kind: Option<ScoreKind>,
}

impl ClassifierEvaluation {
    /// Score an already trained classifier on `x_test` / `y_test`.
    pub fn compute<C: TextClassifier + ?Sized>(
        classifier: &C,
        x_test: &[String],
        y_test: &[Label],
    ) -> Result<Self> {
        let predictions = classifier.predict(x_test)?;
        let confusion = ConfusionMatrix::from_labels(y_test, &predictions)?;

        let (roc, score_kind) = match ranking_scores(classifier, x_test)? {
            Some((kind, scores)) => match roc_curve(y_test, &scores) {
                Ok(curve) => (Some(curve), Some(kind)),
                Err(MetricsError::SingleClass) => {
                    log::warn!(
                        "{}: test labels hold a single class, ROC curve is undefined",
                        classifier.display_name()
                    );
                    (None, Some(kind))
                }
                Err(e) => return Err(e.into()),
            },
            None => (None, None),
        };

        Ok(ClassifierEvaluation {
            name: classifier.name().to_string(),
            display_name: classifier.display_name().to_string(),
            accuracy: accuracy(y_test, &predictions)?,
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1: confusion.f1(),
            confusion,
            predictions,
            roc,
            score_kind,
        })
    }

    pub fn auc(&self) -> Option<f64> {
        self.roc.as_ref().map(RocCurve::auc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClassifierError;

    /// Predicts a fixed answer sheet; no ranking scores.
    struct Oracle {
        answers: Vec<Label>,
        trained: bool,
    }

    impl TextClassifier for Oracle {
        fn train(&mut self, _x: &[String], _y: &[Label]) -> Result<(), ClassifierError> {
            self.trained = true;
            Ok(())
        }

        fn predict(&self, x: &[String]) -> Result<Vec<Label>, ClassifierError> {
            if !self.trained {
                return Err(ClassifierError::Untrained);
            }
            Ok(self.answers[..x.len()].to_vec())
        }

        fn is_trained(&self) -> bool {
            self.trained
        }
    }

    fn msgs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("message {}", i)).collect()
    }

    #[test]
    fn evaluate_reports_one_on_exact_match_and_zero_on_mismatch() {
        let y_test = vec![Label::Spam, Label::Ham, Label::Ham];
        let mut exact = Oracle {
            answers: y_test.clone(),
            trained: false,
        };
        let acc = evaluate(&mut exact, &msgs(2), &[Label::Ham, Label::Spam], &msgs(3), &y_test).unwrap();
        assert_eq!(acc, 1.0);
        assert!(exact.is_trained());

        let mut wrong = Oracle {
            answers: vec![Label::Ham, Label::Spam, Label::Spam],
            trained: false,
        };
        let acc = evaluate(&mut wrong, &msgs(2), &[Label::Ham, Label::Spam], &msgs(3), &y_test).unwrap();
        assert_eq!(acc, 0.0);
    }

    #[test]
    fn evaluation_without_scores_has_no_roc() {
        let y_test = vec![Label::Spam, Label::Ham];
        let oracle = Oracle {
            answers: y_test.clone(),
            trained: true,
        };
        let eval = ClassifierEvaluation::compute(&oracle, &msgs(2), &y_test).unwrap();
        assert!(eval.roc.is_none());
        assert!(eval.score_kind.is_none());
        assert_eq!(eval.accuracy, 1.0);
        assert_eq!(eval.name, "classifier");
    }
}
