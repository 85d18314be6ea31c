//! Classification metrics over binary labels and ranking scores.
//!
//! `Spam` is the positive class for precision, recall and the ROC curve.
use serde::{Deserialize, Serialize};

use crate::dataset::Label;
use crate::error::MetricsError;

fn check_lengths(a: usize, b: usize) -> Result<(), MetricsError> {
    if a != b {
        return Err(MetricsError::LengthMismatch(a, b));
    }
    if a == 0 {
        return Err(MetricsError::Empty);
    }
    Ok(())
}

/// Fraction of exact label matches.
pub fn accuracy(y_true: &[Label], y_pred: &[Label]) -> Result<f64, MetricsError> {
    check_lengths(y_true.len(), y_pred.len())?;
    let hits = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(hits as f64 / y_true.len() as f64)
}

/// 2x2 contingency table, `counts[actual][predicted]` indexed by
/// `Label::as_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn from_labels(y_true: &[Label], y_pred: &[Label]) -> Result<Self, MetricsError> {
        check_lengths(y_true.len(), y_pred.len())?;
        let mut counts = [[0usize; 2]; 2];
        for (t, p) in y_true.iter().zip(y_pred.iter()) {
            counts[t.as_index()][p.as_index()] += 1;
        }
        Ok(ConfusionMatrix { counts })
    }

    pub fn get(&self, actual: Label, predicted: Label) -> usize {
        self.counts[actual.as_index()][predicted.as_index()]
    }

    pub fn true_positives(&self) -> usize {
        self.get(Label::Spam, Label::Spam)
    }

    pub fn false_positives(&self) -> usize {
        self.get(Label::Ham, Label::Spam)
    }

    pub fn true_negatives(&self) -> usize {
        self.get(Label::Ham, Label::Ham)
    }

    pub fn false_negatives(&self) -> usize {
        self.get(Label::Spam, Label::Ham)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positives() + self.true_negatives(), self.total())
    }

    /// TP / (TP + FP); zero when nothing was predicted spam.
    pub fn precision(&self) -> f64 {
        ratio(
            self.true_positives(),
            self.true_positives() + self.false_positives(),
        )
    }

    /// TP / (TP + FN); zero when there is no actual spam.
    pub fn recall(&self) -> f64 {
        ratio(
            self.true_positives(),
            self.true_positives() + self.false_negatives(),
        )
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Points of a ROC curve, from `(0, 0)` to `(1, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    /// Score threshold of each point; the first is `+inf`.
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    pub fn auc(&self) -> f64 {
        auc(&self.fpr, &self.tpr)
    }
}

/// ROC curve of `scores` (higher = more likely spam) against `y_true`.
///
/// One point per distinct score, thresholds in decreasing order.
pub fn roc_curve(y_true: &[Label], scores: &[f64]) -> Result<RocCurve, MetricsError> {
    check_lengths(y_true.len(), scores.len())?;

    let positives = y_true.iter().filter(|l| l.is_spam()).count();
    let negatives = y_true.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(MetricsError::SingleClass);
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];
    let (mut tp, mut fp) = (0usize, 0usize);

    for (pos, &idx) in order.iter().enumerate() {
        if y_true[idx].is_spam() {
            tp += 1;
        } else {
            fp += 1;
        }
        let last_of_tie = order
            .get(pos + 1)
            .map_or(true, |&next| scores[next] != scores[idx]);
        if last_of_tie {
            fpr.push(fp as f64 / negatives as f64);
            tpr.push(tp as f64 / positives as f64);
            thresholds.push(scores[idx]);
        }
    }

    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
    })
}

/// Area under a curve by the trapezoidal rule; `x` must be monotonic.
pub fn auc(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "auc requires equal length inputs");
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum()
}
