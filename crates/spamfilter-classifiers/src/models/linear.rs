//! Linear decision functions and the estimators that fit them.
//!
//! Training goes through `linfa` on a dense copy of the TF-IDF rows with
//! spam as the positive (`true`) class:
//!
//! * logistic loss, `linfa-logistic` (L-BFGS); the intercept is not penalized.
//! * hinge loss, `linfa-svm` with a linear kernel (SMO).
//!
//! The fitted hyperplane is then stored as plain weights so prediction stays
//! on the sparse rows and the model serializes as a weight vector.
use linfa::prelude::*;
use linfa_logistic::LogisticRegression;
use linfa_svm::Svm;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::config::{LogisticParams, SvmParams};
use crate::dataset::Label;
use crate::error::ClassifierError;
use crate::math::SparseMatrix;
use crate::preprocessing::TfidfVectorizer;

/// A fitted linear decision rule `w·x + b`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn decision_function(&self, x: &SparseMatrix) -> Vec<f64> {
        x.affine(&self.weights, self.intercept)
    }
}

/// The fitted state shared by both classifier variants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FittedText {
    pub vectorizer: TfidfVectorizer,
    pub model: LinearModel,
}

impl FittedText {
    pub fn margins(&self, x: &[String]) -> Vec<f64> {
        self.model.decision_function(&self.vectorizer.transform(x))
    }

    pub fn predict(&self, x: &[String]) -> Vec<Label> {
        self.margins(x).into_iter().map(margin_to_label).collect()
    }
}

pub fn margin_to_label(margin: f64) -> Label {
    if margin > 0.0 {
        Label::Spam
    } else {
        Label::Ham
    }
}

/// Logistic function, stable for large `|z|`.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Validate a training set: equal lengths, non-empty, both classes present.
pub fn check_training_input(x: &[String], y: &[Label]) -> Result<(), ClassifierError> {
    if x.len() != y.len() {
        return Err(ClassifierError::LengthMismatch {
            messages: x.len(),
            labels: y.len(),
        });
    }
    let Some(&first) = y.first() else {
        return Err(ClassifierError::EmptyInput);
    };
    if y.iter().all(|&l| l == first) {
        return Err(ClassifierError::InsufficientClassDiversity(first));
    }
    Ok(())
}

fn targets(y: &[Label]) -> Array1<bool> {
    y.iter().map(|l| l.is_spam()).collect()
}

/// Fit L2-regularized logistic regression.
pub fn fit_logistic(
    x: &SparseMatrix,
    y: &[Label],
    params: &LogisticParams,
) -> Result<LinearModel, ClassifierError> {
    let dataset = Dataset::new(x.to_dense(), targets(y));

    let fitted = LogisticRegression::<f64>::default()
        .alpha(1.0 / params.c)
        .max_iterations(params.max_iter as u64)
        .gradient_tolerance(params.tol)
        .fit(&dataset)
        .map_err(|e| ClassifierError::Fit(format!("logistic regression: {}", e)))?;

    let predicted: Array1<bool> = fitted.predict(dataset.records());
    Ok(orient(
        fitted.params().to_vec(),
        fitted.intercept(),
        x,
        &predicted,
    ))
}

/// Fit a linear-kernel SVM with the same penalty `c` on both classes.
pub fn fit_linear_svm(
    x: &SparseMatrix,
    y: &[Label],
    params: &SvmParams,
) -> Result<LinearModel, ClassifierError> {
    let dataset = Dataset::new(x.to_dense(), targets(y));

    let fitted = Svm::<f64, bool>::params()
        .pos_neg_weights(params.c, params.c)
        .linear_kernel()
        .eps(params.tol)
        .fit(&dataset)
        .map_err(|e| ClassifierError::Fit(format!("linear SVM: {}", e)))?;
    log::debug!("Linear SVM kept {} support vectors", fitted.nsupport());

    // decision(x) = weighted_sum(x) - rho, linear in x
    let n_features = x.ncols();
    let mut unit = Array1::<f64>::zeros(n_features);
    let mut weights = Vec::with_capacity(n_features);
    for j in 0..n_features {
        unit[j] = 1.0;
        weights.push(fitted.weighted_sum(&unit));
        unit[j] = 0.0;
    }

    let predicted: Array1<bool> = fitted.predict(dataset.records());
    Ok(orient(weights, -fitted.rho, x, &predicted))
}

/// Build the model so that a positive margin means spam. The sign is taken
/// from the estimator's own predictions on the first row whose margin is not
/// numerically zero.
fn orient(
    weights: Vec<f64>,
    intercept: f64,
    x: &SparseMatrix,
    predicted: &Array1<bool>,
) -> LinearModel {
    let mut model = LinearModel { weights, intercept };
    let flipped = model
        .decision_function(x)
        .iter()
        .zip(predicted.iter())
        .find(|(m, _)| m.abs() > 1e-9)
        .map_or(false, |(&m, &spam)| (m > 0.0) != spam);
    if flipped {
        model.weights.iter_mut().for_each(|w| *w = -*w);
        model.intercept = -model.intercept;
    }
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SparseRow;

    fn separable() -> (SparseMatrix, Vec<Label>) {
        // column 0 marks spam, column 1 marks ham
        let mut x = SparseMatrix::new(2);
        let mut y = Vec::new();
        for i in 0..10 {
            if i % 2 == 0 {
                x.push_row(SparseRow::from_sorted(vec![(0, 1.0)]));
                y.push(Label::Spam);
            } else {
                x.push_row(SparseRow::from_sorted(vec![(1, 1.0)]));
                y.push(Label::Ham);
            }
        }
        (x, y)
    }

    #[test]
    fn logistic_separates_indicator_features() {
        let (x, y) = separable();
        let model = fit_logistic(&x, &y, &LogisticParams::default()).unwrap();
        assert!(model.weights[0] > 0.0);
        assert!(model.weights[1] < 0.0);
        let preds: Vec<Label> = model
            .decision_function(&x)
            .into_iter()
            .map(margin_to_label)
            .collect();
        assert_eq!(preds, y);
    }

    #[test]
    fn svm_separates_indicator_features() {
        let (x, y) = separable();
        let model = fit_linear_svm(&x, &y, &SvmParams::default()).unwrap();
        assert_eq!(model.weights.len(), 2);
        assert!(model.weights[0] > model.weights[1]);
        let preds: Vec<Label> = model
            .decision_function(&x)
            .into_iter()
            .map(margin_to_label)
            .collect();
        assert_eq!(preds, y);
    }

    #[test]
    fn svm_fit_is_deterministic() {
        let (x, y) = separable();
        let a = fit_linear_svm(&x, &y, &SvmParams::default()).unwrap();
        let b = fit_linear_svm(&x, &y, &SvmParams::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn orientation_follows_predictions() {
        let (x, y) = separable();
        let spam: Array1<bool> = y.iter().map(|l| l.is_spam()).collect();
        let ham: Array1<bool> = spam.mapv(|s| !s);

        let kept = orient(vec![1.0, -1.0], 0.0, &x, &spam);
        assert_eq!(kept.weights, vec![1.0, -1.0]);

        let flipped = orient(vec![1.0, -1.0], 0.25, &x, &ham);
        assert_eq!(flipped.weights, vec![-1.0, 1.0]);
        assert_eq!(flipped.intercept, -0.25);
    }

    #[test]
    fn training_input_checks() {
        let x = vec!["a".to_string(), "b".to_string()];
        assert!(matches!(
            check_training_input(&x, &[Label::Ham]),
            Err(ClassifierError::LengthMismatch { .. })
        ));
        assert!(matches!(
            check_training_input(&[], &[]),
            Err(ClassifierError::EmptyInput)
        ));
        assert!(matches!(
            check_training_input(&x, &[Label::Spam, Label::Spam]),
            Err(ClassifierError::InsufficientClassDiversity(Label::Spam))
        ));
        assert!(check_training_input(&x, &[Label::Spam, Label::Ham]).is_ok());
    }

    #[test]
    fn sigmoid_is_stable() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
    }
}
