use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Central configuration for a text classifier: vectorizer options plus the
/// linear model and its hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ModelConfig {
    #[serde(default)]
    pub tfidf: TfidfConfig,

    #[serde(flatten)]
    pub model_type: ModelType,
}

/// TF-IDF vectorizer options.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TfidfConfig {
    pub lowercase: bool,
}

impl Default for TfidfConfig {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

/// Hyper-parameters of the L2-regularized logistic regression.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogisticParams {
    /// Inverse regularization strength; the L2 penalty is `1 / c`.
    pub c: f64,
    pub max_iter: usize,
    /// Gradient tolerance of the L-BFGS solver.
    pub tol: f64,
}

impl Default for LogisticParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            max_iter: 1000,
            tol: 1e-4,
        }
    }
}

/// Hyper-parameters of the linear-kernel SVM.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SvmParams {
    /// Penalty of margin violations, applied to both classes.
    pub c: f64,
    /// Stopping tolerance of the SMO solver.
    pub tol: f64,
}

impl Default for SvmParams {
    fn default() -> Self {
        Self { c: 1.0, tol: 1e-3 }
    }
}

/// Supported linear models and their hyper-parameters.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub enum ModelType {
    /// Logistic loss (`linfa-logistic`). Exposes margins and probabilities.
    Logistic(LogisticParams),
    /// Hinge loss with a linear kernel (`linfa-svm`). Margins only.
    LinearSvm(SvmParams),
}

impl ModelType {
    pub fn logistic() -> Self {
        ModelType::Logistic(LogisticParams::default())
    }

    pub fn linear_svm() -> Self {
        ModelType::LinearSvm(SvmParams::default())
    }

    /// Short name used as output file prefix.
    pub fn name(&self) -> &'static str {
        match self {
            ModelType::Logistic(_) => "logistic",
            ModelType::LinearSvm(_) => "svm",
        }
    }
}

impl Default for ModelType {
    fn default() -> Self {
        ModelType::logistic()
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logistic" | "logreg" | "logistic_regression" => Ok(ModelType::logistic()),
            "svm" | "linear_svm" | "linearsvc" => Ok(ModelType::linear_svm()),
            _ => Err(format!(
                "Unknown model type: {}. Valid options are: logistic, svm",
                s
            )),
        }
    }
}

impl ModelConfig {
    pub fn new(model_type: ModelType) -> Self {
        Self {
            tfidf: TfidfConfig::default(),
            model_type,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new(ModelType::default())
    }
}
