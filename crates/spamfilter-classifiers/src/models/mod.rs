pub mod classifier_trait;
pub mod factory;
pub mod linear;
pub mod logistic;
pub mod svm;

pub use classifier_trait::TextClassifier;
pub use factory::{build_classifier, SpamClassifier};
pub use logistic::LogisticTextClassifier;
pub use svm::SvmTextClassifier;
