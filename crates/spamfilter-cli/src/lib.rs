//! Command line front end for the spam/ham text classifiers: a `train`
//! pipeline writing models, figures and reports, and a `predict` command
//! applying a persisted model to new messages.
pub mod predict;
pub mod train;
pub mod util;
