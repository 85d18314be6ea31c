//! spamfilter-classifiers: TF-IDF linear text classifiers for spam filtering.
//!
//! This crate provides the labeled corpus loader and train/test splitter,
//! a TF-IDF vectorizer, two linear classifiers (logistic regression and a
//! linear SVM) behind a common `TextClassifier` trait, evaluation metrics,
//! model persistence and reporting/plotting helpers used by the CLI.
//!
//! Everything runs single-threaded; the numeric solvers are small and
//! self-contained so models serialize to plain JSON.
pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod io;
pub mod math;
pub mod metrics;
pub mod models;
pub mod preprocessing;
pub mod report;
