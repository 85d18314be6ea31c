//! Sparse feature storage.
//!
//! `SparseMatrix` is the row-major container for TF-IDF features; it predicts
//! directly on sparse rows and hands a dense `ndarray` copy to the estimators.
pub mod sparse;

pub use sparse::{SparseMatrix, SparseRow};
