use std::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// One sparse row: `(column, value)` pairs sorted by column, no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseRow {
    entries: Vec<(usize, f64)>,
}

impl SparseRow {
    /// Build a row from pairs that are already sorted by column.
    pub fn from_sorted(entries: Vec<(usize, f64)>) -> Self {
        debug_assert!(
            entries.windows(2).all(|w| w[0].0 < w[1].0),
            "sparse row entries must be strictly increasing by column"
        );
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with a dense weight vector.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries.iter().map(|&(c, v)| v * dense[c]).sum()
    }

    pub fn squared_norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum()
    }

    /// Value at `col`, zero when the column is not stored.
    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |&(c, _)| c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    pub fn scale(&mut self, factor: f64) {
        for (_, v) in self.entries.iter_mut() {
            *v *= factor;
        }
    }
}

/// Row-major sparse matrix with a fixed number of columns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    rows: Vec<SparseRow>,
    cols: usize,
}

impl SparseMatrix {
    pub fn new(cols: usize) -> Self {
        Self {
            rows: Vec::new(),
            cols,
        }
    }

    pub fn push_row(&mut self, row: SparseRow) {
        assert!(
            row.entries().last().map_or(true, |&(c, _)| c < self.cols),
            "sparse row column index out of bounds"
        );
        self.rows.push(row);
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols)
    }

    pub fn nnz(&self) -> usize {
        self.rows.iter().map(SparseRow::nnz).sum()
    }

    pub fn rows(&self) -> &[SparseRow] {
        &self.rows
    }

    pub fn row(&self, idx: usize) -> &SparseRow {
        &self.rows[idx]
    }

    /// `X w + b` for every row.
    pub fn affine(&self, weights: &[f64], intercept: f64) -> Vec<f64> {
        assert_eq!(weights.len(), self.cols, "weight vector length mismatch");
        self.rows.iter().map(|r| r.dot(weights) + intercept).collect()
    }

    /// Dense `nrows x ncols` copy, the record layout `linfa` estimators take.
    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.rows.len(), self.cols));
        for (i, row) in self.rows.iter().enumerate() {
            for &(c, v) in row.entries() {
                dense[[i, c]] = v;
            }
        }
        dense
    }
}

impl Index<usize> for SparseMatrix {
    type Output = SparseRow;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_ops() {
        let mut row = SparseRow::from_sorted(vec![(0, 1.0), (2, 2.0)]);
        let w = [3.0, 5.0, 0.5];
        assert_eq!(row.dot(&w), 4.0);
        assert_eq!(row.get(1), 0.0);
        assert_eq!(row.get(2), 2.0);
        row.scale(0.5);
        assert_eq!(row.squared_norm(), 1.25);
    }

    #[test]
    fn matrix_affine() {
        let mut x = SparseMatrix::new(2);
        x.push_row(SparseRow::from_sorted(vec![(1, 1.0)]));
        x.push_row(SparseRow::default());
        assert_eq!(x.shape(), (2, 2));
        assert_eq!(x.nnz(), 1);
        assert_eq!(x.affine(&[1.0, 2.0], 0.5), vec![2.5, 0.5]);
    }

    #[test]
    fn dense_copy_places_entries() {
        let mut x = SparseMatrix::new(3);
        x.push_row(SparseRow::from_sorted(vec![(0, 1.5), (2, -1.0)]));
        x.push_row(SparseRow::default());
        let dense = x.to_dense();
        assert_eq!(dense.shape(), &[2, 3]);
        assert_eq!(dense[[0, 0]], 1.5);
        assert_eq!(dense[[0, 1]], 0.0);
        assert_eq!(dense[[0, 2]], -1.0);
        assert!(dense.row(1).iter().all(|&v| v == 0.0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn push_row_checks_columns() {
        let mut x = SparseMatrix::new(1);
        x.push_row(SparseRow::from_sorted(vec![(3, 1.0)]));
    }
}
