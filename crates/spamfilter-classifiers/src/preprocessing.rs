//! Text preprocessing: tokenizer and TF-IDF vectorizer.
//!
//! The vectorizer learns a sorted vocabulary and smoothed inverse document
//! frequencies from the training messages and maps any message to an
//! L2-normalized sparse row over that vocabulary.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::TfidfConfig;
use crate::error::ClassifierError;
use crate::math::{SparseMatrix, SparseRow};

/// Shortest token kept by the tokenizer, in characters.
const MIN_TOKEN_CHARS: usize = 2;

/// Split `text` into tokens: maximal runs of word characters (alphanumeric
/// or `_`) of at least two characters.
pub fn tokenize(text: &str, lowercase: bool) -> Vec<String> {
    let text = if lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

/// TF-IDF vectorizer with smoothed idf and L2 row normalization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    pub config: TfidfConfig,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(config: TfidfConfig) -> Self {
        Self {
            config,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    /// Learn vocabulary and idf weights from `docs`, replacing any previous
    /// state, and return the transformed training matrix.
    ///
    /// # Errors
    ///
    /// `EmptyInput` when `docs` is empty, `EmptyVocabulary` when no document
    /// yields a token.
    pub fn fit_transform(&mut self, docs: &[String]) -> Result<SparseMatrix, ClassifierError> {
        if docs.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .map(|d| tokenize(d, self.config.lowercase))
            .collect();

        let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
        for tokens in &tokenized {
            let unique: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique {
                *doc_freq.entry(token).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(ClassifierError::EmptyVocabulary);
        }

        // BTreeMap iteration is lexicographic, so column order is sorted.
        let n_docs = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(doc_freq.len());
        for (col, (token, df)) in doc_freq.into_iter().enumerate() {
            vocabulary.insert(token.to_string(), col);
            idf.push(((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0);
        }
        self.vocabulary = vocabulary;
        self.idf = idf;

        log::debug!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            self.idf.len(),
            docs.len()
        );

        Ok(self.weight_all(&tokenized))
    }

    /// Transform `docs` with the learned vocabulary. Tokens unseen during
    /// fitting are ignored; a document without known tokens maps to an
    /// all-zero row.
    pub fn transform(&self, docs: &[String]) -> SparseMatrix {
        let tokenized: Vec<Vec<String>> = docs
            .iter()
            .map(|d| tokenize(d, self.config.lowercase))
            .collect();
        self.weight_all(&tokenized)
    }

    fn weight_all(&self, tokenized: &[Vec<String>]) -> SparseMatrix {
        let mut matrix = SparseMatrix::new(self.idf.len());
        for tokens in tokenized {
            matrix.push_row(self.weight(tokens));
        }
        matrix
    }

    fn weight(&self, tokens: &[String]) -> SparseRow {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&col) = self.vocabulary.get(token) {
                *counts.entry(col).or_insert(0.0) += 1.0;
            }
        }

        let mut row = SparseRow::from_sorted(
            counts
                .into_iter()
                .map(|(col, tf)| (col, tf * self.idf[col]))
                .collect(),
        );
        let norm = row.squared_norm().sqrt();
        if norm > 0.0 {
            row.scale(1.0 / norm);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tokenizer_keeps_word_runs_of_two_or_more() {
        assert_eq!(
            tokenize("WIN a FREE prize_now!! 3pm, £100 I", true),
            vec!["win", "free", "prize_now", "3pm", "100"]
        );
        assert_eq!(tokenize("Hi Bob", false), vec!["Hi", "Bob"]);
    }

    #[test]
    fn vocabulary_is_sorted_and_idf_smoothed() {
        let mut v = TfidfVectorizer::new(TfidfConfig::default());
        let x = v
            .fit_transform(&docs(&["free prize", "free lunch"]))
            .unwrap();
        let cols: Vec<(&str, usize)> = v
            .vocabulary()
            .iter()
            .map(|(k, &c)| (k.as_str(), c))
            .collect();
        assert_eq!(cols, vec![("free", 0), ("lunch", 1), ("prize", 2)]);

        // df(free) = 2 -> ln(3/3) + 1 = 1
        assert!((v.idf()[0] - 1.0).abs() < 1e-12);
        // df(lunch) = 1 -> ln(3/2) + 1
        assert!((v.idf()[1] - (1.5f64.ln() + 1.0)).abs() < 1e-12);

        for row in x.rows() {
            assert!((row.squared_norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn transform_ignores_unseen_tokens() {
        let mut v = TfidfVectorizer::new(TfidfConfig::default());
        v.fit_transform(&docs(&["free prize", "see you"])).unwrap();
        let x = v.transform(&docs(&["totally unseen words", "free stuff"]));
        assert_eq!(x.nrows(), 2);
        assert!(x.row(0).is_empty());
        assert_eq!(x.row(1).nnz(), 1);
        assert!((x.row(1).get(v.vocabulary()["free"]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let mut v = TfidfVectorizer::new(TfidfConfig::default());
        assert!(matches!(
            v.fit_transform(&[]),
            Err(ClassifierError::EmptyInput)
        ));
        assert!(matches!(
            v.fit_transform(&docs(&["a b", "! ?"])),
            Err(ClassifierError::EmptyVocabulary)
        ));
    }
}
