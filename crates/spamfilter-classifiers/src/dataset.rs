//! Data structures and helpers for labeled message corpora.
//!
//! This module defines `Label`, `LabelMapping` and `Corpus`, and contains the
//! seeded train/test split and the short-message cleaning applied to each
//! side of the split.
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Binary message label. `Ham` is the legitimate class, `Spam` the positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Ham = 0,
    Spam = 1,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Ham, Label::Spam];

    pub fn as_index(self) -> usize {
        self as usize
    }

    pub fn from_index(idx: usize) -> Option<Label> {
        match idx {
            0 => Some(Label::Ham),
            1 => Some(Label::Spam),
            _ => None,
        }
    }

    pub fn is_spam(self) -> bool {
        self == Label::Spam
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham => write!(f, "ham"),
            Label::Spam => write!(f, "spam"),
        }
    }
}

/// Bijection between the textual label tokens of a corpus file and `Label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelMapping {
    pub ham: String,
    pub spam: String,
}

impl Default for LabelMapping {
    fn default() -> Self {
        Self {
            ham: "ham".to_string(),
            spam: "spam".to_string(),
        }
    }
}

impl LabelMapping {
    /// Map a raw token (surrounding whitespace ignored) to a label.
    pub fn map(&self, token: &str) -> Option<Label> {
        let token = token.trim();
        if token == self.ham {
            Some(Label::Ham)
        } else if token == self.spam {
            Some(Label::Spam)
        } else {
            None
        }
    }

    pub fn token(&self, label: Label) -> &str {
        match label {
            Label::Ham => &self.ham,
            Label::Spam => &self.spam,
        }
    }
}

/// A labeled message corpus with row-aligned messages and labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub messages: Vec<String>,
    pub labels: Vec<Label>,
}

/// Result of `Corpus::train_test_split`.
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Corpus,
    pub test: Corpus,
    /// Row indices of the source corpus that went to the training side.
    pub train_indices: Vec<usize>,
    /// Row indices of the source corpus that went to the test side.
    pub test_indices: Vec<usize>,
}

impl Split {
    /// Apply `Corpus::clean` to both sides independently. The index lists
    /// keep only the source rows that survived.
    pub fn clean(self, min_chars: usize) -> Split {
        let (train, train_indices) = clean_side(self.train, self.train_indices, min_chars);
        let (test, test_indices) = clean_side(self.test, self.test_indices, min_chars);
        Split {
            train,
            test,
            train_indices,
            test_indices,
        }
    }
}

fn clean_side(corpus: Corpus, indices: Vec<usize>, min_chars: usize) -> (Corpus, Vec<usize>) {
    let kept: Vec<usize> = indices
        .into_iter()
        .zip(corpus.messages.iter())
        .filter(|(_, m)| m.chars().count() > min_chars)
        .map(|(i, _)| i)
        .collect();
    (corpus.clean(min_chars), kept)
}

impl Corpus {
    /// Pair messages with their labels row by row.
    pub fn new(messages: Vec<String>, labels: Vec<Label>) -> Result<Self, DatasetError> {
        if messages.len() != labels.len() {
            return Err(DatasetError::LengthMismatch {
                messages: messages.len(),
                labels: labels.len(),
            });
        }
        Ok(Corpus { messages, labels })
    }

    pub fn push(&mut self, message: String, label: Label) {
        self.messages.push(message);
        self.labels.push(label);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Number of (ham, spam) rows.
    pub fn class_counts(&self) -> (usize, usize) {
        let spam = self.labels.iter().filter(|l| l.is_spam()).count();
        (self.labels.len() - spam, spam)
    }

    pub fn log_summary(&self, name: &str) {
        let (ham, spam) = self.class_counts();
        log::info!(
            "{} corpus: {} messages ({} ham, {} spam)",
            name,
            self.len(),
            ham,
            spam
        );
    }

    /// Keep only the rows selected by `indices`, in that order.
    pub fn select(&self, indices: &[usize]) -> Corpus {
        Corpus {
            messages: indices.iter().map(|&i| self.messages[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Drop empty or near-empty messages: a row is kept when its message has
    /// more than `min_chars` characters. Whitespace counts, so a message of
    /// blanks longer than `min_chars` is kept.
    pub fn clean(&self, min_chars: usize) -> Corpus {
        let keep: Vec<usize> = self
            .messages
            .iter()
            .enumerate()
            .filter(|(_, m)| m.chars().count() > min_chars)
            .map(|(i, _)| i)
            .collect();

        let dropped = self.len() - keep.len();
        if dropped > 0 {
            log::debug!(
                "Dropped {} of {} messages with {} or fewer characters",
                dropped,
                self.len(),
                min_chars
            );
        }
        self.select(&keep)
    }

    /// Partition the corpus into disjoint train and test sets.
    ///
    /// A seeded permutation of the row indices is drawn; its first
    /// `ceil(test_size * n)` entries form the test set and the remainder the
    /// training set. The same seed always yields the same assignment.
    ///
    /// # Errors
    ///
    /// `InvalidTestSize` when `test_size` is outside `(0, 1)`, `EmptySplit`
    /// when either side would have no rows.
    pub fn train_test_split(&self, test_size: f64, seed: u64) -> Result<Split, DatasetError> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(DatasetError::InvalidTestSize(test_size));
        }

        let n_samples = self.len();
        let n_test = (test_size * n_samples as f64).ceil() as usize;
        let n_train = n_samples.saturating_sub(n_test);
        if n_test == 0 {
            return Err(DatasetError::EmptySplit {
                total: n_samples,
                side: "test",
            });
        }
        if n_train == 0 {
            return Err(DatasetError::EmptySplit {
                total: n_samples,
                side: "train",
            });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n_samples).collect();
        indices.shuffle(&mut rng);

        let test_indices = indices[..n_test].to_vec();
        let train_indices = indices[n_test..].to_vec();

        Ok(Split {
            train: self.select(&train_indices),
            test: self.select(&test_indices),
            train_indices,
            test_indices,
        })
    }
}
