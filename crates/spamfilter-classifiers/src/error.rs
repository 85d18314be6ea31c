use thiserror::Error;

/// Errors raised while loading, mapping or splitting a labeled corpus.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unmapped label token {token:?} on row {row}")]
    UnmappedLabel { row: usize, token: String },
    #[error("missing column {0:?} in corpus header")]
    MissingColumn(String),
    #[error("test_size must lie strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),
    #[error("split of {total} rows leaves an empty {side} set")]
    EmptySplit { total: usize, side: &'static str },
    #[error("corpus has {messages} messages but {labels} labels")]
    LengthMismatch { messages: usize, labels: usize },
    #[error("delimiter {0:?} is not a single-byte ASCII character")]
    InvalidDelimiter(char),
}

/// Errors raised by the text classifiers and their vectorizer.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("classifier has not been trained")]
    Untrained,
    #[error("messages and labels must have equal lengths ({messages} vs {labels})")]
    LengthMismatch { messages: usize, labels: usize },
    #[error("no training messages were provided")]
    EmptyInput,
    #[error("empty vocabulary: no token of two or more word characters in the training messages")]
    EmptyVocabulary,
    #[error("training labels contain a single class ({0}); both ham and spam are required")]
    InsufficientClassDiversity(crate::dataset::Label),
    #[error("estimator failed to fit: {0}")]
    Fit(String),
}

/// Errors raised while computing evaluation metrics.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("true and predicted values must have equal lengths ({0} vs {1})")]
    LengthMismatch(usize, usize),
    #[error("cannot score an empty set of predictions")]
    Empty,
    #[error("ROC curve needs both classes in the true labels")]
    SingleClass,
}
