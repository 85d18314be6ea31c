//! Input/output helpers: labeled corpus reader and classifier persistence.
pub mod corpus;
pub mod model_store;

pub use corpus::{read_corpus, read_corpus_with_config, CorpusReaderConfig, TextEncoding};
pub use model_store::{load_classifier, persist};
