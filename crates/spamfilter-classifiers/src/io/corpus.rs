//! Delimited labeled-message corpus reader.
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::ByteRecord;
use serde::{Deserialize, Serialize};

use crate::dataset::{Corpus, LabelMapping};
use crate::error::DatasetError;

/// Character encoding of the corpus file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte is one character.
    #[default]
    Latin1,
    Utf8,
}

impl TextEncoding {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Configuration for reading a labeled corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusReaderConfig {
    /// Column name holding the label tokens.
    pub label_column: String,
    /// Column name holding the message text.
    pub message_column: String,
    /// Field delimiter. When `None`, `.tsv` files use a tab and everything
    /// else a comma.
    pub delimiter: Option<char>,
    pub encoding: TextEncoding,
    pub labels: LabelMapping,
}

impl Default for CorpusReaderConfig {
    fn default() -> Self {
        Self {
            label_column: "label".to_string(),
            message_column: "message".to_string(),
            delimiter: None,
            encoding: TextEncoding::Latin1,
            labels: LabelMapping::default(),
        }
    }
}

impl CorpusReaderConfig {
    /// Field delimiter byte: the configured character, else `\t` for
    /// `.tsv` files and `,` otherwise.
    fn delimiter_for(&self, path: &Path) -> Result<u8, DatasetError> {
        let delimiter = match self.delimiter {
            Some(c) if c.is_ascii() => c as u8,
            Some(c) => return Err(DatasetError::InvalidDelimiter(c)),
            None => {
                let is_tsv = path
                    .extension()
                    .map(|e| e.eq_ignore_ascii_case("tsv"))
                    .unwrap_or(false);
                if is_tsv {
                    b'\t'
                } else {
                    b','
                }
            }
        };
        Ok(delimiter)
    }
}

/// Read a labeled corpus with the default column names and label tokens.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Corpus> {
    read_corpus_with_config(path, &CorpusReaderConfig::default())
}

/// Read a labeled corpus using a custom configuration.
///
/// Rows with a missing or empty message are dropped. A label token that is
/// not part of `config.labels` aborts the read with
/// [`DatasetError::UnmappedLabel`].
pub fn read_corpus_with_config<P: AsRef<Path>>(
    path: P,
    config: &CorpusReaderConfig,
) -> Result<Corpus> {
    let path = path.as_ref();
    let delimiter = config.delimiter_for(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open corpus file: {}", path.display()))?;

    let headers: Vec<String> = reader
        .byte_headers()
        .context("Failed to read corpus header row")?
        .iter()
        .map(|h| config.encoding.decode(h).trim().to_string())
        .collect();

    let label_idx = resolve_column(&headers, &config.label_column, 0)?;
    let message_idx = resolve_column(&headers, &config.message_column, 1)?;

    let mut corpus = Corpus::default();
    let mut missing_messages = 0usize;
    let mut record = ByteRecord::new();
    let mut row_idx = 0usize;

    while reader
        .read_byte_record(&mut record)
        .with_context(|| format!("Failed to read row {}", row_idx + 1))?
    {
        row_idx += 1;

        let token = record
            .get(label_idx)
            .map(|b| config.encoding.decode(b))
            .unwrap_or_default();
        let label = config
            .labels
            .map(&token)
            .ok_or_else(|| DatasetError::UnmappedLabel {
                row: row_idx,
                token: token.clone(),
            })?;

        match record.get(message_idx) {
            Some(bytes) if !bytes.is_empty() => {
                corpus.push(config.encoding.decode(bytes), label);
            }
            _ => missing_messages += 1,
        }
    }

    if missing_messages > 0 {
        log::debug!(
            "Dropped {} rows with a missing message in {}",
            missing_messages,
            path.display()
        );
    }
    log::info!("Read {} labeled messages from {}", corpus.len(), path.display());

    Ok(corpus)
}

fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

fn resolve_column(headers: &[String], name: &str, fallback: usize) -> Result<usize> {
    if let Some(idx) = find_column(headers, name) {
        return Ok(idx);
    }
    if fallback < headers.len() {
        log::warn!(
            "Column '{}' not found in header {:?}; using column {} ('{}')",
            name,
            headers,
            fallback,
            headers[fallback]
        );
        return Ok(fallback);
    }
    Err(anyhow!(DatasetError::MissingColumn(name.to_string())))
}
