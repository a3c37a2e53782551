//! Error types for Quran search

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuranSearchError {
    #[error("Corpus error: {0}")]
    Corpus(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tantivy::TantivyError> for QuranSearchError {
    fn from(err: tantivy::TantivyError) -> Self {
        QuranSearchError::Index(err.to_string())
    }
}

impl serde::Serialize for QuranSearchError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, QuranSearchError>;
