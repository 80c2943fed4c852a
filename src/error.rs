//! Error types for the tokenizer pipeline
//!
//! The token-stream passes themselves are total and raise nothing; errors
//! only arise at the edges (reading a document from disk, serializing a
//! stream to JSON).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File too large: {size} bytes (max: {max})")]
    FileTooLarge { size: usize, max: usize },

    #[error("Failed to serialize token stream: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type TokenizeResult<T> = Result<T, TokenizeError>;
