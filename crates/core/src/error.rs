//! Error types for the scoring crate

use thiserror::Error;

/// Scoring errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid language model: {0}")]
    InvalidModel(String),
}

/// Result type alias for scoring operations
pub type Result<T> = std::result::Result<T, Error>;
