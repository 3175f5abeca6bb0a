//! Error types for the classification crate

use thiserror::Error;

/// Classification errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("Empty dataset: at least one labeled row is required")]
    EmptyDataset,
}

/// Result type alias for classification operations
pub type Result<T> = std::result::Result<T, Error>;
