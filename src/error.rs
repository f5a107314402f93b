// src/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Malformed particle record in line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type PrepResult<T> = Result<T, PrepError>;
