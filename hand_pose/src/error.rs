//! Error type shared by the landmark parsing and replay paths.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoseError {
    #[error("too few landmarks: expected {expected}, got {actual}")]
    TooFewLandmarks { expected: usize, actual: usize },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PoseError>;
