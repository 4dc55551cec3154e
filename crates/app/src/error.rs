//! Error types for the soak harness.

use thiserror::Error;

/// Top-level error type for the soak binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Engine rejected the input or the table
    #[error("engine error: {0}")]
    Engine(#[from] huffpack_core::Error),

    /// Reading the input file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad command line
    #[error("configuration error: {0}")]
    Config(String),
}

/// Type alias for Result with the harness error type
pub type Result<T> = std::result::Result<T, AppError>;
