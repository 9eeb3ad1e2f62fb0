//! Common error types for GLUE

use thiserror::Error;

use crate::content::ContentError;

/// Common result type for GLUE operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the GLUE crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content section wiring error (unknown section, bad fallback)
    #[error("Content error: {0}")]
    Content(#[from] ContentError),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
