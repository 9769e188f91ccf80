//! Common error types for the dashboard services

use thiserror::Error;

/// Common result type for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across dashboard services
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (request rejected before a response)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Application-level failure (`success:false` with an error string)
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
