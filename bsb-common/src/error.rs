//! Common error types for BSB

use thiserror::Error;

/// Common result type for BSB operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the BSB crates
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metadata service returned an error response
    #[error("API error {0}: {1}")]
    Api(u16, String),

    /// Network communication error
    #[error("Network error: {0}")]
    Network(String),

    /// Failed to parse a server response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Player rejected a control request (e.g. seek before media is seekable)
    #[error("Player control error: {0}")]
    PlayerControl(String),

    /// Bounded wait elapsed without the condition becoming true
    #[error("Timed out waiting for {0}")]
    Timeout(String),
}
