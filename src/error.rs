//! Error types for the gesture control library.
//!
//! The per-frame pipeline never fails: missing hands, low confidence, and
//! timeouts are policy decisions, not errors. Only the edges that touch files
//! or threads produce an [`Error`].

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Recorded trace is malformed
    #[error("Trace error: {0}")]
    TraceError(String),

    /// The session worker has stopped and no longer accepts events
    #[error("Session closed")]
    SessionClosed,
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
