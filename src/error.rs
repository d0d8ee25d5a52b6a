//! Error types for vastu-frontier.
//!
//! Frontier extraction itself never fails: empty or degenerate sources give
//! an empty [`Frontier`](crate::Frontier). Errors come from loading
//! configuration and decoding result messages.

use thiserror::Error;

/// vastu-frontier error type
#[derive(Error, Debug)]
pub enum FrontierError {
    /// Reading a configuration file failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML could not be parsed or produced
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// A cloud message does not describe packed XYZ records
    #[error("Malformed message: {0}")]
    Message(String),
}

/// Result alias for vastu-frontier operations
pub type Result<T> = std::result::Result<T, FrontierError>;
