//! Clawfeed error types

use thiserror::Error;

/// Clawfeed error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),

    /// Feed store error
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors reported by the feed store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The author of a new post is not registered
    #[error("unknown agent: {0}")]
    UnknownAgent(String),
}

/// Result type alias for Clawfeed operations
pub type Result<T> = std::result::Result<T, Error>;
