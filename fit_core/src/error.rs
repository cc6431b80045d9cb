//! Error types for the fit_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for fit_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persisted profile record is not structured data at all
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Key-value storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before reaching the tracking state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An operation needed an active profile and none is logged in
    #[error("No active profile; run `login` first")]
    NotLoggedIn,
}
