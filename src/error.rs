//! Crate-level error types.
//!
//! [`StatewatchError`] unifies every error source (configuration, file I/O,
//! CSV, JSON) behind a single enum so callers can match on the variant they
//! care about while still using the `?` operator for easy propagation.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StatewatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum StatewatchError {
    /// Configuration was missing or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A terminal or file operation failed.
    #[error("io error: {0}")]
    Io(String),

    /// A CSV table could not be read or deserialized.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON deserialization failed (topology payload).
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for StatewatchError {
    fn from(err: std::io::Error) -> Self {
        StatewatchError::Io(err.to_string())
    }
}
