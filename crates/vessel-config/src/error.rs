//! Error types for configuration I/O.

use thiserror::Error;

/// Result type alias for configuration I/O operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors from loading, parsing, or persisting a configuration.
///
/// Validation failures are reported separately through
/// [`ValidationReport`](crate::ValidationReport); this type only covers the
/// serialization boundary.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
