//! Error types for hexa-showcase.
//!
//! Library functions return `Result<T, ShowcaseError>`; clipboard failures
//! have their own [`ClipboardError`] because Clipboard Echo swallows them
//! after logging rather than propagating.

use thiserror::Error;

/// Result type alias for showcase operations.
pub type ShowcaseResult<T> = Result<T, ShowcaseError>;

/// Unified error type for configuration, I/O and front-end failures.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// File or terminal I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Clipboard write failed where the caller asked to see the failure.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

impl ShowcaseError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}

impl From<serde_json::Error> for ShowcaseError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

/// Platform clipboard write failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No clipboard exists in this environment (headless, no display server).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    /// The platform refused the write.
    #[error("clipboard access denied: {0}")]
    Denied(String),

    /// Any other backend failure.
    #[error("clipboard backend failure: {0}")]
    Backend(String),
}
