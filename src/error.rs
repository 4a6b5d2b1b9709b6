//! Error types and Result aliases for webterm

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::ConfigError;

/// Result type alias for webterm operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for webterm
#[derive(Debug)]
pub enum Error {
    // === Transport errors ===
    /// The service could not be reached or the connection broke mid-request
    Transport {
        endpoint: String,
        reason: String,
    },

    /// The service answered with a non-2xx status
    HttpStatus {
        endpoint: String,
        status: u16,
    },

    /// The response body could not be decoded
    MalformedResponse {
        endpoint: String,
        reason: String,
    },

    /// No response arrived within the configured timeout
    RequestTimeout {
        endpoint: String,
        duration: Duration,
    },

    /// A required field was absent from an otherwise valid response
    MissingField {
        endpoint: String,
        field: String,
    },

    /// A background request task panicked or was cancelled
    TaskFailed {
        reason: String,
    },

    // === Session errors ===
    /// History lookup outside the valid cursor range
    InvalidHistoryIndex {
        index: usize,
        len: usize,
    },

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    /// Configuration validation failed
    ConfigValidation(ConfigError),

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors
    Other(String),
}

impl Error {
    /// Whether this error came from talking to a remote service
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. }
                | Error::HttpStatus { .. }
                | Error::MalformedResponse { .. }
                | Error::RequestTimeout { .. }
                | Error::MissingField { .. }
                | Error::TaskFailed { .. }
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Transport errors
            Error::Transport { endpoint, reason } => {
                write!(f, "Request to '{}' failed: {}", endpoint, reason)
            }
            Error::HttpStatus { endpoint, status } => {
                write!(f, "'{}' responded with HTTP {}", endpoint, status)
            }
            Error::MalformedResponse { endpoint, reason } => {
                write!(f, "Malformed response from '{}': {}", endpoint, reason)
            }
            Error::RequestTimeout { endpoint, duration } => {
                write!(f, "Request to '{}' timed out after {:?}", endpoint, duration)
            }
            Error::MissingField { endpoint, field } => {
                write!(f, "Response from '{}' is missing '{}'", endpoint, field)
            }
            Error::TaskFailed { reason } => {
                write!(f, "Background request failed: {}", reason)
            }

            // Session errors
            Error::InvalidHistoryIndex { index, len } => {
                write!(f, "History index {} out of range (length {})", index, len)
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }
            Error::ConfigValidation(err) => {
                write!(f, "Configuration validation failed: {}", err)
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::ConfigValidation(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
