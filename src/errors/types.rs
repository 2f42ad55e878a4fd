//! Error types for publishing to ntfy
//!
//! Every failure of message rendering, client construction, or the publish
//! call itself is reported through [`NtfyError`]. Nothing is retried or logged
//! away internally; callers decide what to do with each kind.

use thiserror::Error;

/// Main library error type
#[derive(Error, Debug)]
pub enum NtfyError {
    // Configuration errors, raised while building a publisher
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Invalid ntfy server URL: {url}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: Option<url::ParseError>,
    },

    #[error("Invalid header '{name}'")]
    InvalidHeader {
        name: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // Message errors
    #[error("Validation error: {field} - {reason}")]
    Validation {
        field: String,
        reason: String,
    },

    #[error("JSON serialization error: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    // Network and HTTP errors
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected HTTP status from server: {status_code}")]
    UnexpectedStatus {
        status_code: u16,
    },

    #[error("JSON deserialization error: {context}")]
    Decoding {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using NtfyError
pub type NtfyResult<T> = Result<T, NtfyError>;

impl NtfyError {
    /// Create a new Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new Config error with source
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new InvalidHeader error with source
    pub fn invalid_header(
        name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new Validation error
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create a new Decoding error
    pub fn decoding(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decoding {
            context: context.into(),
            source,
        }
    }

    /// HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::UnexpectedStatus { status_code } => Some(*status_code),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if a caller-side retry could succeed
    ///
    /// The publisher never retries on its own; this only classifies the error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_timeout() || err.is_connect() || err.is_request(),
            Self::UnexpectedStatus { status_code } => {
                *status_code >= 500 || *status_code == 408 || *status_code == 429
            }
            _ => false,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } | Self::InvalidServerUrl { .. } | Self::InvalidHeader { .. } => {
                "config"
            }
            Self::Validation { .. } => "validation",
            Self::Serialization { .. } | Self::Decoding { .. } => "serialization",
            Self::Transport(_) | Self::UnexpectedStatus { .. } => "network",
        }
    }
}
