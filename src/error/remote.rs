//! Errors reported by external collaborators.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::models::DetailsOption;

/// Failure of a remote call (page fetch, toggle, list lookup, report).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Could not reach the server
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    /// The request did not finish in time
    #[error("Request timed out after {duration_secs}s")]
    Timeout { duration_secs: u64 },

    /// Server answered with a non-2xx status
    #[error("Server error ({status}): {message}")]
    HttpStatus { status: u16, message: String },

    /// Server answered with something we could not interpret
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl RemoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RemoteError::ConnectionFailed { .. } | RemoteError::Timeout { .. } => {
                ErrorCategory::Network
            }
            RemoteError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
            RemoteError::HttpStatus { .. } => ErrorCategory::User,
            RemoteError::InvalidResponse { .. } => ErrorCategory::Server,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RemoteError::ConnectionFailed { .. } => "E_REMOTE_CONN",
            RemoteError::Timeout { .. } => "E_REMOTE_TIMEOUT",
            RemoteError::HttpStatus { .. } => "E_REMOTE_HTTP",
            RemoteError::InvalidResponse { .. } => "E_REMOTE_INVALID",
        }
    }
}

/// Failure of the local item store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Item store is closed")]
    Closed,

    #[error("Item store write failed: {0}")]
    WriteFailed(String),
}

/// Invalid configuration, either of the controller or of the requested view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The selected tab has no paged collection behind it
    #[error("No remote handler for details option '{}'", .0.as_str())]
    UnsupportedOption(DetailsOption),

    /// A configuration value could not be used
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// No execution context was given and none is current
    #[error("No tokio runtime available: {0}")]
    NoRuntime(String),
}
