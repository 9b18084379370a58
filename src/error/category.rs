//! Error category classification for unified error handling.
//!
//! Categories drive retry decisions and the message shown with an `Error`
//! snapshot.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection problems, timeouts.
    /// Generally transient and retryable.
    Network,

    /// Backend errors (HTTP 5xx, malformed responses).
    /// Generally transient and retryable after delay.
    Server,

    /// Client-side errors (bugs, invalid state).
    /// Not retryable.
    Client,

    /// The user asked for something the server refused (HTTP 4xx).
    /// Not retryable until the user changes the request.
    User,

    /// Local item store failures.
    Storage,

    /// Configuration errors (unsupported tab, invalid settings).
    /// Not retryable until configuration is corrected.
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient
    /// and the operation can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => {
                "The server may be experiencing issues. Please try again later"
            }
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check your input and try again",
            ErrorCategory::Storage => "Restart the app to rebuild the local cache",
            ErrorCategory::Configuration => "Pick a different tab or check your settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
