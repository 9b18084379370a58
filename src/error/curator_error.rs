//! Unified error type for the controller.
//!
//! Every failure that can reach the `Error` snapshot is a `CuratorError`.
//! The variants follow the failure taxonomy of the screen: page fetches are
//! transient and retried by the refresh loop, mutations are surfaced once,
//! configuration problems are fatal for the pipeline run that hit them.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::remote::{ConfigError, RemoteError, StoreError};

/// Unified error type for the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum CuratorError {
    /// A page fetch failed during refresh or load-more.
    Fetch {
        list_id: String,
        page: u32,
        source: RemoteError,
    },

    /// A reaction or upvote toggle failed.
    Mutation {
        item_id: String,
        alias: String,
        source: RemoteError,
    },

    /// A one-shot side effect failed (report, delete, type change, list reload).
    Action {
        action: &'static str,
        source: RemoteError,
    },

    /// The local item store rejected a read or write.
    Store(StoreError),

    /// Unsupported tab or invalid settings.
    Configuration(ConfigError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<CuratorError>,
        context: ErrorContext,
    },
}

impl CuratorError {
    pub fn fetch(list_id: impl Into<String>, page: u32, source: RemoteError) -> Self {
        CuratorError::Fetch {
            list_id: list_id.into(),
            page,
            source,
        }
    }

    pub fn mutation(
        item_id: impl Into<String>,
        alias: impl Into<String>,
        source: RemoteError,
    ) -> Self {
        CuratorError::Mutation {
            item_id: item_id.into(),
            alias: alias.into(),
            source,
        }
    }

    pub fn action(action: &'static str, source: RemoteError) -> Self {
        CuratorError::Action { action, source }
    }

    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            CuratorError::Fetch { source, .. }
            | CuratorError::Mutation { source, .. }
            | CuratorError::Action { source, .. } => source.category(),
            CuratorError::Store(_) => ErrorCategory::Storage,
            CuratorError::Configuration(_) => ErrorCategory::Configuration,
            CuratorError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    ///
    /// Only page fetches are retried automatically; mutations are left to
    /// the user even when the underlying failure was transient.
    pub fn is_retryable(&self) -> bool {
        match self {
            CuratorError::Fetch { source, .. } => source.category().is_retryable(),
            CuratorError::WithContext { error, .. } => error.is_retryable(),
            _ => false,
        }
    }

    /// True for errors that will fail again unless the setup changes.
    pub fn is_configuration(&self) -> bool {
        matches!(self.inner(), CuratorError::Configuration(_))
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            CuratorError::Fetch { .. } => {
                "Could not load more items. Scroll down to try again.".to_string()
            }
            CuratorError::Mutation { alias, .. } => {
                format!("Your '{}' reaction was not saved. Please try again.", alias)
            }
            CuratorError::Action { action, .. } => {
                format!("Could not {}. Please try again.", action.replace('_', " "))
            }
            CuratorError::Store(_) => "The local cache is unavailable.".to_string(),
            CuratorError::Configuration(err) => err.to_string(),
            CuratorError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            CuratorError::Fetch { .. } => "E_FETCH",
            CuratorError::Mutation { .. } => "E_MUTATION",
            CuratorError::Action { .. } => "E_ACTION",
            CuratorError::Store(_) => "E_STORE",
            CuratorError::Configuration(_) => "E_CONFIG",
            CuratorError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        CuratorError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Tag this error with the run that produced it, keeping any context
    /// already attached.
    pub fn with_correlation_id(self, id: impl Into<String>) -> Self {
        match self {
            CuratorError::WithContext { error, context } => CuratorError::WithContext {
                error,
                context: context.with_correlation_id(id),
            },
            other => {
                let ctx = ErrorContext::new(other.error_code()).with_correlation_id(id);
                other.with_context(ctx)
            }
        }
    }

    /// Correlation id of the run that produced this error, if tagged.
    pub fn correlation_id(&self) -> Option<&str> {
        self.context()
            .and_then(|ctx| ctx.correlation_id.as_deref())
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            CuratorError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &CuratorError {
        match self {
            CuratorError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for CuratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CuratorError::Fetch {
                list_id,
                page,
                source,
            } => write!(f, "Fetching page {} of list {} failed: {}", page, list_id, source),
            CuratorError::Mutation {
                item_id,
                alias,
                source,
            } => write!(
                f,
                "Toggling '{}' on item {} failed: {}",
                alias, item_id, source
            ),
            CuratorError::Action { action, source } => write!(f, "{} failed: {}", action, source),
            CuratorError::Store(err) => write!(f, "{}", err),
            CuratorError::Configuration(err) => write!(f, "{}", err),
            CuratorError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for CuratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CuratorError::Fetch { source, .. }
            | CuratorError::Mutation { source, .. }
            | CuratorError::Action { source, .. } => Some(source),
            CuratorError::Store(err) => Some(err),
            CuratorError::Configuration(err) => Some(err),
            CuratorError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<StoreError> for CuratorError {
    fn from(err: StoreError) -> Self {
        CuratorError::Store(err)
    }
}

impl From<ConfigError> for CuratorError {
    fn from(err: ConfigError) -> Self {
        CuratorError::Configuration(err)
    }
}
