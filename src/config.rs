//! Controller configuration.
//!
//! Defaults follow the screen's documented behavior: pages of 10 items, a
//! refresh retried every 5 seconds forever, and a list reload retried every
//! 5 milliseconds forever.

use std::time::Duration;
use tokio::runtime::Handle;

use crate::error::ConfigError;
use crate::pagination::RetryPolicy;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_REFRESH_RETRY: Duration = Duration::from_secs(5);
pub const DEFAULT_LIST_RETRY: Duration = Duration::from_millis(5);

const ENV_PAGE_SIZE: &str = "CURATOR_PAGE_SIZE";
const ENV_REFRESH_RETRY_MS: &str = "CURATOR_REFRESH_RETRY_MS";
const ENV_LIST_RETRY_MS: &str = "CURATOR_LIST_RETRY_MS";

/// Runtime handles the controller spawns its work on.
///
/// Pagination and reaction toggles get separate handles so one kind of I/O
/// cannot queue behind the other. Both may point at the same runtime.
#[derive(Debug, Clone)]
pub struct ExecutionContexts {
    pub pagination: Handle,
    pub reactions: Handle,
}

impl ExecutionContexts {
    pub fn new(pagination: Handle, reactions: Handle) -> Self {
        Self {
            pagination,
            reactions,
        }
    }

    /// Use the current runtime for both contexts.
    pub fn current() -> Result<Self, ConfigError> {
        let handle = Handle::try_current().map_err(|e| ConfigError::NoRuntime(e.to_string()))?;
        Ok(Self::new(handle.clone(), handle))
    }
}

/// Configuration for a details controller.
///
/// # Example
///
/// ```ignore
/// use curator::ControllerConfig;
///
/// let config = ControllerConfig::default()
///     .with_page_size(20)
///     .with_refresh_retry(RetryPolicy::fixed(Duration::from_secs(1)));
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Items per page (default: 10)
    pub page_size: usize,
    /// Retry policy of the page 1 refresh (default: every 5 s, unbounded)
    pub refresh_retry: RetryPolicy,
    /// Retry policy of the list entity reload (default: every 5 ms, unbounded)
    pub list_retry: RetryPolicy,
    /// Execution contexts; the current runtime when unset
    pub contexts: Option<ExecutionContexts>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            refresh_retry: RetryPolicy::fixed(DEFAULT_REFRESH_RETRY),
            list_retry: RetryPolicy::fixed(DEFAULT_LIST_RETRY),
            contexts: None,
        }
    }
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_refresh_retry(mut self, policy: RetryPolicy) -> Self {
        self.refresh_retry = policy;
        self
    }

    pub fn with_list_retry(mut self, policy: RetryPolicy) -> Self {
        self.list_retry = policy;
        self
    }

    pub fn with_contexts(mut self, contexts: ExecutionContexts) -> Self {
        self.contexts = Some(contexts);
        self
    }

    /// Defaults overridden by `CURATOR_PAGE_SIZE`, `CURATOR_REFRESH_RETRY_MS`
    /// and `CURATOR_LIST_RETRY_MS` where set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(page_size) = read_env(ENV_PAGE_SIZE)? {
            config.page_size = usize::try_from(page_size).map_err(|e| invalid(ENV_PAGE_SIZE, e))?;
        }
        if let Some(ms) = read_env(ENV_REFRESH_RETRY_MS)? {
            config.refresh_retry = RetryPolicy::fixed(Duration::from_millis(ms));
        }
        if let Some(ms) = read_env(ENV_LIST_RETRY_MS)? {
            config.list_retry = RetryPolicy::fixed(Duration::from_millis(ms));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Configured contexts, or the current runtime's.
    pub fn resolve_contexts(&self) -> Result<ExecutionContexts, ConfigError> {
        match &self.contexts {
            Some(contexts) => Ok(contexts.clone()),
            None => ExecutionContexts::current(),
        }
    }
}

fn read_env(key: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|e| invalid(key, e)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(invalid(key, e)),
    }
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: err.to_string(),
    }
}
