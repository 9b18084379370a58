//! Result type alias for controller operations.

use super::context::ErrorContext;
use super::curator_error::CuratorError;

/// Type alias for Results using CuratorError.
pub type CuratorResult<T> = Result<T, CuratorError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use curator::error::{ErrorContext, ResultExt};
    ///
    /// let page = driver.load_more(&list_id, &setup, || true)
    ///     .await
    ///     .context(ErrorContext::new("load_more").with_list_id(&list_id))?;
    /// ```
    fn context(self, ctx: ErrorContext) -> CuratorResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> CuratorResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<CuratorError>,
{
    fn context(self, ctx: ErrorContext) -> CuratorResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> CuratorResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}
