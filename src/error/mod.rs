//! Unified error handling for the controller.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Collaborator Errors**: `RemoteError`, `StoreError`, `ConfigError`
//! - **Unified Error Type**: `CuratorError`, the payload of `Error` snapshots
//! - **Error Context**: operation, list and retry information
//! - **Result Type Alias**: `CuratorResult<T>`
//!
//! | Variant | Raised by | Retried automatically |
//! |---------|-----------|-----------------------|
//! | Fetch | refresh, load-more | refresh only |
//! | Mutation | reaction / upvote toggles | No |
//! | Action | report, delete, type change, list reload | list reload only |
//! | Store | item store | No |
//! | Configuration | tab without a remote handler | No |

mod category;
mod context;
mod curator_error;
mod remote;
mod result;

pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use curator_error::CuratorError;
pub use remote::{ConfigError, RemoteError, StoreError};
pub use result::{CuratorResult, ResultExt};
