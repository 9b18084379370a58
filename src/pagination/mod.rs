//! Page loading into the item store.
//!
//! A refresh replaces the cached collection with page 1 and is retried until
//! it succeeds; load-more appends the next page once. Both set the
//! completion flag with the short-page rule.

mod driver;
mod retry;

pub use driver::{next_page_number, PaginationDriver};
pub use retry::RetryPolicy;
