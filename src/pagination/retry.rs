//! Fixed-interval retry policy.
//!
//! Retries wait on tokio's clock, so tests running with a paused clock
//! advance through the intervals instantly.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How often and how many times to retry a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay between a failure and the next attempt
    interval: Duration,
    /// Maximum number of retries after the first attempt (None = unbounded)
    max_retries: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever, waiting `interval` between attempts.
    pub fn fixed(interval: Duration) -> Self {
        Self {
            interval,
            max_retries: None,
        }
    }

    /// Give up and return the last error after `retries` retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_retries.is_none()
    }

    /// Run `operation` until it succeeds or the policy is exhausted.
    pub async fn run<F, Fut, T, E>(&self, operation: &str, mut attempt_fn: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut retries = 0u32;

        loop {
            match attempt_fn().await {
                Ok(value) => {
                    if retries > 0 {
                        tracing::info!(operation, retries, "Succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if self.max_retries.is_some_and(|max| retries >= max) {
                        tracing::warn!(operation, retries, error = %err, "Giving up");
                        return Err(err);
                    }

                    retries += 1;
                    tracing::warn!(
                        operation,
                        attempt = retries,
                        error = %err,
                        "Attempt failed, retrying in {:?}",
                        self.interval
                    );
                    tokio::time::sleep(self.interval).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_policy_retries_until_success() {
        let policy = RetryPolicy::fixed(Duration::from_secs(5));
        let calls = AtomicU32::new(0);
        let start = Instant::now();

        let result: Result<u32, String> = policy
            .run("test", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 3 {
                    Err(format!("failure {}", n))
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert!(start.elapsed() >= Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn test_bounded_policy_returns_last_error() {
        let policy = RetryPolicy::fixed(Duration::from_millis(5)).with_max_retries(2);
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = policy
            .run("test", || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                Err(format!("failure {}", n))
            })
            .await;

        assert_eq!(result, Err("failure 2".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_success_does_not_wait() {
        let policy = RetryPolicy::fixed(Duration::from_secs(60));
        let result: Result<&str, String> = policy.run("test", || async { Ok("done") }).await;
        assert_eq!(result, Ok("done"));
    }

    #[test]
    fn test_builder() {
        let policy = RetryPolicy::fixed(Duration::from_millis(5));
        assert!(policy.is_unbounded());

        let bounded = policy.with_max_retries(4);
        assert_eq!(bounded.max_retries(), Some(4));
        assert_eq!(bounded.interval(), Duration::from_millis(5));
    }
}
