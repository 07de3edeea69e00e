//! Retry with exponential backoff for transient fetch failures.

use std::time::Duration;

use crate::error::Result;

use super::client::{Credentials, Fetcher};

/// Default number of attempts (initial try included).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Backoff policy: up to `max_retries` attempts, waiting `2^attempt` seconds
/// between them (1 s, 2 s, 4 s, ...). No jitter, no cap.
///
/// Only transient errors (connection, timeout, server) are retried;
/// authentication and not-found failures surface immediately. The error of
/// the final attempt is returned to the caller, never swallowed.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Wait before the retry following the 0-based `attempt`.
    pub fn backoff(attempt: u32) -> Duration {
        Duration::from_secs(1u64 << attempt)
    }

    /// Run `operation` under this policy. The sleep is injected so tests can
    /// record backoff intervals instead of waiting them out.
    pub fn run<T, F, S>(&self, mut operation: F, mut sleep: S) -> Result<T>
    where
        F: FnMut() -> Result<T>,
        S: FnMut(Duration),
    {
        let attempts = self.max_retries.max(1);
        let mut attempt = 0;

        loop {
            match operation() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt + 1 < attempts => {
                    let wait = Self::backoff(attempt);
                    tracing::warn!(
                        "attempt {} of {} failed ({}), retrying in {}s",
                        attempt + 1,
                        attempts,
                        err,
                        wait.as_secs()
                    );
                    sleep(wait);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Fetch a URL's body, retrying transient failures per `policy`.
pub fn fetch_with_retry(
    fetcher: &Fetcher,
    policy: RetryPolicy,
    url: &str,
    credentials: Option<&Credentials>,
) -> Result<Vec<u8>> {
    policy.run(|| fetcher.fetch(url, credentials), std::thread::sleep)
}
