//! Resilient HTTP fetching: typed error classification and backoff retry.

mod client;
mod retry;

pub use client::{Credentials, Fetcher, DEFAULT_FETCH_TIMEOUT, DEFAULT_PROBE_TIMEOUT};
pub use retry::{fetch_with_retry, RetryPolicy, DEFAULT_MAX_RETRIES};
