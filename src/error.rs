//! Error types for webdex operations.
//!
//! This module defines [`WebdexError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The fetch/listing pipeline reports failures through the closed set of
//!   network variants (`Connection`, `Timeout`, `Authentication`, `NotFound`,
//!   `Server`), which callers match on to decide between retry and surfacing
//! - Use `anyhow::Error` (via `WebdexError::Other`) for unexpected errors
//! - Cache and bookmark storage faults are logged and degraded internally,
//!   never surfaced through this type

use thiserror::Error;

/// Core error type for webdex operations.
#[derive(Debug, Error)]
pub enum WebdexError {
    /// Network-level failure: DNS, refused/reset connection, or any other
    /// client-side request problem.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// The request did not complete within the configured timeout.
    #[error("Request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// The server rejected our credentials (HTTP 401) or forbade access
    /// (HTTP 403).
    #[error("Authentication error: {message}")]
    Authentication { message: String },

    /// The requested resource does not exist (HTTP 404).
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    /// The server failed to handle the request (HTTP 5xx).
    #[error("Server error (HTTP {status})")]
    Server { status: u16 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WebdexError {
    /// Whether a retry can reasonably succeed.
    ///
    /// Authentication and not-found failures are terminal: the same request
    /// will fail the same way, so retrying only delays the answer.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            WebdexError::Connection { .. } | WebdexError::Timeout { .. } | WebdexError::Server { .. }
        )
    }
}

/// Result type alias for webdex operations.
pub type Result<T> = std::result::Result<T, WebdexError>;
