//! HTTP fetching with typed failure classification.

use std::time::Duration;

use crate::error::{Result, WebdexError};

/// Default timeout for listing and download requests.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for the pre-browse connectivity probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Basic-auth credentials for a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Blocking HTTP client wrapper that maps every failure into the
/// [`WebdexError`] taxonomy.
pub struct Fetcher {
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl Fetcher {
    /// Create a fetcher with the specified timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .timeout(timeout)
                .build()
                .expect("failed to create HTTP client"),
            timeout,
        }
    }

    /// Create a fetcher for streaming downloads: no overall deadline (a
    /// large file outlives any fixed request timeout), only a connect
    /// timeout.
    pub fn streaming() -> Self {
        Self {
            client: reqwest::blocking::Client::builder()
                .connect_timeout(DEFAULT_PROBE_TIMEOUT)
                .build()
                .expect("failed to create HTTP client"),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Get the request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue a GET and classify the response status, returning the open
    /// response for the caller to consume.
    ///
    /// Status classification, in priority order: 401/403 are authentication
    /// failures, 404 is not-found, 5xx is a server error, and any other 4xx
    /// is treated as a client-side connection problem.
    pub fn get(
        &self,
        url: &str,
        credentials: Option<&Credentials>,
    ) -> Result<reqwest::blocking::Response> {
        let mut request = self.client.get(url);
        if let Some(creds) = credentials {
            request = request.basic_auth(&creds.username, Some(&creds.password));
        }

        let response = request.send().map_err(|e| self.classify_transport(e))?;

        match response.status().as_u16() {
            401 => Err(WebdexError::Authentication {
                message: "authentication required - invalid or missing credentials".to_string(),
            }),
            403 => Err(WebdexError::Authentication {
                message: "access forbidden - check permissions".to_string(),
            }),
            404 => Err(WebdexError::NotFound {
                url: url.to_string(),
            }),
            status if status >= 500 => Err(WebdexError::Server { status }),
            status if status >= 400 => Err(WebdexError::Connection {
                message: format!("client error (HTTP {status})"),
            }),
            _ => Ok(response),
        }
    }

    /// Fetch a URL's body as bytes.
    pub fn fetch(&self, url: &str, credentials: Option<&Credentials>) -> Result<Vec<u8>> {
        let response = self.get(url, credentials)?;
        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|e| self.classify_transport(e))
    }

    /// Lightweight reachability check with a short timeout, run once before
    /// entering the navigation loop. The body is not read.
    pub fn probe(url: &str, credentials: Option<&Credentials>) -> Result<()> {
        Fetcher::new(DEFAULT_PROBE_TIMEOUT)
            .get(url, credentials)
            .map(|_| ())
    }

    /// Map a transport-level failure into the error taxonomy.
    fn classify_transport(&self, err: reqwest::Error) -> WebdexError {
        if err.is_timeout() {
            WebdexError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else if err.is_connect() {
            WebdexError::Connection {
                message: format!("connection failed - check network and server address: {err}"),
            }
        } else {
            WebdexError::Connection {
                message: format!("request error: {err}"),
            }
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }
}
