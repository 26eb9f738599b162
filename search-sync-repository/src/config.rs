//! Connection configuration for search engine clients.

use std::env;
use std::time::Duration;

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Configuration used to build a search engine client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Search engine base URL.
    pub url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPENSEARCH_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given URL with no request timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: None,
        }
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Read the config from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_TIMEOUT_MS`: request timeout in milliseconds (optional)
    pub fn from_env() -> Self {
        let url = env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let timeout = env::var("OPENSEARCH_TIMEOUT_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .map(Duration::from_millis);

        Self { url, timeout }
    }
}
