//! HTTP client configuration.

use std::env;
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "http://localhost:4566";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how the HTTP client reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Base URL requests are posted to.
    pub endpoint: String,
    /// Region the store runs in.
    pub region: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            region: DEFAULT_REGION.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `TABLEKIT_ENDPOINT_URL` | `http://localhost:4566` |
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `TABLEKIT_TIMEOUT_MS` | `30000` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("TABLEKIT_ENDPOINT_URL") {
            config.endpoint = v;
        }
        if let Some(v) = lookup("DEFAULT_REGION") {
            config.region = v;
        }
        if let Some(v) = lookup("TABLEKIT_TIMEOUT_MS") {
            match v.parse::<u64>() {
                Ok(ms) => config.timeout = Duration::from_millis(ms),
                Err(e) => tracing::warn!(error = %e, value = %v, "ignoring TABLEKIT_TIMEOUT_MS"),
            }
        }

        config
    }

    /// Point the client at another endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}
