//! Configuration for the `PagerDuty` REST client.

use std::env;

/// Environment variable holding the REST API token.
pub const ENV_PAGERDUTY_API_TOKEN: &str = "PAGERDUTY_API_TOKEN";

/// Environment variable overriding the API base URL.
pub const ENV_PAGERDUTY_API_URL: &str = "PAGERDUTY_API_URL";

/// Environment variable overriding the request timeout.
pub const ENV_PAGERDUTY_TIMEOUT_SECS: &str = "PAGERDUTY_TIMEOUT_SECS";

/// `PagerDuty` REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `PagerDuty` client configuration.
#[derive(Clone)]
pub struct ClientConfig {
    /// REST API token.
    pub api_token: Option<String>,
    /// Base URL requests are resolved against.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Config with an explicit token and default endpoint.
    #[must_use]
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: Some(api_token.into()),
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_token: env::var(ENV_PAGERDUTY_API_TOKEN)
                .ok()
                .filter(|s| !s.is_empty()),
            base_url: env::var(ENV_PAGERDUTY_API_URL)
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timeout_secs: env::var(ENV_PAGERDUTY_TIMEOUT_SECS)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
