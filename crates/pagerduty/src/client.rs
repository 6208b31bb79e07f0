//! HTTP transport for the `PagerDuty` REST API.
//!
//! [`PagerDutyClient`] owns the authenticated `reqwest` client and the base
//! URL. Resource services borrow it and only deal in paths and types.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{ClientConfig, ENV_PAGERDUTY_API_TOKEN};
use crate::error::{PagerDutyError, Result};
use crate::escalation_policies::EscalationPolicyService;

/// Media type selecting v2 of the REST API.
const PAGERDUTY_ACCEPT: &str = "application/vnd.pagerduty+json;version=2";

/// Status and headers of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
}

/// A decoded response body together with its metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Decoded value
    pub value: T,
    /// Response metadata
    pub meta: ResponseMeta,
}

impl<T> ApiResponse<T> {
    /// HTTP status code of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.meta.status
    }

    /// Drop the metadata and keep the value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Split into value and metadata.
    #[must_use]
    pub fn into_parts(self) -> (T, ResponseMeta) {
        (self.value, self.meta)
    }

    /// Transform the value, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            value: f(self.value),
            meta: self.meta,
        }
    }
}

/// Authenticated client for the `PagerDuty` REST API.
#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    client: reqwest::Client,
    base_url: String,
}

impl PagerDutyClient {
    /// Create a client from explicit configuration.
    ///
    /// # Errors
    /// Returns [`PagerDutyError::Config`] if the token is missing or cannot be
    /// used as a header value, or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let token = config
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| PagerDutyError::Config(format!("{ENV_PAGERDUTY_API_TOKEN} not set")))?;

        let mut auth = HeaderValue::from_str(&format!("Token token={token}"))
            .map_err(|_| PagerDutyError::Config("invalid API token".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(PAGERDUTY_ACCEPT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PagerDutyError::Config(format!("failed to build HTTP client: {e}")))?;

        debug!(base_url = %config.base_url, "PagerDuty client initialized");

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from `PAGERDUTY_*` environment variables.
    ///
    /// # Errors
    /// Returns [`PagerDutyError::Config`] if `PAGERDUTY_API_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Escalation policy operations.
    #[must_use]
    pub const fn escalation_policies(&self) -> EscalationPolicyService<'_> {
        EscalationPolicyService::new(self)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET `{base_url}/{path}` and decode the JSON body into `T`.
    ///
    /// # Errors
    /// - [`PagerDutyError::Http`] if no response was received
    /// - [`PagerDutyError::Body`] if the body could not be read
    /// - [`PagerDutyError::Status`] on a non-success status
    /// - [`PagerDutyError::Decode`] if the body is not valid JSON for `T`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<ApiResponse<T>> {
        let url = self.url(path);
        debug!(%url, "Sending PagerDuty request");

        let response = self.client.get(&url).send().await?;
        let meta = ResponseMeta {
            status: response.status(),
            headers: response.headers().clone(),
        };
        let body = match response.text().await {
            Ok(body) => body,
            Err(source) => return Err(PagerDutyError::Body { meta, source }),
        };

        debug!(status = %meta.status, bytes = body.len(), "PagerDuty response received");

        if !meta.status.is_success() {
            return Err(PagerDutyError::Status { meta, body });
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(ApiResponse { value, meta }),
            Err(source) => Err(PagerDutyError::Decode { meta, source }),
        }
    }
}
