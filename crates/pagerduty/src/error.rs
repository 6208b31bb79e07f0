//! Error types for the `PagerDuty` client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::client::ResponseMeta;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PagerDutyError>;

/// Errors returned by the `PagerDuty` client.
///
/// Variants that occur after a response was received carry its
/// [`ResponseMeta`] so callers can still inspect the HTTP status.
#[derive(Debug, Error)]
pub enum PagerDutyError {
    /// Client could not be constructed
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Options could not be turned into query parameters
    #[error("failed to encode query parameters: {0}")]
    QueryEncoding(String),

    /// Request never produced a response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("PagerDuty returned {}: {body}", .meta.status)]
    Status {
        /// Response metadata
        meta: ResponseMeta,
        /// Raw response body
        body: String,
    },

    /// Status arrived but the body could not be read
    #[error("failed to read PagerDuty response body: {source}")]
    Body {
        /// Response metadata
        meta: ResponseMeta,
        /// Underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// Response body was not the expected JSON
    #[error("failed to decode PagerDuty response: {source}")]
    Decode {
        /// Response metadata
        meta: ResponseMeta,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Envelope decoded but the wrapped object was absent or null
    #[error("pagerduty: {object} json object nil")]
    MissingObject {
        /// Response metadata
        meta: ResponseMeta,
        /// Name of the missing object
        object: &'static str,
    },
}

impl PagerDutyError {
    /// Response metadata, if the request got as far as a response.
    #[must_use]
    pub fn response(&self) -> Option<&ResponseMeta> {
        match self {
            Self::Status { meta, .. }
            | Self::Body { meta, .. }
            | Self::Decode { meta, .. }
            | Self::MissingObject { meta, .. } => Some(meta),
            Self::Config(_) | Self::QueryEncoding(_) | Self::Http(_) => None,
        }
    }

    /// HTTP status of the response, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => e.status(),
            other => other.response().map(|meta| meta.status),
        }
    }

    /// Whether the error happened before any request was sent.
    #[must_use]
    pub const fn is_pre_request(&self) -> bool {
        matches!(self, Self::Config(_) | Self::QueryEncoding(_))
    }
}
