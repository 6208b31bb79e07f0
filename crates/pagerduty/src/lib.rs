//! `PagerDuty` REST API client.
//!
//! This crate provides:
//! - An authenticated HTTP transport ([`PagerDutyClient`])
//! - Typed escalation policy operations (list, get, on-call)
//! - Query string encoding for list filters
//! - Environment-based configuration
//!
//! # Usage
//!
//! ```no_run
//! use pagerduty::PagerDutyClient;
//!
//! # async fn example() -> pagerduty::Result<()> {
//! let client = PagerDutyClient::from_env()?;
//! let response = client.escalation_policies().get("PABC123").await?;
//! println!("{} ({})", response.value.name, response.status());
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! - `PAGERDUTY_API_TOKEN`: REST API token (required)
//! - `PAGERDUTY_API_URL`: Base URL override (default `https://api.pagerduty.com`)
//! - `PAGERDUTY_TIMEOUT_SECS`: Request timeout (default 30)

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod escalation_policies;
pub mod models;
pub mod query;

pub use client::{ApiResponse, PagerDutyClient, ResponseMeta};
pub use config::ClientConfig;
pub use error::{PagerDutyError, Result};
pub use escalation_policies::{
    EscalationPolicy, EscalationPolicyList, EscalationPolicyService, EscalationPolicyWrapper,
    EscalationRule, ListOptions, OnCallAssignment,
};
pub use models::{ServiceSummary, User};
