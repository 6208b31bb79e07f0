//! Escalation policies: listing, lookup and on-call assignments.
//!
//! # Usage
//!
//! ```no_run
//! use pagerduty::{ListOptions, PagerDutyClient};
//!
//! # async fn example() -> pagerduty::Result<()> {
//! let client = PagerDutyClient::from_env()?;
//!
//! let policies = client
//!     .escalation_policies()
//!     .list(Some(&ListOptions::new().with_query("database")))
//!     .await?;
//!
//! for policy in &policies.value.escalation_policies {
//!     let on_call = client.escalation_policies().on_call(&policy.id).await?;
//!     println!("{}: {} on call", policy.name, on_call.value.len());
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::client::{ApiResponse, PagerDutyClient};
use crate::error::{PagerDutyError, Result};
use crate::models::{is_zero, null_default, ServiceSummary, User};
use crate::query::add_options;

/// Resource path for escalation policies.
const ESCALATION_POLICIES_PATH: &str = "escalation_policies";

/// Envelope key wrapping a single policy.
const ESCALATION_POLICY_KEY: &str = "escalation_policy";

/// Escalation policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    /// Policy ID
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Policy name
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Rules, in escalation order
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub escalation_rules: Vec<EscalationRule>,
    /// Services using this policy
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<ServiceSummary>,
    /// Current on-call assignments; `None` when the server sent none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_call: Option<Vec<OnCallAssignment>>,
    /// Times the policy repeats before giving up
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub num_loops: i64,
    /// Free-text description
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// One step of an escalation policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationRule {
    /// Rule ID
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Minutes before escalating to the next rule
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub escalation_delay_in_minutes: i64,
    /// Raw rule object
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Map::is_empty")]
    pub rule_object: Map<String, Value>,
    /// Notification targets (users, schedules)
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Map<String, Value>>,
}

/// Who is on call at a given escalation level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnCallAssignment {
    /// Escalation level (1 = first responder)
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub level: i64,
    /// Start of the on-call window
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub start: String,
    /// End of the on-call window
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub end: String,
    /// Assigned user
    #[serde(deserialize_with = "null_default", skip_serializing_if = "User::is_empty")]
    pub user: User,
}

/// Response body of the list endpoint.
///
/// Pagination counters are echoed from the server as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicyList {
    /// Policies in this page
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub escalation_policies: Vec<EscalationPolicy>,
    /// Page size
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub limit: i64,
    /// Page offset
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub offset: i64,
    /// Total matching policies
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub total: i64,
}

/// Envelope around a single policy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicyWrapper {
    /// The wrapped policy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub escalation_policy: Option<EscalationPolicy>,
}

/// Filters for [`EscalationPolicyService::list`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListOptions {
    /// Name filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Act on behalf of this user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requester_id: Option<String>,
}

impl ListOptions {
    /// Empty options (no filter).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the name filter.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Set the requester.
    #[must_use]
    pub fn with_requester_id(mut self, requester_id: impl Into<String>) -> Self {
        self.requester_id = Some(requester_id.into());
        self
    }
}

/// Escalation policy operations, borrowed from a [`PagerDutyClient`].
#[derive(Debug, Clone, Copy)]
pub struct EscalationPolicyService<'a> {
    client: &'a PagerDutyClient,
}

impl<'a> EscalationPolicyService<'a> {
    pub(crate) const fn new(client: &'a PagerDutyClient) -> Self {
        Self { client }
    }

    /// List escalation policies.
    ///
    /// # Errors
    /// Returns [`PagerDutyError::QueryEncoding`] before any request is made if
    /// the options cannot be encoded, otherwise any transport error.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        options: Option<&ListOptions>,
    ) -> Result<ApiResponse<EscalationPolicyList>> {
        let path = add_options(ESCALATION_POLICIES_PATH, options)?;
        self.client.get(&path).await
    }

    /// Get a single escalation policy.
    ///
    /// # Errors
    /// Returns [`PagerDutyError::MissingObject`] if the response has no
    /// `escalation_policy`, otherwise any transport error.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<ApiResponse<EscalationPolicy>> {
        let (wrapper, meta) = self
            .client
            .get::<EscalationPolicyWrapper>(&format!("{ESCALATION_POLICIES_PATH}/{id}"))
            .await?
            .into_parts();

        match wrapper.escalation_policy {
            Some(policy) => Ok(ApiResponse {
                value: policy,
                meta,
            }),
            None => Err(PagerDutyError::MissingObject {
                meta,
                object: ESCALATION_POLICY_KEY,
            }),
        }
    }

    /// Get the current on-call assignments of a policy.
    ///
    /// A missing policy and a policy without `on_call` both report
    /// [`PagerDutyError::MissingObject`].
    ///
    /// # Errors
    /// Returns [`PagerDutyError::MissingObject`] as above, otherwise any
    /// transport error.
    #[instrument(skip(self))]
    pub async fn on_call(&self, id: &str) -> Result<ApiResponse<Vec<OnCallAssignment>>> {
        let (wrapper, meta) = self
            .client
            .get::<EscalationPolicyWrapper>(&format!("{ESCALATION_POLICIES_PATH}/{id}/on_call"))
            .await?
            .into_parts();

        match wrapper.escalation_policy.and_then(|policy| policy.on_call) {
            Some(on_call) => Ok(ApiResponse {
                value: on_call,
                meta,
            }),
            None => Err(PagerDutyError::MissingObject {
                meta,
                object: ESCALATION_POLICY_KEY,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(id: &str, name: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            user_url: format!("/users/{id}"),
        }
    }

    fn sample_policy() -> EscalationPolicy {
        let mut rule_object = Map::new();
        rule_object.insert("b".to_string(), json!("c"));

        let mut target = Map::new();
        target.insert("type".to_string(), json!("schedule"));
        target.insert("id".to_string(), json!("PSCHED1"));

        EscalationPolicy {
            id: "ABCDEF".to_string(),
            name: "Testing ABCDEF".to_string(),
            escalation_rules: vec![EscalationRule {
                id: "RulesABC".to_string(),
                escalation_delay_in_minutes: 30,
                rule_object,
                targets: vec![target],
            }],
            services: vec![ServiceSummary {
                id: "PSVC1".to_string(),
                name: "Checkout".to_string(),
                service_url: "/services/PSVC1".to_string(),
                service_key: "checkout@example.pagerduty.com".to_string(),
                auto_resolve_timeout: 14_400,
                status: "active".to_string(),
            }],
            on_call: Some(vec![
                OnCallAssignment {
                    level: 1,
                    start: "today".to_string(),
                    end: "tomorrow".to_string(),
                    user: user("ABC", "Mike Yourmom", "mike@yourmom.com"),
                },
                OnCallAssignment {
                    level: 2,
                    start: "today".to_string(),
                    end: "tomorrow".to_string(),
                    user: user("DEF", "Is Hot", "is@hot.com"),
                },
            ]),
            num_loops: 2,
            description: "Primary database escalation".to_string(),
        }
    }

    #[test]
    fn test_wrapper_round_trip() {
        let wrapper = EscalationPolicyWrapper {
            escalation_policy: Some(sample_policy()),
        };

        let json = serde_json::to_string(&wrapper).unwrap();
        let decoded: EscalationPolicyWrapper = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, wrapper);
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(sample_policy()).unwrap();

        assert_eq!(value["id"], "ABCDEF");
        assert_eq!(value["num_loops"], 2);
        assert_eq!(value["description"], "Primary database escalation");
        assert_eq!(value["escalation_rules"][0]["escalation_delay_in_minutes"], 30);
        assert_eq!(value["escalation_rules"][0]["rule_object"]["b"], "c");
        assert_eq!(value["escalation_rules"][0]["targets"][0]["type"], "schedule");
        assert_eq!(value["services"][0]["auto_resolve_timeout"], 14_400);
        assert_eq!(value["on_call"][1]["user"]["user_url"], "/users/DEF");
    }

    #[test]
    fn test_empty_policy_serializes_to_empty_object() {
        let value = serde_json::to_value(EscalationPolicy::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_list_response_deserialize() {
        let list: EscalationPolicyList = serde_json::from_value(json!({
            "escalation_policies": [
                { "id": "P1", "name": "One" },
                { "id": "P2", "name": "Two", "num_loops": 3 }
            ],
            "limit": 25,
            "offset": 0,
            "total": 2
        }))
        .unwrap();

        assert_eq!(list.escalation_policies.len(), 2);
        assert_eq!(list.escalation_policies[1].num_loops, 3);
        assert_eq!(list.limit, 25);
        assert_eq!(list.offset, 0);
        assert_eq!(list.total, 2);
    }

    #[test]
    fn test_null_wrapper_decodes_to_none() {
        let wrapper: EscalationPolicyWrapper =
            serde_json::from_str(r#"{"escalation_policy":null}"#).unwrap();
        assert!(wrapper.escalation_policy.is_none());

        let wrapper: EscalationPolicyWrapper = serde_json::from_str("{}").unwrap();
        assert!(wrapper.escalation_policy.is_none());
    }

    #[test]
    fn test_on_call_absent_vs_empty() {
        let policy: EscalationPolicy = serde_json::from_str(r#"{"id":"P1"}"#).unwrap();
        assert!(policy.on_call.is_none());

        let policy: EscalationPolicy = serde_json::from_str(r#"{"id":"P1","on_call":[]}"#).unwrap();
        assert_eq!(policy.on_call, Some(vec![]));
    }

    #[test]
    fn test_list_options_builder() {
        let opts = ListOptions::new()
            .with_query("db")
            .with_requester_id("PUSER1");
        assert_eq!(opts.query.as_deref(), Some("db"));
        assert_eq!(opts.requester_id.as_deref(), Some("PUSER1"));

        let path = add_options(ESCALATION_POLICIES_PATH, Some(&opts)).unwrap();
        assert_eq!(path, "escalation_policies?query=db&requester_id=PUSER1");
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let wrapper: EscalationPolicyWrapper = serde_json::from_value(json!({
            "escalation_policy": {
                "id": "P1",
                "name": "x",
                "description": null,
                "num_loops": null,
                "services": null,
                "escalation_rules": [
                    { "id": "R1", "rule_object": null, "targets": null }
                ],
                "on_call": [
                    { "level": 1, "start": null, "user": null }
                ]
            }
        }))
        .unwrap();

        let policy = wrapper.escalation_policy.unwrap();
        assert_eq!(policy.id, "P1");
        assert!(policy.description.is_empty());
        assert_eq!(policy.num_loops, 0);
        assert!(policy.services.is_empty());
        assert!(policy.escalation_rules[0].rule_object.is_empty());
        assert!(policy.escalation_rules[0].targets.is_empty());

        let on_call = policy.on_call.unwrap();
        assert_eq!(on_call[0].level, 1);
        assert!(on_call[0].start.is_empty());
        assert!(on_call[0].user.is_empty());
    }

    #[test]
    fn test_empty_user_is_omitted() {
        let assignment = OnCallAssignment {
            level: 1,
            ..OnCallAssignment::default()
        };
        assert_eq!(serde_json::to_value(&assignment).unwrap(), json!({ "level": 1 }));
    }
}
