//! Entities shared between `PagerDuty` resources.
//!
//! Every field is optional on the wire: absent fields decode to their
//! default and empty fields are skipped when encoding.

use serde::{Deserialize, Deserializer, Serialize};

/// `PagerDuty` user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// User ID
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display name
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Email address
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub email: String,
    /// Profile URL
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub user_url: String,
}

impl User {
    /// Whether every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Service summary as embedded in other resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSummary {
    /// Service ID
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Service name
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Service URL
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub service_url: String,
    /// Integration key
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub service_key: String,
    /// Seconds before an incident auto-resolves
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_zero")]
    pub auto_resolve_timeout: i64,
    /// Current status (active, warning, critical, ...)
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub status: String,
}

/// Decode `null` the same way as an absent field.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) const fn is_zero(n: &i64) -> bool {
    *n == 0
}
