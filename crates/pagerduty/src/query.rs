//! Query string encoding for list endpoints.
//!
//! Options structs are serialized through `serde_json` into a flat object
//! and every non-empty field becomes a `key=value` pair. Keys come out in
//! sorted order.

use serde::Serialize;
use serde_json::Value;

use crate::error::{PagerDutyError, Result};

/// Append the encoded `options` to `path`.
///
/// Returns `path` untouched when there are no options or every field is
/// empty.
///
/// # Errors
/// Returns [`PagerDutyError::QueryEncoding`] if the options do not serialize
/// to a flat object of scalars.
pub fn add_options<T>(path: &str, options: Option<&T>) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let Some(options) = options else {
        return Ok(path.to_string());
    };

    let pairs = to_pairs(options)?;
    if pairs.is_empty() {
        return Ok(path.to_string());
    }

    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if path.contains('?') { '&' } else { '?' };
    Ok(format!("{path}{separator}{query}"))
}

/// Flatten `options` into ordered key/value pairs, skipping empty fields.
///
/// # Errors
/// Returns [`PagerDutyError::QueryEncoding`] for non-object or nested input.
pub fn to_pairs<T>(options: &T) -> Result<Vec<(String, String)>>
where
    T: Serialize + ?Sized,
{
    let value =
        serde_json::to_value(options).map_err(|e| PagerDutyError::QueryEncoding(e.to_string()))?;

    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(PagerDutyError::QueryEncoding(format!(
                "options must be an object, got {}",
                kind(&other)
            )))
        }
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        if let Some(s) = scalar(&key, value)? {
            pairs.push((key, s));
        }
    }

    Ok(pairs)
}

fn scalar(key: &str, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(PagerDutyError::QueryEncoding(format!(
            "field `{key}` is {}, expected a scalar",
            kind(&other)
        ))),
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
