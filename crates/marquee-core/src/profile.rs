//! Profile record views and field-value coercion.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// A profile as stored: every field value is a string, whatever the caller
/// supplied. Field order is stable for deterministic responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub key: String,
    pub fields: BTreeMap<String, String>,
}

/// Hash key for a user profile.
pub fn profile_key(user_id: &str) -> String {
    format!("user:{user_id}")
}

/// Coerce a caller-supplied JSON scalar to its stored string form.
///
/// Booleans become `"true"`/`"false"`, numbers their decimal text, strings
/// pass through unchanged. Anything else falls back to its JSON text.
pub fn coerce_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "true".to_string(),
        Value::Bool(false) => "false".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
