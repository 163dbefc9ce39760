//! HTTP handlers, one per endpoint.

pub mod assignments;
pub mod auth;
pub mod comments;
pub mod courses;
pub mod enrollments;
pub mod fetch;
pub mod query;
pub mod users;

use serde_json::Value;

/// Integer id from a JSON number or a numeric string (form posts and route params arrive as strings).
pub(crate) fn lenient_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn lenient_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
