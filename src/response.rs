//! Response helpers. Bodies are plain JSON objects, no envelope.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{json, Value};

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}

/// `{"message": ...}` with 200.
pub fn message(text: &str) -> (StatusCode, Json<Value>) {
    ok(json!({ "message": text }))
}
