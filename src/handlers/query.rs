//! Arbitrary statement execution against the sandbox store.

use crate::error::AppError;
use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QueryRequest {
    pub query: String,
}

/// POST /api/db/vulnerable-query/
pub async fn execute(
    State(state): State<AppState>,
    Json(body): Json<QueryRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if body.query.trim().is_empty() {
        return Err(AppError::BadRequest("No query provided".into()));
    }
    let outcome = state.sandbox.execute(&body.query).await?;
    Ok(ok(outcome))
}
