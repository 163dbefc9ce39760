//! Account endpoints: listing, profile lookup by id, bulk export and deletion. None check the caller.

use crate::error::AppError;
use crate::extractors::JsonOrForm;
use crate::handlers::lenient_i64;
use crate::models::{Account, AccountView, ExportRecord};
use crate::response::{message, ok};
use crate::state::AppState;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{json, Value};

async fn all_accounts(state: &AppState) -> Result<Vec<Account>, AppError> {
    let accounts = sqlx::query_as("SELECT * FROM users ORDER BY id")
        .fetch_all(&state.pool)
        .await?;
    Ok(accounts)
}

/// GET /api/users/
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let users: Vec<AccountView> = all_accounts(&state).await?.into_iter().map(AccountView::from).collect();
    Ok(ok(json!({ "users": users })))
}

/// GET /api/users/:user_id/ — any id, any caller.
pub async fn profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let account: Account = sqlx::query_as("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    Ok(ok(AccountView::from(account)))
}

/// GET /api/users/export/ — every account including its password hash.
pub async fn export(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let users: Vec<ExportRecord> = all_accounts(&state).await?.into_iter().map(ExportRecord::from).collect();
    tracing::info!("Exported {} users", users.len());
    Ok(ok(json!({ "count": users.len(), "users": users })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteAccountRequest {
    pub user_id: Option<Value>,
}

/// POST /api/users/delete/ — JSON or form body, no re-authentication and no CSRF token.
pub async fn delete(
    State(state): State<AppState>,
    JsonOrForm(body): JsonOrForm<DeleteAccountRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let not_found = || AppError::NotFound("User not found".into());
    let user_id = body.user_id.as_ref().and_then(lenient_i64).ok_or_else(not_found)?;
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found());
    }
    tracing::info!(user_id, "user deleted");
    Ok(message("User deleted"))
}
