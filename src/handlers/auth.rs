//! Login and registration.

use crate::error::{raw_message, AppError};
use crate::models::{Account, AccountView, Role};
use crate::password::make_password;
use crate::response::{created, ok};
use crate::sql::row::row_to_json;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login/ — credentials are spliced into the SQL text as-is.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let sql = format!(
        "SELECT * FROM users WHERE username='{}' AND password='{}'",
        body.username, body.password
    );
    tracing::debug!(sql = %sql, "login query");

    let row = sqlx::query(&sql).fetch_optional(&state.pool).await.map_err(|e| {
        let message = raw_message(&e);
        tracing::error!(error = %message, "login query failed");
        AppError::BadRequest(message)
    })?;
    let user = match row {
        Some(r) => row_to_json(&r),
        None => return Err(AppError::Unauthorized("Invalid credentials".into())),
    };
    let field = |name: &str| user.get(name).cloned().unwrap_or(Value::Null);

    Ok(ok(json!({
        "success": true,
        "token": format!("token-{}", body.username),
        "user": {
            "id": field("id"),
            "username": field("username"),
            "email": field("email"),
            "role": field("role"),
            "ssn": field("ssn"),
            "credit_card": field("credit_card"),
        }
    })))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

/// POST /api/auth/register/
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let username = body
        .username
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("The given username must be set".into()))?;
    let password = body.password.unwrap_or_default();
    let email = body.email.unwrap_or_default();

    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(&username)
        .fetch_one(&state.pool)
        .await?;
    if exists {
        return Err(AppError::BadRequest("Username exists".into()));
    }

    let account: Account = sqlx::query_as(
        "INSERT INTO users (username, password, email, role) VALUES (?, ?, ?, ?) RETURNING *",
    )
    .bind(&username)
    .bind(make_password(&password))
    .bind(&email)
    .bind(Role::Student.as_str())
    .fetch_one(&state.pool)
    .await?;
    tracing::info!(username = %username, password = %password, "new user");

    Ok(created(json!({
        "message": "User created",
        "user": AccountView::from(account),
    })))
}
