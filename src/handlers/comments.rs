//! Course comments. Content is stored and returned byte-for-byte.

use crate::error::AppError;
use crate::handlers::lenient_i64;
use crate::models::CommentView;
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddCommentRequest {
    pub course_id: Option<Value>,
    pub user_id: Option<Value>,
    pub content: Option<String>,
}

/// POST /api/comments/add/ — a missing course surfaces as the engine's constraint error.
pub async fn add(
    State(state): State<AppState>,
    Json(body): Json<AddCommentRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course_id = body.course_id.as_ref().and_then(lenient_i64);
    let user_id = body.user_id.as_ref().map_or(Some(1), lenient_i64);
    let content = body.content.unwrap_or_default();

    let (id,): (i64,) =
        sqlx::query_as("INSERT INTO api_comment (course_id, user_id, content) VALUES (?, ?, ?) RETURNING id")
            .bind(course_id)
            .bind(user_id)
            .bind(&content)
            .fetch_one(&state.pool)
            .await?;
    Ok(created(json!({ "id": id, "content": content })))
}

/// GET /api/comments/:course_id/
pub async fn list(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let comments: Vec<CommentView> = sqlx::query_as(
        "SELECT c.id, u.username AS user, c.content FROM api_comment c \
         JOIN users u ON u.id = c.user_id WHERE c.course_id = ? ORDER BY c.id",
    )
    .bind(course_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(ok(json!({ "comments": comments })))
}
