//! Enrollments: enroll any user in any course, list any user's enrollments.

use crate::error::{raw_message, AppError};
use crate::handlers::lenient_i64;
use crate::models::{Enrollment, EnrollmentView};
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
pub struct EnrollRequest {
    pub user_id: Option<Value>,
    pub course_id: Option<Value>,
}

/// POST /api/enrollments/ — also bumps the course's `students_count`.
pub async fn enroll(
    State(state): State<AppState>,
    Json(body): Json<EnrollRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let user_id = body.user_id.as_ref().and_then(lenient_i64);
    let course_id = body.course_id.as_ref().and_then(lenient_i64);

    let mut tx = state.pool.begin().await?;
    let enrollment: Enrollment =
        sqlx::query_as("INSERT INTO api_enrollment (user_id, course_id) VALUES (?, ?) RETURNING *")
            .bind(user_id)
            .bind(course_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
                    AppError::BadRequest(raw_message(&e))
                }
                _ => AppError::Db(e),
            })?;
    sqlx::query("UPDATE api_course SET students_count = students_count + 1 WHERE id = ?")
        .bind(enrollment.course_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;
    tracing::info!(user_id = enrollment.user_id, course_id = enrollment.course_id, "enrolled");
    Ok(created(enrollment))
}

/// GET /api/enrollments/:user_id/
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let enrollments: Vec<EnrollmentView> = sqlx::query_as(
        "SELECT e.id, e.course_id, c.title AS course_title, e.progress, e.enrolled_at \
         FROM api_enrollment e JOIN api_course c ON c.id = e.course_id \
         WHERE e.user_id = ? ORDER BY e.id",
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;
    Ok(ok(json!({ "enrollments": enrollments })))
}
