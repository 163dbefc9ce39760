//! Course listing, detail, search and unguarded management.

use crate::error::AppError;
use crate::handlers::lenient_f64;
use crate::models::Course;
use crate::response::{message, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePool;

async fn find_course(pool: &SqlitePool, id: i64) -> Result<Option<Course>, AppError> {
    let course = sqlx::query_as("SELECT * FROM api_course WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(course)
}

/// GET /api/courses/
pub async fn list(State(state): State<AppState>) -> Result<impl axum::response::IntoResponse, AppError> {
    let courses: Vec<Course> = sqlx::query_as("SELECT * FROM api_course ORDER BY id")
        .fetch_all(&state.pool)
        .await?;
    Ok(ok(courses))
}

/// GET /api/courses/:course_id/
pub async fn read(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let course = find_course(&state.pool, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Not found".into()))?;
    Ok(ok(course))
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// GET /api/courses/search/?q= — the raw query is echoed back unescaped.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let results: Vec<Course> = sqlx::query_as(
        "SELECT * FROM api_course \
         WHERE instr(lower(title), lower(?1)) > 0 OR instr(lower(description), lower(?1)) > 0 \
         ORDER BY id",
    )
    .bind(&params.q)
    .fetch_all(&state.pool)
    .await?;
    Ok(ok(json!({
        "query": params.q,
        "results": results,
    })))
}

/// Fields a PUT may change. Absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub instructor: Option<String>,
    pub price: Option<Value>,
    pub rating: Option<Value>,
    pub duration: Option<String>,
    pub image_url: Option<String>,
}

fn decimal_field(value: Option<&Value>, current: f64) -> Result<f64, AppError> {
    match value {
        None | Some(Value::Null) => Ok(current),
        Some(v) => lenient_f64(v).ok_or_else(|| {
            let shown = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
            AppError::BadRequest(format!("'{}' value must be a decimal number.", shown))
        }),
    }
}

/// PUT /api/courses/:course_id/manage/ — no ownership or role check.
pub async fn update(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
    Json(body): Json<CourseUpdate>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let current = find_course(&state.pool, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".into()))?;
    let price = decimal_field(body.price.as_ref(), current.price)?;
    let rating = decimal_field(body.rating.as_ref(), current.rating)?;

    let course: Course = sqlx::query_as(
        "UPDATE api_course SET title = ?, description = ?, instructor = ?, price = ?, rating = ?, \
         duration = ?, image_url = ? WHERE id = ? RETURNING *",
    )
    .bind(body.title.unwrap_or(current.title))
    .bind(body.description.unwrap_or(current.description))
    .bind(body.instructor.unwrap_or(current.instructor))
    .bind(price)
    .bind(rating)
    .bind(body.duration.unwrap_or(current.duration))
    .bind(body.image_url.unwrap_or(current.image_url))
    .bind(course_id)
    .fetch_one(&state.pool)
    .await?;
    tracing::info!(course_id, "course updated");
    Ok(ok(json!({ "message": "Course updated", "course": course })))
}

/// DELETE /api/courses/:course_id/manage/ — no ownership or role check.
pub async fn delete(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let result = sqlx::query("DELETE FROM api_course WHERE id = ?")
        .bind(course_id)
        .execute(&state.pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Course not found".into()));
    }
    tracing::info!(course_id, "course deleted");
    Ok(message("Course deleted"))
}
