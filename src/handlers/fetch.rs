//! Server-side fetch of a caller-supplied URL. Any scheme reqwest accepts, any host.

use crate::error::AppError;
use crate::response::ok;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Map, Value};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FetchRequest {
    pub url: String,
}

/// POST /api/fetch/
pub async fn fetch_resource(
    State(state): State<AppState>,
    Json(body): Json<FetchRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    tracing::info!(url = %body.url, "outbound fetch");
    let response = state
        .http
        .get(&body.url)
        .send()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let status = response.status().as_u16();
    let mut headers = Map::new();
    for (name, value) in response.headers() {
        headers.insert(
            name.as_str().to_string(),
            Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
        );
    }
    let content = read_prefix(response, state.settings.fetch_body_limit).await?;

    Ok(ok(json!({
        "url": body.url,
        "status": status,
        "headers": headers,
        "content": content,
    })))
}

/// First `limit` characters of the body. Reading stops once that many have arrived.
async fn read_prefix(mut response: reqwest::Response, limit: usize) -> Result<String, AppError> {
    let mut buf: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| AppError::BadRequest(e.to_string()))? {
        buf.extend_from_slice(&chunk);
        if String::from_utf8_lossy(&buf).chars().count() >= limit {
            break;
        }
    }
    Ok(String::from_utf8_lossy(&buf).chars().take(limit).collect())
}
