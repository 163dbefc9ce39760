//! Assignment upload. Files land under `<media_root>/assignments/` under the client's file name
//! (cleaned of path parts and URL-hostile characters); extension, size and content are not checked.

use crate::error::AppError;
use crate::response::created;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::json;
use std::path::Path;

pub const UPLOAD_DIR: &str = "assignments";

/// Characters left as-is in media URLs.
const MEDIA_PATH: &AsciiSet = &NON_ALPHANUMERIC.remove(b'/').remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Final path component of a client-supplied name, spaces turned into `_` and anything
/// but word characters, `-` and `.` dropped. Empty when nothing usable remains.
fn stored_name(client_name: &str) -> String {
    let last = client_name.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = last
        .trim()
        .chars()
        .map(|c| if c == ' ' { '_' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
        .collect();
    Path::new(&cleaned)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn media_url(prefix: &str, relative: &str) -> String {
    format!("{}{}", prefix, utf8_percent_encode(relative, MEDIA_PATH))
}

/// POST /api/assignments/upload/ — multipart fields `file`, `title`, `course_id`, `user_id`.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut title = "Assignment".to_string();
    let mut course_id = "1".to_string();
    let mut user_id = "1".to_string();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or("") {
            "file" => {
                let name = field.file_name().map(stored_name).unwrap_or_default();
                let bytes = field.bytes().await?;
                file = Some((name, bytes.to_vec()));
            }
            "title" => title = field.text().await?,
            "course_id" => course_id = field.text().await?,
            "user_id" => user_id = field.text().await?,
            _ => {}
        }
    }

    let (name, bytes) = file.ok_or_else(|| AppError::BadRequest("No file".into()))?;
    let name = if name.is_empty() { "upload".to_string() } else { name };
    let dir = state.settings.media_root.join(UPLOAD_DIR);
    tokio::fs::create_dir_all(&dir).await?;
    tokio::fs::write(dir.join(&name), &bytes).await?;

    let relative = format!("{}/{}", UPLOAD_DIR, name);
    sqlx::query("INSERT INTO api_assignment (course_id, student_id, title, file) VALUES (?, ?, ?, ?)")
        .bind(course_id.trim())
        .bind(user_id.trim())
        .bind(&title)
        .bind(&relative)
        .execute(&state.pool)
        .await?;
    tracing::info!(file = %relative, size = bytes.len(), "assignment uploaded");

    Ok(created(json!({
        "message": "Uploaded",
        "filename": name,
        "url": media_url(&state.settings.media_url, &relative),
    })))
}
