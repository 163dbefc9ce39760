//! Query sandbox endpoint and the primary-to-sandbox sync.

mod common;

use common::spawn_app;
use edulearn::{sync_sandbox, Flag};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn sandbox_file_is_created_on_first_query() {
    let app = spawn_app().await;
    assert!(!app.sandbox_path.exists());
    let (_, ready) = app.get_json("/ready").await;
    assert_eq!(ready["sandbox"], json!("lazy"));

    let (status, body) = app
        .post_json("/api/db/vulnerable-query/", json!({ "query": "SELECT title FROM api_course" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(app.sandbox_path.exists());
    assert_eq!(body["database"], json!("vulnerable_db.sqlite3"));
    assert_eq!(body["columns"], json!(["title"]));
    assert_eq!(body["count"], json!(4));
    assert!(body.get("flag").is_none());

    let (_, ready) = app.get_json("/ready").await;
    assert_eq!(ready["sandbox"], json!("open"));
}

#[tokio::test]
async fn sensitive_table_select_returns_rows_and_flag() {
    let app = spawn_app().await;
    let (status, body) = app
        .post_json("/api/db/vulnerable-query/", json!({ "query": "SELECT * FROM sensitive_data" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() > 0);
    assert_eq!(body["columns"], json!(["id", "data_type", "data_key", "data_value"]));
    assert!(body["rows"][0]["data_value"].is_string());
    assert_eq!(body["flag"], json!(Flag::SensitiveData.marker()));
}

#[tokio::test]
async fn role_update_to_admin_returns_escalation_flag() {
    let app = spawn_app().await;
    let (status, body) = app
        .post_json(
            "/api/db/vulnerable-query/",
            json!({ "query": "UPDATE users SET role = 'admin' WHERE username = 'john.doe'" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows_affected"], json!(1));
    assert_eq!(body["flag"], json!(Flag::PrivilegeEscalation.marker()));

    // Auto-committed.
    let (_, body) = app
        .post_json(
            "/api/db/vulnerable-query/",
            json!({ "query": "SELECT role FROM users WHERE username = 'john.doe'" }),
        )
        .await;
    assert_eq!(body["rows"][0]["role"], json!("admin"));

    // Primary store untouched.
    let (_, profile) = app.get_json("/api/users/2/").await;
    assert_eq!(profile["role"], json!("student"));
}

#[tokio::test]
async fn schema_statements_report_no_affected_rows() {
    let app = spawn_app().await;
    let (_, body) = app
        .post_json(
            "/api/db/vulnerable-query/",
            json!({ "query": "UPDATE api_course SET rating = 5 WHERE id = 1" }),
        )
        .await;
    assert_eq!(body["rows_affected"], json!(1));

    let (status, body) = app
        .post_json("/api/db/vulnerable-query/", json!({ "query": "CREATE TABLE notes (id INTEGER)" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows_affected"], json!(0));
    assert_eq!(body["message"], json!("Query executed successfully. 0 row(s) affected."));
}

#[tokio::test]
async fn wildcard_select_on_employees_carries_no_flag() {
    let app = spawn_app().await;
    let (status, body) = app
        .post_json("/api/db/vulnerable-query/", json!({ "query": "SELECT * FROM employees" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["count"].as_u64().unwrap() > 0);
    assert!(body.get("flag").is_none());
}

#[tokio::test]
async fn engine_errors_are_returned_verbatim() {
    let app = spawn_app().await;
    let (status, body) = app
        .post_json("/api/db/vulnerable-query/", json!({ "query": "SELECT * FROM no_such_table" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("no such table: no_such_table"));
    assert_eq!(body["query"], json!("SELECT * FROM no_such_table"));
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let app = spawn_app().await;
    let (status, body) = app.post_json("/api/db/vulnerable-query/", json!({ "query": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("No query provided"));
}

#[tokio::test]
async fn sync_copies_primary_rows_into_sandbox() {
    let app = spawn_app().await;
    app.post_json(
        "/api/auth/register/",
        json!({ "username": "trudy", "password": "pw", "email": "t@example.com" }),
    )
    .await;

    let report = sync_sandbox(&app.state.pool, &app.sandbox_path).await.unwrap();
    assert_eq!(report.users, 4);
    assert_eq!(report.courses, 4);

    let (status, body) = app
        .post_json(
            "/api/db/vulnerable-query/",
            json!({ "query": "SELECT username FROM users WHERE id = 4" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rows"][0]["username"], json!("trudy"));
}
