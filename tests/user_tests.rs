//! Account lookup, export and deletion without any caller identity.

mod common;

use common::spawn_app;
use edulearn::seed::DEMO_ACCOUNT_COUNT;
use reqwest::StatusCode;
use serde_json::json;
use std::collections::HashSet;

#[tokio::test]
async fn sequential_ids_return_distinct_pii() {
    let app = spawn_app().await;
    let mut ssns = HashSet::new();
    for id in 1..=3 {
        let (status, body) = app.get_json(&format!("/api/users/{}/", id)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], json!(id));
        assert!(body["phone"].is_string());
        assert!(body["credit_card"].is_string());
        ssns.insert(body["ssn"].as_str().unwrap().to_string());
    }
    assert_eq!(ssns.len(), 3);

    let (status, body) = app.get_json("/api/users/42/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("User not found"));
}

#[tokio::test]
async fn listing_users_needs_no_token() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/users/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"].as_array().unwrap().len(), DEMO_ACCOUNT_COUNT);
}

#[tokio::test]
async fn export_returns_every_account_with_hashes() {
    let app = spawn_app().await;
    let (status, body) = app.get_json("/api/users/export/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], json!(DEMO_ACCOUNT_COUNT));
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), DEMO_ACCOUNT_COUNT);
    for u in users {
        assert!(u["password"].as_str().unwrap().starts_with("sha256$"));
        assert!(u["ssn"].is_string());
    }
}

#[tokio::test]
async fn json_delete_removes_account() {
    let app = spawn_app().await;
    let (status, body) = app.post_json("/api/users/delete/", json!({ "user_id": 2 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("User deleted"));

    let (status, _) = app.get_json("/api/users/2/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cross_site_form_post_deletes_account() {
    let app = spawn_app().await;
    let resp = app
        .client
        .post(app.url("/api/users/delete/"))
        .header("content-type", "application/x-www-form-urlencoded")
        .header("origin", "http://evil.example")
        .body("user_id=3")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Courses owned by the deleted instructor go with them.
    let (_, courses) = app.get_json("/api/courses/").await;
    assert_eq!(courses.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn deleting_unknown_or_missing_id_is_404() {
    let app = spawn_app().await;
    let (status, _) = app.post_json("/api/users/delete/", json!({ "user_id": 99 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.post_json("/api/users/delete/", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
