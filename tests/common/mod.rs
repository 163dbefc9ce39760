//! Test harness: a seeded app on a random loopback port, backed by throwaway files.

#![allow(dead_code)]

use edulearn::{app, prepare_primary, AppState, Settings};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    pub state: AppState,
    pub sandbox_path: PathBuf,
    pub media_root: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn search_url(&self, q: &str) -> reqwest::Url {
        reqwest::Url::parse_with_params(&self.url("/api/courses/search/"), &[("q", q)]).unwrap()
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> (reqwest::StatusCode, serde_json::Value) {
        let resp = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        let status = resp.status();
        (status, resp.json().await.unwrap())
    }
}

/// Start the app with demo data seeded.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let sandbox_path = dir.path().join("vulnerable_db.sqlite3");
    let media_root = dir.path().join("media");
    let settings = Settings {
        database_url: format!("sqlite://{}", dir.path().join("db.sqlite3").display()),
        sandbox_path: sandbox_path.clone(),
        media_root: media_root.clone(),
        fetch_timeout: Duration::from_secs(2),
        ..Settings::default()
    };
    let state = AppState::connect(settings).await.unwrap();
    prepare_primary(&state.pool).await.unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = app(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
        state,
        sandbox_path,
        media_root,
        _dir: dir,
    }
}
