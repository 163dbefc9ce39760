//! Shared application state for all routes.

use crate::error::AppError;
use crate::sandbox::SandboxStore;
use crate::settings::Settings;
use crate::store;
use sqlx::sqlite::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// Opened on the first sandbox request, not at startup.
    pub sandbox: Arc<SandboxStore>,
    /// Outbound client for the fetch endpoint. Follows redirects, no host restrictions.
    pub http: reqwest::Client,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(pool: SqlitePool, settings: Settings) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(settings.fetch_timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("http client: {}", e)))?;
        Ok(Self {
            pool,
            sandbox: Arc::new(SandboxStore::new(settings.sandbox_path.clone())),
            http,
            settings: Arc::new(settings),
        })
    }

    /// Connect to the primary store and create its tables.
    pub async fn connect(settings: Settings) -> Result<Self, AppError> {
        let pool = store::connect(&settings.database_url).await?;
        store::ensure_tables(&pool).await?;
        Self::new(pool, settings)
    }
}
