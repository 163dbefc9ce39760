//! Runtime settings read from the environment (optionally seeded from `.env`).

use crate::error::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://db.sqlite3";
pub const DEFAULT_SANDBOX_PATH: &str = "vulnerable_db.sqlite3";

#[derive(Clone, Debug)]
pub struct Settings {
    /// Primary store, e.g. `sqlite://db.sqlite3`.
    pub database_url: String,
    /// File backing the query sandbox. Created on first sandbox request when absent.
    pub sandbox_path: PathBuf,
    /// Directory uploads are written to.
    pub media_root: PathBuf,
    /// Public URL prefix for files under `media_root`. Always ends with `/`.
    pub media_url: String,
    pub bind_addr: String,
    pub fetch_timeout: Duration,
    /// Characters of a fetched body returned to the caller.
    pub fetch_body_limit: usize,
    pub upload_limit_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.into(),
            sandbox_path: PathBuf::from(DEFAULT_SANDBOX_PATH),
            media_root: PathBuf::from("media"),
            media_url: "/media/".into(),
            bind_addr: "0.0.0.0:8000".into(),
            fetch_timeout: Duration::from_secs(5),
            fetch_body_limit: 2000,
            upload_limit_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Settings {
    /// Reads `DATABASE_URL`, `SANDBOX_DATABASE_PATH`, `MEDIA_ROOT`, `MEDIA_URL`, `BIND_ADDR`,
    /// `FETCH_TIMEOUT_SECS`, `FETCH_BODY_LIMIT` and `UPLOAD_LIMIT_BYTES`; unset vars keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let media_url = lookup("MEDIA_URL").unwrap_or(defaults.media_url);
        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            sandbox_path: lookup("SANDBOX_DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.sandbox_path),
            media_root: lookup("MEDIA_ROOT").map(PathBuf::from).unwrap_or(defaults.media_root),
            media_url: normalize_media_url(&media_url),
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            fetch_timeout: parse_var(&lookup, "FETCH_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            fetch_body_limit: parse_var(&lookup, "FETCH_BODY_LIMIT")?.unwrap_or(defaults.fetch_body_limit),
            upload_limit_bytes: parse_var(&lookup, "UPLOAD_LIMIT_BYTES")?
                .unwrap_or(defaults.upload_limit_bytes),
        })
    }

    /// Route prefix the media directory is mounted under (`/media` for `/media/`).
    pub fn media_mount(&self) -> &str {
        let trimmed = self.media_url.trim_end_matches('/');
        if trimmed.is_empty() {
            "/media"
        } else {
            trimmed
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { var, value }),
    }
}

fn normalize_media_url(url: &str) -> String {
    let mut out = String::new();
    if !url.starts_with('/') {
        out.push('/');
    }
    out.push_str(url);
    if !out.ends_with('/') {
        out.push('/');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let s = Settings::from_lookup(|_| None).unwrap();
        assert_eq!(s.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(s.sandbox_path, PathBuf::from(DEFAULT_SANDBOX_PATH));
        assert_eq!(s.fetch_timeout, Duration::from_secs(5));
        assert_eq!(s.fetch_body_limit, 2000);
        assert_eq!(s.media_mount(), "/media");
    }

    #[test]
    fn overrides_are_applied() {
        let s = Settings::from_lookup(lookup_from(&[
            ("FETCH_TIMEOUT_SECS", "2"),
            ("MEDIA_URL", "uploads"),
            ("BIND_ADDR", "127.0.0.1:9000"),
        ]))
        .unwrap();
        assert_eq!(s.fetch_timeout, Duration::from_secs(2));
        assert_eq!(s.media_url, "/uploads/");
        assert_eq!(s.media_mount(), "/uploads");
        assert_eq!(s.bind_addr, "127.0.0.1:9000");
    }

    #[test]
    fn bad_number_is_reported() {
        let err = Settings::from_lookup(lookup_from(&[("FETCH_BODY_LIMIT", "lots")])).unwrap_err();
        assert!(err.to_string().contains("FETCH_BODY_LIMIT"));
    }
}
