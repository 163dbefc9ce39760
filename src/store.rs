//! SQLite connection setup and DDL for the primary tables.
//! The same tables are created inside the sandbox store so primary rows can be copied there.

use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Primary tables in dependency order (parents first).
pub const PRIMARY_TABLES: &[&str] = &["users", "api_course", "api_enrollment", "api_assignment", "api_comment"];

const USERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        password TEXT NOT NULL,
        last_login TEXT,
        is_superuser INTEGER NOT NULL DEFAULT 0,
        username TEXT NOT NULL UNIQUE,
        first_name TEXT NOT NULL DEFAULT '',
        last_name TEXT NOT NULL DEFAULT '',
        email TEXT NOT NULL DEFAULT '',
        is_staff INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        date_joined TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        ssn TEXT,
        credit_card TEXT,
        phone TEXT,
        role TEXT NOT NULL DEFAULT 'student'
    )
"#;

const COURSE_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS api_course (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        instructor TEXT NOT NULL,
        price REAL NOT NULL,
        rating REAL NOT NULL DEFAULT 4.5,
        students_count INTEGER NOT NULL DEFAULT 0,
        duration TEXT NOT NULL DEFAULT '30 hours',
        image_url TEXT NOT NULL DEFAULT '📚',
        owner_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const ENROLLMENT_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS api_enrollment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        course_id INTEGER NOT NULL REFERENCES api_course (id) ON DELETE CASCADE,
        enrolled_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        progress INTEGER NOT NULL DEFAULT 0,
        UNIQUE (user_id, course_id)
    )
"#;

const ASSIGNMENT_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS api_assignment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_id INTEGER NOT NULL REFERENCES api_course (id) ON DELETE CASCADE,
        student_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        file TEXT NOT NULL,
        submitted_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const COMMENT_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS api_comment (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        course_id INTEGER NOT NULL REFERENCES api_course (id) ON DELETE CASCADE,
        user_id INTEGER NOT NULL REFERENCES users (id) ON DELETE CASCADE,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Open a pool on a `sqlite://` URL, creating the file when missing. Foreign keys are enforced.
pub async fn connect(database_url: &str) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    open(opts).await
}

/// Open a pool on a database file path, creating it when missing.
pub async fn connect_file(path: &Path) -> Result<SqlitePool, AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    open(SqliteConnectOptions::new().filename(path)).await
}

async fn open(opts: SqliteConnectOptions) -> Result<SqlitePool, AppError> {
    let opts = opts.create_if_missing(true).foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;
    Ok(pool)
}

/// Create the primary tables if they do not exist.
pub async fn ensure_tables(pool: &SqlitePool) -> Result<(), AppError> {
    for ddl in [USERS_DDL, COURSE_DDL, ENROLLMENT_DDL, ASSIGNMENT_DDL, COMMENT_DDL] {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Row count per primary table, in `PRIMARY_TABLES` order.
pub async fn table_counts(pool: &SqlitePool) -> Result<Vec<(&'static str, i64)>, AppError> {
    let mut out = Vec::with_capacity(PRIMARY_TABLES.len());
    for table in PRIMARY_TABLES {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(pool)
            .await?;
        out.push((*table, n));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tables_are_created_idempotently() {
        let dir = tempfile::tempdir().unwrap();
        let pool = connect_file(&dir.path().join("nested/db.sqlite3")).await.unwrap();
        ensure_tables(&pool).await.unwrap();
        ensure_tables(&pool).await.unwrap();
        let counts = table_counts(&pool).await.unwrap();
        assert_eq!(counts.len(), PRIMARY_TABLES.len());
        assert!(counts.iter().all(|(_, n)| *n == 0));
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let pool = connect_file(&dir.path().join("db.sqlite3")).await.unwrap();
        ensure_tables(&pool).await.unwrap();
        let err = sqlx::query("INSERT INTO api_comment (course_id, user_id, content) VALUES (99, 99, 'x')")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(crate::error::raw_message(&err).contains("FOREIGN KEY"));
    }
}
