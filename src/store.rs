//! Storage gateway: owns the SQLite pool, applies schema, and exposes
//! parameterized execute / fetch primitives.

use crate::error::ApiError;
use crate::sql::params::BindValue;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::path::Path;

const CREATE_USERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    email VARCHAR(100) NOT NULL UNIQUE,
    phone VARCHAR(20),
    country VARCHAR(50),
    created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
)
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
    "CREATE INDEX IF NOT EXISTS idx_users_country ON users(country)",
    "CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at)",
];

/// Outcome of a write statement.
pub struct Exec {
    pub last_insert_id: i64,
    pub rows_affected: u64,
}

/// Shared handle to the relational store. Cloning shares the pool.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open (creating the file and its parent directory if missing) and
    /// apply schema. The pool is small and shared process-wide.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| ApiError::Db(sqlx::Error::Io(e)))?;
            }
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let store = Store { pool };
        store.ensure_schema().await?;
        tracing::info!(path = %path.display(), "sqlite store ready");
        Ok(store)
    }

    /// In-memory store for tests. A single pooled connection: every new
    /// in-memory connection would otherwise be a fresh empty database.
    pub async fn open_in_memory() -> Result<Self, ApiError> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        let store = Store { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Users table plus the email, country, and created_at indexes.
    async fn ensure_schema(&self) -> Result<(), ApiError> {
        sqlx::query(CREATE_USERS_TABLE).execute(&self.pool).await?;
        for ddl in CREATE_INDEXES {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Liveness probe for the readiness route.
    pub async fn ping(&self) -> bool {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await.is_ok()
    }

    /// INSERT / UPDATE / DELETE / DDL. Returns the last inserted rowid and
    /// the affected row count.
    pub async fn execute(&self, sql: &str, params: &[BindValue]) -> Result<Exec, ApiError> {
        tracing::debug!(sql = %sql, params = ?params, "execute");
        let mut query = sqlx::query(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        let result = query.execute(&self.pool).await?;
        Ok(Exec {
            last_insert_id: result.last_insert_rowid(),
            rows_affected: result.rows_affected(),
        })
    }

    /// At most one row, decoded into T.
    pub async fn fetch_one<T>(&self, sql: &str, params: &[BindValue]) -> Result<Option<T>, ApiError>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query_as::<_, T>(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    /// An ordered sequence of rows, decoded into T.
    pub async fn fetch_all<T>(&self, sql: &str, params: &[BindValue]) -> Result<Vec<T>, ApiError>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query_as::<_, T>(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Single integer result (COUNT queries).
    pub async fn fetch_scalar(&self, sql: &str, params: &[BindValue]) -> Result<i64, ApiError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let mut query = sqlx::query_scalar::<_, i64>(sql);
        for p in params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }
}
