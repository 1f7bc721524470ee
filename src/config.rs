//! Runtime configuration from environment variables.

/// Server and store settings. Every value has a development default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file (`DATABASE_PATH`).
    pub database_path: String,
    /// Listen address (`BIND_ADDR`).
    pub bind_addr: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "data/users.db".into()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
        }
    }
}
