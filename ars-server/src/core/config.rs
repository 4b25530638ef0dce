use std::path::PathBuf;

use shared::models::DEFAULT_RESTOCK_THRESHOLD;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | DATABASE_PATH | `<WORK_DIR>/ars.db` | SQLite database file |
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | runtime environment |
/// | LOG_LEVEL | info | default log level |
/// | LOG_DIR | (unset) | daily rolling log files when set |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout |
/// | RESTOCK_THRESHOLD | 5 | stock count below which items need restocking |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/ars HTTP_PORT=8080 cargo run -p ars-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// SQLite database file
    pub database_path: String,
    /// HTTP API port
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Items with fewer units than this are flagged for restocking
    pub restock_threshold: i64,
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| default_database_path(&work_dir));

        Self {
            database_path,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            restock_threshold: std::env::var("RESTOCK_THRESHOLD")
                .ok()
                .and_then(|p| p.parse().ok())
                .filter(|t: &i64| *t > 0)
                .unwrap_or(DEFAULT_RESTOCK_THRESHOLD),
            work_dir,
        }
    }

    /// Override the working directory and database location
    ///
    /// Mostly used by tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.database_path = default_database_path(&config.work_dir);
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_database_path(work_dir: &str) -> String {
    PathBuf::from(work_dir)
        .join("ars.db")
        .to_string_lossy()
        .into_owned()
}
