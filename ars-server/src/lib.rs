//! ARS Server - back office for a vocational school
//!
//! Tracks students, course enrollments, payments, expenses and inventory,
//! and serves the fee / due-balance figures the dashboard shows.
//!
//! ```text
//! ars-server/src/
//! ├── core/      # configuration, state, server
//! ├── api/       # HTTP routes and handlers
//! ├── db/        # SQLite pool and repositories
//! ├── billing/   # fee and payment aggregation
//! ├── cache/     # query cache with optimistic updates
//! ├── stock.rs   # inventory filters and counters
//! └── utils/     # logging, validation, dates
//! ```

pub mod api;
pub mod billing;
pub mod cache;
pub mod core;
pub mod db;
pub mod stock;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load `.env`, make sure the working directory exists, start logging
pub fn setup_environment() -> Result<Config, Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(
        Some(&config.log_level),
        Some(config.is_production()),
        config.log_dir.as_deref(),
    );
    Ok(config)
}
