//! Data models
//!
//! Shared between the server and the dashboard (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflake ids; money fields are `f64` on the wire.

pub mod course;
pub mod enrollment;
pub mod expense;
pub mod finance;
pub mod inventory;
pub mod payment;
pub mod report;
pub mod student;

// Re-exports
pub use course::*;
pub use enrollment::*;
pub use expense::*;
pub use finance::*;
pub use inventory::*;
pub use payment::*;
pub use report::*;
pub use student::*;
