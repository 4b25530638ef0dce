//! Shared types for the ARS school office
//!
//! Common types used by the server and its API consumers: data models,
//! the unified error system and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
