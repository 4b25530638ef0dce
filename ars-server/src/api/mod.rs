//! HTTP API
//!
//! - [`health`] - health check
//! - [`students`] - students and the payment overview
//! - [`courses`] - courses
//! - [`enrollments`] - student ↔ course enrollments
//! - [`payments`] - payments, totals and the income series
//! - [`expenses`] - expenses
//! - [`inventory`] - inventory items and stock
//! - [`reports`] - payment report and finance summary

pub mod courses;
pub mod enrollments;
pub mod expenses;
pub mod health;
pub mod inventory;
pub mod payments;
pub mod reports;
pub mod students;

use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(students::router())
        .merge(courses::router())
        .merge(enrollments::router())
        .merge(payments::router())
        .merge(expenses::router())
        .merge(inventory::router())
        .merge(reports::router())
}

/// Build the fully configured application (middleware + state)
///
/// Used by the HTTP server and by tests driving the router in-process
pub fn build_app(state: &ServerState) -> Router {
    build_router()
        // Timeout - give up on slow requests (408)
        .layer(TimeoutLayer::new(Duration::from_millis(
            state.config.request_timeout_ms,
        )))
        // CORS - the dashboard is served from another origin
        .layer(CorsLayer::permissive())
        // Trace - request logging (INFO)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone())
}
