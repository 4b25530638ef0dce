//! Payment API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Cache resource name
pub const RESOURCE: &str = "payments";

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/payments", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/totals", get(handler::totals))
        .route("/income", get(handler::income))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
