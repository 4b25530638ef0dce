//! Student API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

/// Cache resource name
pub const RESOURCE: &str = "students";

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/students", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/overview", get(handler::overview))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
