//! Report API
//!
//! | path | method | description |
//! |------|--------|-------------|
//! | /api/reports/payments?start_date=&end_date= | GET | payments received in a date range |
//! | /api/reports/finance | GET | income, expenses, profit |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/payments", get(handler::payments))
        .route("/finance", get(handler::finance))
}
