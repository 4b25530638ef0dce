//! Report API Handlers
//!
//! Reports read straight from the database; they are not cached.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::billing;
use crate::core::ServerState;
use crate::db::repository::{expense, payment};
use crate::utils::AppResult;
use crate::utils::time::parse_date_range;
use shared::models::{FinanceSummary, PaymentReport};

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start_date: String,
    pub end_date: String,
}

/// GET /api/reports/payments?start_date=&end_date= - inclusive range
pub async fn payments(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<PaymentReport>> {
    let (start, end) = parse_date_range(&query.start_date, &query.end_date)?;
    let start = start.format("%Y-%m-%d").to_string();
    let end = end.format("%Y-%m-%d").to_string();

    let payments = payment::find_in_range(&state.pool, &start, &end).await?;
    let report = billing::payment_report(&start, &end, payments);

    tracing::debug!(
        %start,
        %end,
        transactions = report.total_transactions,
        total = report.total_received,
        "Payment report generated"
    );
    Ok(Json(report))
}

/// GET /api/reports/finance - live payments against all expenses
pub async fn finance(State(state): State<ServerState>) -> AppResult<Json<FinanceSummary>> {
    let income: Vec<f64> = payment::find_amounts(&state.pool)
        .await?
        .into_iter()
        .map(|p| p.amount)
        .collect();
    let expenses = expense::find_amounts(&state.pool).await?;
    Ok(Json(billing::finance_summary(&income, &expenses)))
}
