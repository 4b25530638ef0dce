//! Fee and payment aggregation
//!
//! Pure functions over rows already loaded from the repositories:
//!
//! - [`fees`] - per-student fee summary, payment overview and status counters
//! - [`totals`] - payment list totals, daily income, reports
//! - [`money`] - `f64` ⇄ `Decimal` conversion (2 dp, half-up)

pub mod fees;
pub mod money;
pub mod totals;

pub use fees::{PaymentAmount, build_students, fee_summary, payment_overview, payment_stats};
pub use totals::{daily_income, finance_summary, payment_report, payment_totals};
