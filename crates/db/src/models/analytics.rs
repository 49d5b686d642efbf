//! Admin aggregation projections.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Platform-wide counters for the admin analytics endpoint.
///
/// Computed on demand; `total_users` counts client accounts only and
/// `total_revenue` sums `total_cost` over completed calls.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlatformStats {
    pub total_users: i64,
    pub total_advocates: i64,
    pub pending_verifications: i64,
    pub total_calls: i64,
    pub total_revenue: Decimal,
}
