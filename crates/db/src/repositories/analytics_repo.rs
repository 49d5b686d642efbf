//! Read-only aggregation queries for the admin surface.

use sqlx::PgPool;

use crate::models::analytics::PlatformStats;

/// Provides on-demand platform counters.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Compute the admin dashboard counters in one round trip.
    pub async fn platform_stats(pool: &PgPool) -> Result<PlatformStats, sqlx::Error> {
        sqlx::query_as::<_, PlatformStats>(
            "SELECT
                (SELECT COUNT(*) FROM users WHERE role = 'client') AS total_users,
                (SELECT COUNT(*) FROM advocates) AS total_advocates,
                (SELECT COUNT(*) FROM advocates WHERE verification_status = 'pending')
                    AS pending_verifications,
                (SELECT COUNT(*) FROM calls) AS total_calls,
                (SELECT COALESCE(SUM(total_cost), 0) FROM calls WHERE status = 'completed')
                    AS total_revenue",
        )
        .fetch_one(pool)
        .await
    }
}
