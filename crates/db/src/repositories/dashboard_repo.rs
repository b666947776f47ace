//! Aggregate queries backing the admin dashboard.

use sqlx::PgPool;
use suvidha_core::billing::{BILL_OVERDUE, BILL_PAID, BILL_PENDING};
use suvidha_core::types::Timestamp;

use crate::models::complaint::ComplaintSummary;
use crate::models::dashboard::{DashboardStats, KeyCount};
use crate::models::kiosk::KIOSK_ONLINE;
use crate::repositories::{CitizenRepo, ComplaintRepo};

/// Dashboard aggregates computed with SQL `COUNT`/`SUM`.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Compute every dashboard aggregate. `today_start` is the start of the
    /// current UTC day.
    pub async fn stats(pool: &PgPool, today_start: Timestamp) -> Result<DashboardStats, sqlx::Error> {
        let status_counts = ComplaintRepo::count_by_status(pool, None).await?;
        let complaints =
            ComplaintSummary::from_counts(status_counts.iter().map(|(s, c)| (s.as_str(), *c)));

        let by_priority = Self::group_count(pool, "priority").await?;
        let by_category = Self::group_count(pool, "category").await?;

        let resolved_today = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM complaints WHERE resolved_at >= $1",
        )
        .bind(today_start)
        .fetch_one(pool)
        .await?;

        let total_citizens = CitizenRepo::count(pool).await?;

        let (kiosks_online, kiosks_total) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*) FILTER (WHERE status = $1)::BIGINT, COUNT(*)::BIGINT FROM kiosks",
        )
        .bind(KIOSK_ONLINE)
        .fetch_one(pool)
        .await?;

        let (bills_pending, amount_collected_paise) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT \
                COUNT(*) FILTER (WHERE status IN ($1, $2))::BIGINT, \
                COALESCE(SUM(amount_paise) FILTER (WHERE status = $3), 0)::BIGINT \
             FROM bills",
        )
        .bind(BILL_PENDING)
        .bind(BILL_OVERDUE)
        .bind(BILL_PAID)
        .fetch_one(pool)
        .await?;

        Ok(DashboardStats {
            complaints,
            by_priority,
            by_category,
            resolved_today,
            total_citizens,
            kiosks_online,
            kiosks_total,
            bills_pending,
            amount_collected_paise,
        })
    }

    /// `column` is always a compile-time constant from this module.
    async fn group_count(pool: &PgPool, column: &'static str) -> Result<Vec<KeyCount>, sqlx::Error> {
        let query = format!(
            "SELECT {column} AS key, COUNT(*)::BIGINT AS count FROM complaints \
             GROUP BY {column} ORDER BY count DESC, key"
        );
        sqlx::query_as::<_, KeyCount>(&query).fetch_all(pool).await
    }
}
