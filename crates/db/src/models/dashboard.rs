//! Admin dashboard aggregate models.

use serde::Serialize;
use sqlx::FromRow;

use crate::models::complaint::ComplaintSummary;

/// A `(key, count)` aggregate row, e.g. complaints per category.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub count: i64,
}

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub complaints: ComplaintSummary,
    pub by_priority: Vec<KeyCount>,
    pub by_category: Vec<KeyCount>,
    /// Complaints whose `resolved_at` falls on the current UTC day.
    pub resolved_today: i64,
    pub total_citizens: i64,
    pub kiosks_online: i64,
    pub kiosks_total: i64,
    pub bills_pending: i64,
    pub amount_collected_paise: i64,
}

/// Tally `keys` into [`KeyCount`] rows ordered by descending count, then key.
pub fn tally<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<KeyCount> {
    let mut counts: std::collections::BTreeMap<&str, i64> = std::collections::BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_default() += 1;
    }
    let mut rows: Vec<KeyCount> = counts
        .into_iter()
        .map(|(key, count)| KeyCount {
            key: key.to_string(),
            count,
        })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_orders_by_count_then_key() {
        let rows = tally(["water", "electricity", "water", "roads", "electricity", "water"]);
        let keys: Vec<_> = rows.iter().map(|r| (r.key.as_str(), r.count)).collect();
        assert_eq!(keys, vec![("water", 3), ("electricity", 2), ("roads", 1)]);
    }
}
