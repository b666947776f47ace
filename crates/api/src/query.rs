//! Shared query parameter types for API handlers.

use serde::Deserialize;
use suvidha_db::models::complaint::ComplaintFilter;

/// Query parameters for complaint listings
/// (`?status=&category=&priority=&limit=&offset=`).
///
/// Blank values are treated as absent so `?status=` lists everything.
#[derive(Debug, Default, Deserialize)]
pub struct ComplaintListParams {
    pub status: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ComplaintListParams {
    /// Convert into a store filter, optionally scoped to one citizen.
    pub fn into_filter(self, citizen_id: Option<String>) -> ComplaintFilter {
        ComplaintFilter {
            status: non_blank(self.status),
            category: non_blank(self.category),
            priority: non_blank(self.priority),
            citizen_id,
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}
