//! Handler for the admin dashboard aggregates.

use axum::extract::State;
use axum::Json;
use chrono::{NaiveTime, Utc};
use serde::Serialize;
use suvidha_db::models::dashboard::DashboardStats;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard payload: the aggregates plus which backend was consulted first.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub data_source: &'static str,
}

/// GET /api/admin/dashboard/stats
///
/// Database aggregates when reachable, otherwise a full scan of the Mock
/// Store. Never cached.
pub async fn get_stats(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let today_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let stats = state.data.dashboard_stats(today_start).await?;

    Ok(Json(DataResponse {
        data: DashboardResponse {
            stats,
            data_source: state.data.data_source().as_str(),
        },
    }))
}
