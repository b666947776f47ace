//! Handler for the public kiosk directory.

use axum::extract::State;
use axum::Json;
use suvidha_db::models::kiosk::Kiosk;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/kiosks
pub async fn list_kiosks(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Kiosk>>>> {
    let kiosks = state.data.list_kiosks().await?;
    Ok(Json(DataResponse { data: kiosks }))
}
