//! Handlers for the staff-only `/admin` complaint and officer endpoints.
//!
//! The update path computes one [`ComplaintChange`] against the current
//! record and hands it to the datastore, which applies it to the Mock Store
//! unconditionally and then runs the relational transaction (status,
//! assignment, timeline row, audit row). A failed relational write is logged
//! and never reported to the caller.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use suvidha_core::error::CoreError;
use suvidha_db::models::complaint::{Actor, Complaint, ComplaintChange, ComplaintPage};
use suvidha_db::models::officer::Officer;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::handlers::complaints::load_complaint;
use crate::middleware::rbac::RequireStaff;
use crate::query::ComplaintListParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// Request body for `PUT /api/admin/complaints/{id}/update`.
#[derive(Debug, Deserialize)]
pub struct AdminUpdateRequest {
    pub status: Option<String>,
    pub comment: Option<String>,
    /// Officer id; an empty string clears the assignment.
    #[serde(rename = "assignedTo", alias = "assigned_to")]
    pub assigned_to: Option<String>,
}

/// GET /api/admin/complaints
pub async fn list_complaints(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ComplaintListParams>,
) -> AppResult<Json<DataResponse<ComplaintPage>>> {
    let page = state.data.list_complaints(&params.into_filter(None)).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/admin/complaints/{id}
pub async fn get_complaint(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let complaint = load_complaint(&state, &id).await?;
    Ok(Json(DataResponse { data: complaint }))
}

/// PUT /api/admin/complaints/{id}/update
///
/// Set status, assignment and/or add a comment. Any known status may be set;
/// assigning an officer to a `registered` complaint moves it to `assigned`.
pub async fn update_complaint(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<AdminUpdateRequest>,
) -> AppResult<Json<MessageResponse<Complaint>>> {
    let status = input.status.map(|s| s.trim().to_ascii_lowercase());
    let comment = input
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());
    let assigned_to = input.assigned_to.map(|a| a.trim().to_string());

    if let Some(officer_id) = assigned_to.as_deref().filter(|a| !a.is_empty()) {
        if state.data.find_officer(officer_id).await?.is_none() {
            return Err(CoreError::Validation(format!("Unknown officer '{officer_id}'")).into());
        }
    }

    let current = load_complaint(&state, &id).await?;
    let actor = Actor {
        id: Some(staff.subject.clone()),
        role: staff.role.clone(),
    };
    let change = ComplaintChange::admin_update(
        &current,
        status.as_deref(),
        assigned_to.as_deref(),
        comment.as_deref(),
        &actor,
        Utc::now(),
    )?;

    let updated = state
        .data
        .apply_complaint_change(&id, &change)
        .await?
        .ok_or_else(|| CoreError::not_found("Complaint", &id))?;

    tracing::info!(
        complaint_id = %id,
        actor = %staff.subject,
        from_status = %current.status,
        to_status = %updated.status,
        assigned_officer_id = ?updated.assigned_officer_id,
        "Complaint updated by staff"
    );

    Ok(Json(MessageResponse {
        data: updated,
        message: "Complaint updated successfully".to_string(),
    }))
}

/// GET /api/admin/officers
pub async fn list_officers(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Officer>>>> {
    let officers = state.data.list_officers().await?;
    Ok(Json(DataResponse { data: officers }))
}
