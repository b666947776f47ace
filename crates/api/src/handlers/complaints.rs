//! Handlers for the citizen-facing `/complaints` resource.
//!
//! Registration, listing, detail and the citizen patch (message or reopen).
//! Every write lands in the Mock Store first and is mirrored to the database
//! best-effort by [`suvidha_db::store::Datastore`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use suvidha_core::complaint::{
    normalize_category, normalize_priority, registration_message, DEFAULT_ADDRESS,
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, MIN_DESCRIPTION_LENGTH,
};
use suvidha_core::error::CoreError;
use suvidha_core::roles::ROLE_CITIZEN;
use suvidha_db::models::complaint::{
    Actor, Complaint, ComplaintChange, ComplaintPage, NewComplaint,
};
use validator::{Validate, ValidationError};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::query::ComplaintListParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// The only `action` accepted by the citizen patch.
const ACTION_REOPEN: &str = "reopen";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Nested `location` object accepted on registration.
#[derive(Debug, Default, Deserialize)]
pub struct LocationInput {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub address: Option<String>,
}

/// Request body for `POST /api/complaints`.
///
/// Accepts `type` or `category`, and either a nested `location` or flat
/// `latitude`/`longitude`/`address` fields.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateComplaintRequest {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_description"))]
    pub description: String,
    pub priority: Option<String>,
    pub location: Option<LocationInput>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub address: Option<String>,
}

/// Request body for `PATCH /api/complaints/{id}`.
#[derive(Debug, Deserialize)]
pub struct PatchComplaintRequest {
    pub action: Option<String>,
    pub message: Option<String>,
}

fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().chars().count() as u64 >= MIN_DESCRIPTION_LENGTH {
        Ok(())
    } else {
        let mut err = ValidationError::new("length");
        err.message = Some(
            format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters").into(),
        );
        Err(err)
    }
}

impl CreateComplaintRequest {
    /// Normalize into a [`NewComplaint`], applying the city-centre defaults.
    fn into_new_complaint(self, citizen_id: Option<String>) -> AppResult<NewComplaint> {
        let priority = normalize_priority(self.priority.as_deref())?;
        let category = normalize_category(self.category.as_deref(), self.kind.as_deref());
        let location = self.location.unwrap_or_default();
        let latitude = location.lat.or(self.latitude).unwrap_or(DEFAULT_LATITUDE);
        let longitude = location.lng.or(self.longitude).unwrap_or(DEFAULT_LONGITUDE);
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::Validation("Latitude must be between -90 and 90".into()).into());
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(
                CoreError::Validation("Longitude must be between -180 and 180".into()).into(),
            );
        }

        let address = location
            .address
            .or(self.address)
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDRESS.to_string());

        Ok(NewComplaint {
            citizen_id,
            category,
            description: self.description.trim().to_string(),
            priority: priority.to_string(),
            latitude,
            longitude,
            address,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/complaints
///
/// Register a complaint. A citizen token, when present, sets the owner.
pub async fn create_complaint(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    AppJson(input): AppJson<CreateComplaintRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse<Complaint>>)> {
    input.validate()?;

    let citizen_id = user.filter(AuthUser::is_citizen).map(|u| u.subject);
    let new_complaint = input.into_new_complaint(citizen_id)?;
    let complaint = state
        .data
        .register_complaint(new_complaint, Utc::now())
        .await?;

    tracing::info!(
        complaint_id = %complaint.id,
        category = %complaint.category,
        priority = %complaint.priority,
        "Complaint registered"
    );

    let message = registration_message(&complaint.priority);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            data: complaint,
            message,
        }),
    ))
}

/// GET /api/complaints
///
/// Citizens see only their own complaints; anonymous callers and staff see
/// all of them. The summary always counts every status.
pub async fn list_complaints(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(params): Query<ComplaintListParams>,
) -> AppResult<Json<DataResponse<ComplaintPage>>> {
    let scope = user.filter(AuthUser::is_citizen).map(|u| u.subject);
    let page = state.data.list_complaints(&params.into_filter(scope)).await?;
    Ok(Json(DataResponse { data: page }))
}

/// GET /api/complaints/{id}
pub async fn get_complaint(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Complaint>>> {
    let complaint = load_complaint(&state, &id).await?;
    ensure_visible(user.as_ref(), &complaint)?;
    Ok(Json(DataResponse { data: complaint }))
}

/// PATCH /api/complaints/{id}
///
/// Add a message to the timeline and/or reopen a resolved or closed
/// complaint.
pub async fn patch_complaint(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
    AppJson(input): AppJson<PatchComplaintRequest>,
) -> AppResult<Json<MessageResponse<Complaint>>> {
    let reopen = match input.action.as_deref().map(str::trim) {
        None | Some("") => false,
        Some(ACTION_REOPEN) => true,
        Some(other) => {
            return Err(CoreError::Validation(format!(
                "Unknown action '{other}'. Only '{ACTION_REOPEN}' is supported"
            ))
            .into())
        }
    };

    let current = load_complaint(&state, &id).await?;
    ensure_visible(user.as_ref(), &current)?;

    let actor = match &user {
        Some(u) => Actor {
            id: Some(u.subject.clone()),
            role: u.role.clone(),
        },
        None => Actor {
            id: current.citizen_id.clone(),
            role: ROLE_CITIZEN.to_string(),
        },
    };

    let change =
        ComplaintChange::citizen_patch(&current, reopen, input.message.as_deref(), &actor, Utc::now())?;
    let updated = state
        .data
        .apply_complaint_change(&id, &change)
        .await?
        .ok_or_else(|| CoreError::not_found("Complaint", &id))?;

    tracing::info!(complaint_id = %id, reopen, status = %updated.status, "Complaint patched");

    let message = if reopen {
        "Complaint reopened"
    } else {
        "Message added to complaint"
    };
    Ok(Json(MessageResponse {
        data: updated,
        message: message.to_string(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Find a complaint in either store or fail with 404.
pub(crate) async fn load_complaint(state: &AppState, id: &str) -> AppResult<Complaint> {
    Ok(state
        .data
        .find_complaint(id)
        .await?
        .ok_or_else(|| CoreError::not_found("Complaint", id))?)
}

/// A citizen token may only touch complaints it owns. Anonymous callers and
/// staff are not restricted.
fn ensure_visible(user: Option<&AuthUser>, complaint: &Complaint) -> AppResult<()> {
    match user {
        Some(u) if u.is_citizen() && complaint.citizen_id.as_deref() != Some(u.subject.as_str()) => {
            Err(CoreError::Forbidden("Complaint belongs to another citizen".into()).into())
        }
        _ => Ok(()),
    }
}
