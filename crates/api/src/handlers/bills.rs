//! Handlers for the citizen `/bills` resource.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use suvidha_core::billing::{receipt_number, validate_payable};
use suvidha_core::error::CoreError;
use suvidha_db::models::bill::Bill;

use crate::error::AppResult;
use crate::middleware::rbac::RequireCitizen;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/bills
///
/// The calling citizen's bills, latest due date first.
pub async fn list_bills(
    RequireCitizen(citizen): RequireCitizen,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Bill>>>> {
    let bills = state.data.list_bills(&citizen.subject).await?;
    Ok(Json(DataResponse { data: bills }))
}

/// POST /api/bills/{id}/pay
///
/// Mark a pending or overdue bill as paid and stamp a receipt number.
pub async fn pay_bill(
    RequireCitizen(citizen): RequireCitizen,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse<Bill>>> {
    let bill = state
        .data
        .find_bill(&id)
        .await?
        .ok_or_else(|| CoreError::not_found("Bill", &id))?;

    if bill.citizen_id != citizen.subject {
        return Err(CoreError::Forbidden("Bill belongs to another citizen".into()).into());
    }
    validate_payable(&bill.id, &bill.status)?;

    let paid_at = Utc::now();
    let receipt = receipt_number(&bill.id, paid_at);
    let paid = state
        .data
        .pay_bill(&bill.id, paid_at, &receipt)
        .await?
        .ok_or_else(|| CoreError::not_found("Bill", &id))?;

    tracing::info!(
        bill_id = %paid.id,
        citizen_id = %citizen.subject,
        amount_paise = paid.amount_paise,
        receipt = %receipt,
        "Bill paid"
    );

    Ok(Json(MessageResponse {
        data: paid,
        message: format!("Payment successful. Receipt number {receipt}"),
    }))
}
