//! Route definitions for the `/bills` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bills;
use crate::state::AppState;

/// Routes mounted at `/bills` (citizen token required).
///
/// ```text
/// GET  /           -> list_bills
/// POST /{id}/pay   -> pay_bill
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bills::list_bills))
        .route("/{id}/pay", post(bills::pay_bill))
}
