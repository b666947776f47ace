//! Route definitions for the `/admin` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, auth, dashboard};
use crate::state::AppState;

/// Routes mounted at `/admin`. Everything except `/auth/login` requires a
/// staff token.
///
/// ```text
/// POST /auth/login               -> admin_login
/// GET  /complaints               -> list_complaints
/// GET  /complaints/{id}          -> get_complaint
/// PUT  /complaints/{id}/update   -> update_complaint
/// GET  /dashboard/stats          -> get_stats
/// GET  /officers                 -> list_officers
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::admin_login))
        .route("/complaints", get(admin::list_complaints))
        .route("/complaints/{id}", get(admin::get_complaint))
        .route("/complaints/{id}/update", put(admin::update_complaint))
        .route("/dashboard/stats", get(dashboard::get_stats))
        .route("/officers", get(admin::list_officers))
}
