//! Route definitions for the `/kiosks` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::kiosks;
use crate::state::AppState;

/// Routes mounted at `/kiosks`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(kiosks::list_kiosks))
}
