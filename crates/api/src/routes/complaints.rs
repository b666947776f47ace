//! Route definitions for the `/complaints` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::complaints;
use crate::state::AppState;

/// Routes mounted at `/complaints`.
///
/// ```text
/// GET   /      -> list_complaints
/// POST  /      -> create_complaint
/// GET   /{id}  -> get_complaint
/// PATCH /{id}  -> patch_complaint
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(complaints::list_complaints).post(complaints::create_complaint),
        )
        .route(
            "/{id}",
            get(complaints::get_complaint).patch(complaints::patch_complaint),
        )
}
