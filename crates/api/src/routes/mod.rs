pub mod admin;
pub mod auth;
pub mod bills;
pub mod complaints;
pub mod health;
pub mod kiosks;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                   WebSocket (utility status feed)
///
/// /auth/send-otp                        issue citizen OTP (public)
/// /auth/verify-otp                      verify OTP, citizen token (public)
/// /auth/me                              caller identity (any token)
///
/// /complaints                           list, register (optional token)
/// /complaints/{id}                      detail, citizen patch
///
/// /admin/auth/login                     staff login (public)
/// /admin/complaints                     list (staff)
/// /admin/complaints/{id}                detail (staff)
/// /admin/complaints/{id}/update         status / assignment / comment (PUT)
/// /admin/dashboard/stats                aggregates (staff)
/// /admin/officers                       officer directory (staff)
///
/// /bills                                citizen's bills (citizen)
/// /bills/{id}/pay                       pay a bill (citizen, POST)
///
/// /kiosks                               kiosk directory (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/auth", auth::router())
        .nest("/complaints", complaints::router())
        .nest("/admin", admin::router())
        .nest("/bills", bills::router())
        .nest("/kiosks", kiosks::router())
}
