//! Role extractors for the three audiences of the API.
//!
//! A missing or invalid token is 401; a valid token with the wrong role is
//! 403.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use suvidha_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticate the caller, then check `allowed` against their role.
async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(&AuthUser) -> bool,
    denial: &str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(&user) {
        Ok(user)
    } else {
        tracing::debug!(subject = %user.subject, role = %user.role, "Role check failed");
        Err(CoreError::Forbidden(denial.to_string()).into())
    }
}

/// Municipal staff: `admin` or `officer`.
///
/// ```ignore
/// async fn officers(RequireStaff(staff): RequireStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        authorize(parts, state, AuthUser::is_staff, "Staff role required")
            .await
            .map(RequireStaff)
    }
}

/// A logged-in citizen. Bills are only reachable this way.
pub struct RequireCitizen(pub AuthUser);

impl FromRequestParts<AppState> for RequireCitizen {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        authorize(parts, state, AuthUser::is_citizen, "Citizen role required")
            .await
            .map(RequireCitizen)
    }
}

/// Any valid token, whatever the role.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        authorize(parts, state, |_| true, "").await.map(RequireAuth)
    }
}
