//! Handlers for citizen OTP login, staff password login and `/auth/me`.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use suvidha_core::error::CoreError;
use suvidha_core::otp::OtpMatch;
use suvidha_core::roles::{ROLE_ADMIN, ROLE_CITIZEN};
use suvidha_core::validation::{validate_mobile, validate_otp_code};
use suvidha_db::models::citizen::Citizen;
use suvidha_db::models::officer::Officer;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/send-otp`.
#[derive(Debug, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,
}

/// Request body for `POST /api/auth/verify-otp`.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_mobile"))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "validate_otp_code"))]
    pub otp: String,
}

/// Request body for `POST /api/admin/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Payload of a successful `send-otp`.
#[derive(Debug, Serialize)]
pub struct OtpIssued {
    pub phone: String,
    /// Seconds until the code expires.
    pub expires_in: i64,
    /// The code itself, outside production only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

/// Successful login response for citizens and staff.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public identity embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Response for `GET /api/auth/me`.
#[derive(Debug, Serialize)]
pub struct Identity {
    pub id: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub citizen: Option<Citizen>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub officer: Option<Officer>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/send-otp
///
/// Issue a six-digit code for a mobile number. Only its digest is kept.
pub async fn send_otp(
    State(state): State<AppState>,
    AppJson(input): AppJson<SendOtpRequest>,
) -> AppResult<Json<MessageResponse<OtpIssued>>> {
    input.validate()?;

    let (code, expires_at) = state.otp.issue(&input.phone);
    tracing::info!(phone_suffix = %phone_suffix(&input.phone), %expires_at, "OTP issued");

    Ok(Json(MessageResponse {
        data: OtpIssued {
            phone: input.phone,
            expires_in: state.config.otp.ttl_secs,
            dev_otp: state.config.otp.expose_code.then_some(code),
        },
        message: "OTP sent successfully".to_string(),
    }))
}

/// POST /api/auth/verify-otp
///
/// Verify the code, register the citizen on first login and issue a
/// citizen token.
pub async fn verify_otp(
    State(state): State<AppState>,
    AppJson(input): AppJson<VerifyOtpRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    input.validate()?;

    if state.otp.verify(&input.phone, &input.otp)? == OtpMatch::Bypassed {
        tracing::warn!(phone_suffix = %phone_suffix(&input.phone), "OTP accepted via development bypass");
    }

    let citizen = state.data.citizen_login(&input.phone, Utc::now()).await?;
    let access_token = issue_token(&state, &citizen.id, ROLE_CITIZEN)?;

    tracing::info!(citizen_id = %citizen.id, "Citizen logged in");

    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token,
            token_type: "Bearer",
            expires_in: state.config.jwt.expires_in_secs(),
            user: UserInfo {
                id: citizen.id,
                name: citizen.name,
                role: ROLE_CITIZEN.to_string(),
                phone: Some(citizen.phone),
            },
        },
    }))
}

/// POST /api/admin/auth/login
///
/// Staff login against the configured admin account.
pub async fn admin_login(
    State(state): State<AppState>,
    AppJson(input): AppJson<AdminLoginRequest>,
) -> AppResult<Json<DataResponse<AuthResponse>>> {
    input.validate()?;

    let admin = &state.config.admin;
    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if input.username != admin.username || !password_valid {
        tracing::warn!(username = %input.username, "Rejected staff login");
        return Err(CoreError::Unauthorized("Invalid username or password".into()).into());
    }

    let name = state
        .data
        .find_officer(&admin.officer_id)
        .await?
        .map(|o| o.name)
        .unwrap_or_else(|| admin.username.clone());
    let access_token = issue_token(&state, &admin.officer_id, ROLE_ADMIN)?;

    tracing::info!(officer_id = %admin.officer_id, "Staff logged in");

    Ok(Json(DataResponse {
        data: AuthResponse {
            access_token,
            token_type: "Bearer",
            expires_in: state.config.jwt.expires_in_secs(),
            user: UserInfo {
                id: admin.officer_id.clone(),
                name,
                role: ROLE_ADMIN.to_string(),
                phone: None,
            },
        },
    }))
}

/// GET /api/auth/me
///
/// The caller's identity with the citizen profile or officer record.
pub async fn me(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Identity>>> {
    let (citizen, officer) = if user.is_citizen() {
        let citizen = state
            .data
            .find_citizen(&user.subject)
            .await?
            .ok_or_else(|| CoreError::not_found("Citizen", &user.subject))?;
        (Some(citizen), None)
    } else {
        (None, state.data.find_officer(&user.subject).await?)
    };

    Ok(Json(DataResponse {
        data: Identity {
            id: user.subject,
            role: user.role,
            citizen,
            officer,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn issue_token(state: &AppState, subject: &str, role: &str) -> AppResult<String> {
    generate_access_token(subject, role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))
}

/// Last four digits, for logs.
fn phone_suffix(phone: &str) -> &str {
    &phone[phone.len().saturating_sub(4)..]
}
