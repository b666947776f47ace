#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use suvidha_api::auth::jwt::{generate_access_token, JwtConfig};
use suvidha_api::config::{
    AdminCredentials, Environment, OtpConfig, RateLimitConfig, ServerConfig,
};
use suvidha_api::router::build_app_router;
use suvidha_api::state::AppState;
use suvidha_api::ws::WsManager;
use suvidha_core::roles::{ROLE_ADMIN, ROLE_CITIZEN, ROLE_OFFICER};
use suvidha_db::store::{Datastore, MockStore};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin@123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Development environment, OTP bypass on, no database and a rate limit
/// high enough that no test trips it by accident.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Development,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 60,
        },
        admin: AdminCredentials::new(ADMIN_USERNAME, ADMIN_PASSWORD),
        otp: OtpConfig {
            ttl_secs: 300,
            dev_bypass: true,
            expose_code: true,
        },
        rate_limit: RateLimitConfig {
            max_requests: 10_000,
            window_secs: 900,
        },
        utility_feed_interval_secs: 30,
    }
}

/// Build the full application router over a freshly seeded Mock Store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config())
}

/// Like [`build_test_app`] with a custom configuration.
pub fn build_test_app_with(config: ServerConfig) -> Router {
    let data = Datastore::mock_only(Arc::new(MockStore::seeded(Utc::now())));
    let state = AppState::new(config.clone(), data, Arc::new(WsManager::new()));
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn citizen_token(citizen_id: &str) -> String {
    generate_access_token(citizen_id, ROLE_CITIZEN, &test_config().jwt)
        .expect("token generation should succeed")
}

pub fn admin_token() -> String {
    generate_access_token("OFF-001", ROLE_ADMIN, &test_config().jwt)
        .expect("token generation should succeed")
}

pub fn officer_token(officer_id: &str) -> String {
    generate_access_token(officer_id, ROLE_OFFICER, &test_config().jwt)
        .expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// POST a body verbatim, for payloads that are not valid JSON.
pub async fn post_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, "GET", uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, "GET", uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "POST", uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "POST", uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "PUT", uri, Some(token), Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, "PATCH", uri, None, Some(body)).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, "PATCH", uri, Some(token), Some(body)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
