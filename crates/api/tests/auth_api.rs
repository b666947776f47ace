//! HTTP-level integration tests for citizen OTP login, staff login and
//! `/auth/me`.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, get, get_auth, post_json, ADMIN_PASSWORD, ADMIN_USERNAME};
use serde_json::json;

/// Request an OTP and return the development code from the response.
async fn request_otp(app: axum::Router, phone: &str) -> String {
    let response = post_json(app, "/api/auth/send-otp", json!({ "phone": phone })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["dev_otp"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Citizen OTP flow
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_otp_returns_code_outside_production() {
    let app = common::build_test_app();

    let response = post_json(app, "/api/auth/send-otp", json!({ "phone": "9123456789" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "OTP sent successfully");
    assert_eq!(json["data"]["phone"], "9123456789");
    assert_eq!(json["data"]["expires_in"], 300);
    let code = json["data"]["dev_otp"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn send_otp_hides_code_when_not_exposed() {
    let mut config = common::test_config();
    config.otp.expose_code = false;
    let app = common::build_test_app_with(config);

    let json = body_json(post_json(app, "/api/auth/send-otp", json!({ "phone": "9123456789" })).await).await;

    assert!(json["data"].get("dev_otp").is_none());
}

#[tokio::test]
async fn invalid_phone_is_rejected() {
    let app = common::build_test_app();

    for phone in ["12345", "5123456789", "98765432101", ""] {
        let response = post_json(app.clone(), "/api/auth/send-otp", json!({ "phone": phone })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "phone {phone:?}");
    }
}

#[tokio::test]
async fn verify_otp_registers_new_citizen() {
    let app = common::build_test_app();
    let phone = "9123456789";
    let otp = request_otp(app.clone(), phone).await;

    let response = post_json(
        app.clone(),
        "/api/auth/verify-otp",
        json!({ "phone": phone, "otp": otp }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let auth = &json["data"];
    assert!(auth["access_token"].is_string());
    assert_eq!(auth["token_type"], "Bearer");
    assert_eq!(auth["expires_in"], 3600);
    assert_eq!(auth["user"]["id"], "CIT-0004");
    assert_eq!(auth["user"]["role"], "citizen");
    assert_eq!(auth["user"]["phone"], phone);

    let token = auth["access_token"].as_str().unwrap();
    let me = body_json(get_auth(app, "/api/auth/me", token).await).await;
    assert_eq!(me["data"]["id"], "CIT-0004");
    assert_eq!(me["data"]["citizen"]["phone"], phone);
}

#[tokio::test]
async fn verify_otp_finds_existing_citizen() {
    let app = common::build_test_app();
    let otp = request_otp(app.clone(), "9876543210").await;

    let json = body_json(
        post_json(
            app,
            "/api/auth/verify-otp",
            json!({ "phone": "9876543210", "otp": otp }),
        )
        .await,
    )
    .await;

    assert_eq!(json["data"]["user"]["id"], "CIT-0001");
    assert_eq!(json["data"]["user"]["name"], "Ramesh Kumar");
}

#[tokio::test]
async fn repeated_login_reuses_citizen() {
    let app = common::build_test_app();
    let phone = "7000000001";
    let mut ids = Vec::new();

    for _ in 0..2 {
        let otp = request_otp(app.clone(), phone).await;
        let json = body_json(
            post_json(
                app.clone(),
                "/api/auth/verify-otp",
                json!({ "phone": phone, "otp": otp }),
            )
            .await,
        )
        .await;
        ids.push(json["data"]["user"]["id"].clone());
    }

    assert_eq!(ids[0], ids[1]);
}

#[tokio::test]
async fn malformed_otp_is_rejected() {
    let app = common::build_test_app();

    let body = json!({ "phone": "9123456789", "otp": "12ab" });
    let response = post_json(app, "/api/auth/verify-otp", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dev_bypass_accepts_any_code() {
    let app = common::build_test_app();

    let body = json!({ "phone": "9123456789", "otp": "123456" });
    let response = post_json(app, "/api/auth/verify-otp", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn without_bypass_unissued_code_is_unauthorized() {
    let mut config = common::test_config();
    config.otp.dev_bypass = false;
    let app = common::build_test_app_with(config);

    let body = json!({ "phone": "9123456789", "otp": "123456" });
    let response = post_json(app, "/api/auth/verify-otp", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn without_bypass_issued_code_is_single_use() {
    let mut config = common::test_config();
    config.otp.dev_bypass = false;
    let app = common::build_test_app_with(config);
    let phone = "9123456789";
    let otp = request_otp(app.clone(), phone).await;
    let body = json!({ "phone": phone, "otp": otp });

    let first = post_json(app.clone(), "/api/auth/verify-otp", body.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post_json(app, "/api/auth/verify-otp", body).await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Staff login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_login_success() {
    let app = common::build_test_app();
    let body = json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD });

    let response = post_json(app, "/api/admin/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["data"]["access_token"].is_string());
    assert_eq!(json["data"]["user"]["id"], "OFF-001");
    assert_eq!(json["data"]["user"]["name"], "Anita Sharma");
    assert_eq!(json["data"]["user"]["role"], "admin");
    assert!(json["data"]["user"].get("phone").is_none());
}

#[tokio::test]
async fn admin_login_wrong_password() {
    let app = common::build_test_app();
    let body = json!({ "username": ADMIN_USERNAME, "password": "not-the-password" });

    let response = post_json(app, "/api/admin/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

#[tokio::test]
async fn admin_login_unknown_user() {
    let app = common::build_test_app();
    let body = json!({ "username": "root", "password": ADMIN_PASSWORD });

    let response = post_json(app, "/api/admin/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_login_requires_both_fields() {
    let app = common::build_test_app();

    let response = post_json(app, "/api/admin/auth/login", json!({ "username": "admin" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// /auth/me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_requires_a_token() {
    let app = common::build_test_app();

    let response = get(app, "/api/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_rejects_a_forged_token() {
    let app = common::build_test_app();

    let response = get_auth(app, "/api/auth/me", "eyJhbGciOiJIUzI1NiJ9.e30.invalid").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_officer_for_staff() {
    let app = common::build_test_app();

    let json = body_json(get_auth(app, "/api/auth/me", &admin_token()).await).await;

    assert_eq!(json["data"]["id"], "OFF-001");
    assert_eq!(json["data"]["role"], "admin");
    assert_eq!(json["data"]["officer"]["department"], "administration");
    assert!(json["data"].get("citizen").is_none());
}
