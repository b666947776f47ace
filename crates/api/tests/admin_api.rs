//! HTTP-level integration tests for the staff `/admin` endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use common::{admin_token, body_json, citizen_token, get, get_auth, officer_token, put_json_auth};
use serde_json::json;

fn seeded_id(sequence: u32) -> String {
    format!("CMP-{}-{sequence:06}", Utc::now().year())
}

fn update_uri(sequence: u32) -> String {
    format!("/api/admin/complaints/{}/update", seeded_id(sequence))
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_a_token() {
    let app = common::build_test_app();

    let response = get(app, "/api/admin/complaints").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn citizen_token_is_forbidden_on_admin_routes() {
    let app = common::build_test_app();
    let token = citizen_token("CIT-0001");

    let response = get_auth(app.clone(), "/api/admin/complaints", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(app, "/api/admin/dashboard/stats", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn officer_token_is_accepted() {
    let app = common::build_test_app();
    let token = officer_token("OFF-003");

    let response = get_auth(app, "/api/admin/complaints", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Listing and detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_listing_is_unscoped_and_filterable() {
    let app = common::build_test_app();
    let token = admin_token();

    let json = body_json(get_auth(app, "/api/admin/complaints?priority=critical", &token).await).await;

    let complaints = json["data"]["complaints"].as_array().unwrap();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0]["category"], "water");
    assert_eq!(json["data"]["summary"]["total"], 4);
}

#[tokio::test]
async fn admin_detail_returns_timeline() {
    let app = common::build_test_app();
    let token = admin_token();
    let uri = format!("/api/admin/complaints/{}", seeded_id(3));

    let json = body_json(get_auth(app, &uri, &token).await).await;

    assert_eq!(json["data"]["status"], "resolved");
    assert!(json["data"]["resolved_at"].is_string());
    assert_eq!(json["data"]["updates"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolving_sets_resolved_at_and_reopening_work_clears_it() {
    let app = common::build_test_app();
    let token = admin_token();

    let body = json!({ "status": "resolved", "comment": "Transformer replaced" });
    let response = put_json_auth(app.clone(), &update_uri(1), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "Complaint updated successfully");
    assert_eq!(json["data"]["status"], "resolved");
    assert!(json["data"]["resolved_at"].is_string());
    let last = json["data"]["updates"].as_array().unwrap().last().unwrap().clone();
    assert_eq!(last["comment"], "Transformer replaced");
    assert_eq!(last["author_role"], "admin");
    assert_eq!(last["author_id"], "OFF-001");

    let body = json!({ "status": "in_progress" });
    let json = body_json(put_json_auth(app, &update_uri(1), body, &token).await).await;
    assert_eq!(json["data"]["status"], "in_progress");
    assert!(json["data"]["resolved_at"].is_null());
}

#[tokio::test]
async fn closing_keeps_existing_resolution_time() {
    let app = common::build_test_app();
    let token = admin_token();
    let detail = format!("/api/admin/complaints/{}", seeded_id(3));

    let before = body_json(get_auth(app.clone(), &detail, &token).await).await;
    let resolved_at = before["data"]["resolved_at"].clone();

    let body = json!({ "status": "closed" });
    let json = body_json(put_json_auth(app, &update_uri(3), body, &token).await).await;

    assert_eq!(json["data"]["status"], "closed");
    assert_eq!(json["data"]["resolved_at"], resolved_at);
}

#[tokio::test]
async fn assigning_registered_complaint_promotes_it() {
    let app = common::build_test_app();
    let token = admin_token();

    let body = json!({ "assignedTo": "OFF-002" });
    let response = put_json_auth(app, &update_uri(4), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "assigned");
    assert_eq!(json["data"]["assigned_officer_id"], "OFF-002");
}

#[tokio::test]
async fn empty_assignment_clears_officer() {
    let app = common::build_test_app();
    let token = admin_token();

    let body = json!({ "assigned_to": "" });
    let json = body_json(put_json_auth(app, &update_uri(2), body, &token).await).await;

    assert_eq!(json["data"]["status"], "assigned");
    assert!(json["data"]["assigned_officer_id"].is_null());
}

#[tokio::test]
async fn unknown_officer_is_rejected() {
    let app = common::build_test_app();
    let token = admin_token();

    let body = json!({ "assignedTo": "OFF-999" });
    let response = put_json_auth(app, &update_uri(4), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_string_status_is_rejected_as_json() {
    let app = common::build_test_app();
    let token = admin_token();

    let response = put_json_auth(app, &update_uri(1), json!({ "status": 5 }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = common::build_test_app();
    let token = admin_token();

    let body = json!({ "status": "done" });
    let response = put_json_auth(app, &update_uri(1), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = common::build_test_app();
    let token = admin_token();

    let response = put_json_auth(app, &update_uri(1), json!({}), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_of_unknown_complaint_returns_404() {
    let app = common::build_test_app();
    let token = admin_token();

    let uri = "/api/admin/complaints/CMP-1999-000042/update";
    let response = put_json_auth(app, uri, json!({ "status": "closed" }), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Officers and dashboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn officers_are_listed() {
    let app = common::build_test_app();
    let token = admin_token();

    let json = body_json(get_auth(app, "/api/admin/officers", &token).await).await;

    let officers = json["data"].as_array().unwrap();
    assert_eq!(officers.len(), 4);
    assert!(officers.iter().any(|o| o["id"] == "OFF-001" && o["role"] == "admin"));
}

#[tokio::test]
async fn dashboard_reports_mock_aggregates() {
    let app = common::build_test_app();
    let token = admin_token();

    let response = get_auth(app, "/api/admin/dashboard/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let stats = &json["data"];
    assert_eq!(stats["data_source"], "mock");
    assert_eq!(stats["complaints"]["total"], 4);
    assert_eq!(stats["complaints"]["resolved"], 1);
    assert_eq!(stats["total_citizens"], 3);
    assert_eq!(stats["kiosks_total"], 4);
    assert_eq!(stats["kiosks_online"], 2);
    assert_eq!(stats["by_priority"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn dashboard_reflects_new_registrations() {
    let app = common::build_test_app();
    let token = admin_token();

    let body = json!({ "category": "water", "description": "Leaking municipal tap" });
    let response = common::post_json(app.clone(), "/api/complaints", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(get_auth(app, "/api/admin/dashboard/stats", &token).await).await;
    assert_eq!(json["data"]["complaints"]["total"], 5);
    assert_eq!(json["data"]["complaints"]["registered"], 2);
}
