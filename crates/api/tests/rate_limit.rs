//! Integration tests for the per-client request ceiling.

mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{header, Request, StatusCode};
use common::{body_json, get};
use std::net::SocketAddr;
use suvidha_api::config::RateLimitConfig;
use tower::ServiceExt;

fn limited_app(max_requests: u64) -> axum::Router {
    let mut config = common::test_config();
    config.rate_limit = RateLimitConfig {
        max_requests,
        window_secs: 60,
    };
    common::build_test_app_with(config)
}

fn request_from(addr: &str) -> Request<Body> {
    let addr: SocketAddr = addr.parse().unwrap();
    let mut request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}

#[tokio::test]
async fn requests_over_the_ceiling_get_429() {
    let app = limited_app(2);

    for _ in 0..2 {
        assert_eq!(get(app.clone(), "/health").await.status(), StatusCode::OK);
    }

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: u64 = response.headers()[header::RETRY_AFTER]
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!((1..=60).contains(&retry_after));

    let json = body_json(response).await;
    assert_eq!(json["code"], "RATE_LIMITED");
}

#[tokio::test]
async fn clients_are_limited_independently() {
    let app = limited_app(1);

    let first = app.clone().oneshot(request_from("10.0.0.1:40000")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let other = app.clone().oneshot(request_from("10.0.0.2:40000")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);

    // Same address, different port: still the same client.
    let repeat = app.oneshot(request_from("10.0.0.1:40001")).await.unwrap();
    assert_eq!(repeat.status(), StatusCode::TOO_MANY_REQUESTS);
}
