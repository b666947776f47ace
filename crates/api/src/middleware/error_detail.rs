//! Unmasks internal errors outside production.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::config::Environment;
use crate::error::{ErrorDetail, INTERNAL_MESSAGE};

/// Rewrite a 500 that carries an [`ErrorDetail`] so its body also holds the
/// underlying cause. Production responses pass through untouched.
pub async fn error_detail(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if environment.is_production() {
        return response;
    }

    let Some(ErrorDetail(detail)) = response.extensions().get::<ErrorDetail>().cloned() else {
        return response;
    };

    let body = json!({
        "error": INTERNAL_MESSAGE,
        "code": "INTERNAL_ERROR",
        "detail": detail,
    });
    (response.status(), axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;
    use tower_http::catch_panic::CatchPanicLayer;

    use super::*;
    use crate::error::{panic_response, AppError};

    async fn failing() -> Result<&'static str, AppError> {
        Err(AppError::InternalError("connection reset by peer".into()))
    }

    async fn panicking() -> &'static str {
        panic!("kiosk table is empty")
    }

    fn app(environment: Environment) -> Router {
        Router::new()
            .route("/fail", get(failing))
            .route("/panic", get(panicking))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(axum::middleware::from_fn_with_state(environment, error_detail))
    }

    async fn call(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn development_exposes_cause() {
        let (status, json) = call(app(Environment::Development), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], INTERNAL_MESSAGE);
        assert_eq!(json["detail"], "connection reset by peer");
    }

    #[tokio::test]
    async fn production_masks_cause() {
        let (status, json) = call(app(Environment::Production), "/fail").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(json.get("detail").is_none());
    }

    #[tokio::test]
    async fn panics_become_json_errors() {
        let (status, json) = call(app(Environment::Development), "/panic").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(json["detail"]
            .as_str()
            .unwrap()
            .contains("kiosk table is empty"));

        let (_, json) = call(app(Environment::Production), "/panic").await;
        assert_eq!(json["error"], INTERNAL_MESSAGE);
        assert!(json.get("detail").is_none());
    }
}
