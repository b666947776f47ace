//! Request body extractor that reports malformed JSON with the standard
//! `{ "error", "code" }` body instead of axum's plain-text rejection.

use axum::extract::FromRequest;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;

/// Drop-in replacement for [`axum::Json`] on request bodies.
///
/// Type mismatches and missing required fields become a 400
/// `VALIDATION_ERROR`; unparseable bodies and a wrong content type become a
/// 400 `BAD_REQUEST`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl<T> IntoResponse for AppJson<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
