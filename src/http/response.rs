//! JSON response payloads for the contact API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct ApiMessage<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct ApiError<'a> {
    error: &'a str,
}

/// A 200 response with a `message` field.
pub fn success(message: &str) -> Response {
    (StatusCode::OK, Json(ApiMessage { message })).into_response()
}

/// An error response with an `error` field.
pub fn failure(status: StatusCode, error: &str) -> Response {
    (status, Json(ApiError { error })).into_response()
}
