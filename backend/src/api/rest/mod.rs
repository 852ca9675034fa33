//! Read-only JSON endpoints under `/api`.
//!
//! Errors here are JSON bodies instead of the HTML error page.

pub mod handlers;
pub mod routes;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::AppError;

pub struct ApiError(AppError);

impl<E: Into<AppError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        if status.is_server_error() {
            tracing::error!("API request failed: {}", self.0);
        }
        let body = json!({
            "status": status.as_u16(),
            "message": self.0.public_message(),
        });
        (status, Json(body)).into_response()
    }
}
