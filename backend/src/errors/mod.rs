//! Global application error types and handlers.
//!
//! `AppError` is what every page handler returns on failure. Its
//! `IntoResponse` impl picks the status code and renders the shared error
//! page; an unauthenticated request is turned into a redirect to `/login`.
//! The rendered `ErrorPage` rides along as a response extension so
//! `crate::auth::error_page_user` can fill in the logged-in user.

use askama::Template;
use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use board_adapters::AdapterError;
use thiserror::Error;
use tracing::error;

use crate::views::ErrorPage;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("You are not allowed to do that")]
    Forbidden,

    #[error("Login required")]
    Unauthenticated,

    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] AdapterError),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) | AppError::Storage(AdapterError::Conflict(_)) => {
                StatusCode::CONFLICT
            }
            AppError::Storage(AdapterError::MissingReference(_)) => StatusCode::BAD_REQUEST,
            AppError::Storage(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client. Internal details stay in the log.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Something went wrong".to_string(),
            StatusCode::CONFLICT => "That value is already taken".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unauthenticated = self {
            return Redirect::to("/login").into_response();
        }

        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }

        let page = ErrorPage {
            current_user_id: String::new(),
            status: status.as_u16(),
            message: self.public_message(),
        };
        match page.render() {
            Ok(body) => {
                let mut response = (status, Html(body)).into_response();
                response.extensions_mut().insert(page);
                response
            }
            Err(e) => {
                error!("Failed to render error page: {e}");
                (status, self.public_message()).into_response()
            }
        }
    }
}
