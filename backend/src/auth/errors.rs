//! Custom error types specific to authentication failures.
//!
//! Handlers that render a form show `InvalidCredentials`, `AlreadyExists` and
//! `InvalidInput` inline. Everything else is converted to `AppError` and
//! rendered by the shared error page.

use axum::response::{IntoResponse, Response};
use board_adapters::AdapterError;
use thiserror::Error;

use crate::errors::AppError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Login required")]
    Unauthenticated,

    #[error("Invalid user id or password")]
    InvalidCredentials,

    #[error("User id or email is already taken")]
    AlreadyExists,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Storage(AdapterError),
}

impl From<AdapterError> for AuthError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::Conflict(_) => AuthError::AlreadyExists,
            other => AuthError::Storage(other),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err {
            AuthError::Unauthenticated => AppError::Unauthenticated,
            AuthError::InvalidCredentials => AppError::BadRequest(message),
            AuthError::AlreadyExists => AppError::Conflict(message),
            AuthError::InvalidInput(message) => AppError::BadRequest(message),
            AuthError::Hashing(message) => AppError::Internal(message),
            AuthError::Storage(inner) => AppError::Storage(inner),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_becomes_already_exists() {
        let err = AuthError::from(AdapterError::Conflict("user_account".into()));
        assert!(matches!(err, AuthError::AlreadyExists));
    }

    #[test]
    fn test_unauthenticated_maps_to_redirecting_app_error() {
        assert!(matches!(
            AppError::from(AuthError::Unauthenticated),
            AppError::Unauthenticated
        ));
    }
}
