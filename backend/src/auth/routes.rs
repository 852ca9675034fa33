//! Defines the HTTP routes for logging in, logging out and signing up.
//!
//! The router is merged into the top-level router in `api::router`.

use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::{login, login_page, logout, signup, signup_page};
use crate::state::AppState;

pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/signup", get(signup_page).post(signup))
}
