//! Central module for organizing the application's HTTP endpoints.
//!
//! `router` assembles the article and comment pages, the auth pages from
//! `crate::auth`, and the JSON endpoints under `/api`, then applies the
//! shared middleware.

pub mod article;
pub mod comment;
mod params;
pub mod rest;

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    response::Redirect,
    routing::get,
    Router,
};

pub use params::ListParams;

use crate::auth::{auth_router, error_page_user};
use crate::errors::AppError;
use crate::middleware::{security_headers, trace_layer};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(article::routes::article_router())
        .merge(comment::routes::comment_router())
        .merge(auth_router())
        .nest("/api", rest::routes::rest_router())
        .fallback(not_found)
        .layer(from_fn_with_state(state.clone(), error_page_user))
        .layer(from_fn(security_headers))
        .layer(trace_layer())
        .with_state(state)
}

async fn root_handler() -> Redirect {
    Redirect::to("/articles")
}

async fn not_found() -> AppError {
    AppError::NotFound("page not found".to_string())
}
