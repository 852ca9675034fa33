use std::sync::Arc;

use axum::{routing::get, Router};

use super::handlers::{article, article_comments, articles, hashtags, not_found};
use crate::state::AppState;

/// Mounted under `/api`.
pub fn rest_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles", get(articles))
        .route("/articles/:article_id", get(article))
        .route("/articles/:article_id/comments", get(article_comments))
        .route("/hashtags", get(hashtags))
        .fallback(not_found)
}
