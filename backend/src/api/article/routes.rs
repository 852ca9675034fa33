use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    article, articles, create_article, delete_article, edit_article_form, new_article_form,
    search_hashtag, update_article,
};
use crate::state::AppState;

pub fn article_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/articles", get(articles))
        .route("/articles/search-hashtag", get(search_hashtag))
        .route("/articles/form", get(new_article_form).post(create_article))
        .route("/articles/:article_id", get(article))
        .route(
            "/articles/:article_id/form",
            get(edit_article_form).post(update_article),
        )
        .route("/articles/:article_id/delete", post(delete_article))
}
