use std::sync::Arc;

use axum::{routing::post, Router};

use super::handlers::{create_comment, delete_comment, update_comment};
use crate::state::AppState;

pub fn comment_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/comments/new", post(create_comment))
        .route("/comments/:comment_id/form", post(update_comment))
        .route("/comments/:comment_id/delete", post(delete_comment))
}
