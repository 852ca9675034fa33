use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::dto::ArticleCommentRequest;
use crate::errors::AppError;
use crate::state::AppState;

/// Hidden field telling the delete action where to send the browser back to.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentTarget {
    pub article_id: i64,
}

fn back_to_article(article_id: i64) -> Redirect {
    Redirect::to(&format!("/articles/{article_id}"))
}

pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Form(request): Form<ArticleCommentRequest>,
) -> Result<Redirect, AppError> {
    let article_id = request.article_id;
    state.comments.save_article_comment(&user, request).await?;
    Ok(back_to_article(article_id))
}

pub async fn update_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<i64>,
    Form(request): Form<ArticleCommentRequest>,
) -> Result<Redirect, AppError> {
    state
        .comments
        .update_article_comment(comment_id, &user, &request.content)
        .await?;
    Ok(back_to_article(request.article_id))
}

pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(comment_id): Path<i64>,
    Form(target): Form<CommentTarget>,
) -> Result<Redirect, AppError> {
    state.comments.delete_article_comment(comment_id, &user).await?;
    Ok(back_to_article(target.article_id))
}
