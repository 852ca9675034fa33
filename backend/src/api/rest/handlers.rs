use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use board_adapters::Page;
use serde_json::{json, Value};

use super::ApiError;
use crate::api::ListParams;
use crate::dto::{ArticleCommentResponse, ArticleResponse, ArticleWithCommentsResponse};
use crate::errors::AppError;
use crate::state::AppState;

pub async fn articles(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Page<ArticleResponse>>, ApiError> {
    let Query(params) = query?;
    let request = params.page_request(state.config.page_size)?;
    let search_value = params.search_value();
    let page = state
        .articles
        .search_articles(params.search_type()?, Some(&search_value), &request)
        .await?;
    Ok(Json(page.map(ArticleResponse::from)))
}

pub async fn article(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ArticleWithCommentsResponse>, ApiError> {
    let Path(article_id) = path?;
    let article = state.articles.get_article(article_id).await?;
    Ok(Json(article.into()))
}

/// Comments of one article, newest first. An unknown article gives an empty list.
pub async fn article_comments(
    State(state): State<Arc<AppState>>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<ArticleCommentResponse>>, ApiError> {
    let Path(article_id) = path?;
    let comments = state.comments.search_article_comments(article_id).await?;
    Ok(Json(comments.into_iter().map(ArticleCommentResponse::from).collect()))
}

pub async fn not_found() -> ApiError {
    ApiError::from(AppError::NotFound("no such endpoint".to_string()))
}

pub async fn hashtags(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let hashtags = state.articles.get_hashtags().await?;
    Ok(Json(json!({ "hashtags": hashtags })))
}
