//! Handler functions for the article pages.
//!
//! Read-only pages accept anonymous visitors through `MaybeUser`; writing
//! pages take `AuthUser` and bounce anonymous requests to `/login`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use tracing::info;

use crate::api::ListParams;
use crate::auth::{AuthUser, MaybeUser};
use crate::dto::{ArticleRequest, ArticleResponse, ArticleWithCommentsResponse};
use crate::errors::AppError;
use crate::state::AppState;
use crate::views::{
    hashtag_href, render, ArticleDetailPage, ArticleFormPage, ArticlesPage, CommentView,
    HashtagLink, HashtagSearchPage, ListQuery, PaginationView,
};

pub async fn articles(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let request = params.page_request(state.config.page_size)?;
    let query = ListQuery {
        search_type: params.search_type()?,
        search_value: params.search_value(),
        size: request.size,
        sort: request.sort,
    };

    let page = state
        .articles
        .search_articles(query.search_type, Some(&query.search_value), &request)
        .await?;
    let bar = state
        .pagination
        .pagination_bar_numbers(request.page, page.total_pages);
    let pagination = PaginationView::new(&bar, &page, |number| query.href(number, request.sort));
    let total_elements = page.total_elements;
    let articles = page.content.into_iter().map(ArticleResponse::from).collect();

    render(&ArticlesPage {
        current_user_id: user.user_id(),
        articles,
        total_elements,
        search_types: query.search_type_options(),
        sort_links: query.sort_links(),
        search_value: query.search_value,
        pagination,
    })
}

pub async fn article(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Path(article_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let article = ArticleWithCommentsResponse::from(state.articles.get_article(article_id).await?);
    let total_count = state.articles.get_article_count().await?;

    let current_user_id = user.user_id();
    let is_viewer = |author: &str| !current_user_id.is_empty() && author == current_user_id;

    let comments = article
        .article_comment_responses
        .iter()
        .cloned()
        .map(|comment| CommentView {
            can_edit: is_viewer(&comment.user_id),
            update_action: format!("/comments/{}/form", comment.id),
            delete_action: format!("/comments/{}/delete", comment.id),
            comment,
        })
        .collect();
    let can_edit = is_viewer(&article.user_id);
    let hashtag = if article.hashtag.is_empty() {
        String::new()
    } else {
        hashtag_href(&article.hashtag, 0)
    };

    render(&ArticleDetailPage {
        current_user_id,
        article,
        comments,
        can_edit,
        hashtag_href: hashtag,
        total_count,
    })
}

pub async fn search_hashtag(
    State(state): State<Arc<AppState>>,
    user: MaybeUser,
    Query(params): Query<ListParams>,
) -> Result<Html<String>, AppError> {
    let request = params.page_request(state.config.page_size)?;
    let selected = params.search_value();

    let page = state
        .articles
        .search_articles_via_hashtag(Some(&selected), &request)
        .await?;
    let bar = state
        .pagination
        .pagination_bar_numbers(request.page, page.total_pages);
    let pagination = PaginationView::new(&bar, &page, |number| hashtag_href(&selected, number));

    let hashtags = state
        .articles
        .get_hashtags()
        .await?
        .into_iter()
        .map(|name| HashtagLink {
            href: hashtag_href(&name, 0),
            selected: name == selected,
            name,
        })
        .collect();

    render(&HashtagSearchPage {
        current_user_id: user.user_id(),
        hashtags,
        selected,
        articles: page.content.into_iter().map(ArticleResponse::from).collect(),
        pagination,
    })
}

fn new_article_page(current_user_id: String, request: ArticleRequest, error: String) -> ArticleFormPage {
    ArticleFormPage {
        current_user_id,
        heading: "New article",
        form_action: "/articles/form".to_string(),
        title: request.title,
        content: request.content,
        hashtag: request.hashtag.unwrap_or_default(),
        error,
        cancel_href: "/articles".to_string(),
    }
}

fn edit_article_page(
    current_user_id: String,
    article_id: i64,
    request: ArticleRequest,
    error: String,
) -> ArticleFormPage {
    ArticleFormPage {
        current_user_id,
        heading: "Edit article",
        form_action: format!("/articles/{article_id}/form"),
        title: request.title,
        content: request.content,
        hashtag: request.hashtag.unwrap_or_default(),
        error,
        cancel_href: format!("/articles/{article_id}"),
    }
}

pub async fn new_article_form(AuthUser(user): AuthUser) -> Result<Html<String>, AppError> {
    render(&new_article_page(
        user.user_id,
        ArticleRequest::default(),
        String::new(),
    ))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Form(request): Form<ArticleRequest>,
) -> Result<Response, AppError> {
    match state.articles.save_article(&user, request.clone()).await {
        Ok(saved) => {
            info!(article_id = saved.id, user_id = %user.user_id, "Article created");
            Ok(Redirect::to("/articles").into_response())
        }
        Err(AppError::BadRequest(message)) => {
            let page = render(&new_article_page(user.user_id, request, message))?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn edit_article_form(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(article_id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let article = state.articles.get_article(article_id).await?;
    if article.user_account.user_id != user.user_id {
        return Err(AppError::Forbidden);
    }

    let request = ArticleRequest {
        title: article.title,
        content: article.content,
        hashtag: article.hashtag,
    };
    render(&edit_article_page(user.user_id, article_id, request, String::new()))
}

pub async fn update_article(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(article_id): Path<i64>,
    Form(request): Form<ArticleRequest>,
) -> Result<Response, AppError> {
    match state
        .articles
        .update_article(article_id, &user, request.clone())
        .await
    {
        Ok(()) => Ok(Redirect::to(&format!("/articles/{article_id}")).into_response()),
        Err(AppError::BadRequest(message)) => {
            let page = render(&edit_article_page(user.user_id, article_id, request, message))?;
            Ok((StatusCode::BAD_REQUEST, page).into_response())
        }
        Err(e) => Err(e),
    }
}

pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(article_id): Path<i64>,
) -> Result<Redirect, AppError> {
    state.articles.delete_article(article_id, &user).await?;
    info!(article_id, user_id = %user.user_id, "Article delete requested");
    Ok(Redirect::to("/articles"))
}
