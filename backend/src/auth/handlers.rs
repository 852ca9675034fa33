//! Handler functions for the login, logout and sign-up pages.
//!
//! Credential and form errors re-render the page with a message; everything
//! else propagates as `AppError`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::{AuthError, LoginForm, MaybeUser, SignupForm, SESSION_COOKIE};
use crate::errors::AppError;
use crate::state::AppState;
use crate::views::{render, LoginPage, SignupPage};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub async fn login_page(user: MaybeUser) -> Result<Html<String>, AppError> {
    render(&LoginPage {
        current_user_id: user.user_id(),
        user_id: String::new(),
        error: String::new(),
    })
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.auth.login(&form.user_id, &form.password).await {
        Ok((token, _)) => {
            Ok((jar.add(session_cookie(token)), Redirect::to("/articles")).into_response())
        }
        Err(err @ AuthError::InvalidCredentials) => {
            let page = render(&LoginPage {
                current_user_id: String::new(),
                user_id: form.user_id,
                error: err.to_string(),
            })?;
            Ok((StatusCode::UNAUTHORIZED, page).into_response())
        }
        Err(err) => Err(err.into()),
    }
}

pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> impl IntoResponse {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.auth.end_session(cookie.value()).await;
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::to("/articles"))
}

pub async fn signup_page(user: MaybeUser) -> Result<Html<String>, AppError> {
    render(&SignupPage {
        current_user_id: user.user_id(),
        user_id: String::new(),
        email: String::new(),
        nickname: String::new(),
        memo: String::new(),
        error: String::new(),
    })
}

/// Creates the account and logs it in straight away.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let user = match state.auth.register(form.clone()).await {
        Ok(user) => user,
        Err(err @ (AuthError::InvalidInput(_) | AuthError::AlreadyExists)) => {
            let status = match err {
                AuthError::AlreadyExists => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            };
            let page = render(&SignupPage {
                current_user_id: String::new(),
                user_id: form.user_id,
                email: form.email,
                nickname: form.nickname.unwrap_or_default(),
                memo: form.memo.unwrap_or_default(),
                error: err.to_string(),
            })?;
            return Ok((status, page).into_response());
        }
        Err(err) => return Err(err.into()),
    };

    let token = state.auth.start_session(&user).await;
    Ok((jar.add(session_cookie(token)), Redirect::to("/articles")).into_response())
}
