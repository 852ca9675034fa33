//! Extractors that resolve the session cookie into the logged-in account.
//!
//! `AuthUser` guards pages that need a login: anonymous requests are rejected
//! with `AuthError::Unauthenticated`, which renders as a redirect to `/login`.
//! `MaybeUser` never rejects and is used by pages that only show who is
//! logged in. `error_page_user` does the same for the shared error page.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use super::{AuthError, SESSION_COOKIE};
use crate::dto::UserAccountDto;
use crate::state::AppState;
use crate::views::{render, ErrorPage};

pub struct AuthUser(pub UserAccountDto);

pub struct MaybeUser(pub Option<UserAccountDto>);

impl MaybeUser {
    /// The logged-in user id, or an empty string for templates.
    pub fn user_id(&self) -> String {
        self.0
            .as_ref()
            .map(|user| user.user_id.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn session_token(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

async fn current_user(
    parts: &Parts,
    state: &AppState,
) -> Result<Option<UserAccountDto>, AuthError> {
    match session_token(parts) {
        Some(token) => state.auth.resolve_session(&token).await,
        None => Ok(None),
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        current_user(parts, state)
            .await?
            .map(AuthUser)
            .ok_or(AuthError::Unauthenticated)
    }
}

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeUser {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        match current_user(parts, state).await {
            Ok(user) => Ok(MaybeUser(user)),
            Err(e) => {
                warn!("Failed to resolve session, treating request as anonymous: {e}");
                Ok(MaybeUser(None))
            }
        }
    }
}

/// Renders error pages again with the logged-in user in the header. The
/// session is only looked up when the response is an error page.
pub async fn error_page_user(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let token = CookieJar::from_headers(request.headers())
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string());
    let response = next.run(request).await;

    let (Some(token), Some(page)) = (token, response.extensions().get::<ErrorPage>().cloned()) else {
        return response;
    };
    let user = match state.auth.resolve_session(&token).await {
        Ok(Some(user)) => user,
        Ok(None) => return response,
        Err(e) => {
            warn!("Failed to resolve session for error page: {e}");
            return response;
        }
    };

    let page = ErrorPage {
        current_user_id: user.user_id,
        ..page
    };
    match render(&page) {
        Ok(html) => {
            let mut rendered = (response.status(), html).into_response();
            rendered.extensions_mut().insert(page);
            rendered
        }
        Err(_) => response,
    }
}
