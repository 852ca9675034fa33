//! Data structures for authentication-related entities.
//!
//! Login and sign-up forms as posted by the browser, and the server-side
//! session record a cookie token points at.

use std::time::Instant;

use serde::Deserialize;

use super::AuthError;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "BOARD_SESSION";

pub const USER_ID_MAX: usize = 50;
pub const EMAIL_MAX: usize = 100;
pub const NICKNAME_MAX: usize = 100;
pub const PASSWORD_MIN: usize = 4;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub user_id: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        let user_id = self.user_id.trim();
        if user_id.is_empty() || user_id.chars().count() > USER_ID_MAX {
            return Err(AuthError::InvalidInput(format!(
                "user id must be 1 to {USER_ID_MAX} characters"
            )));
        }
        if user_id.chars().any(char::is_whitespace) {
            return Err(AuthError::InvalidInput("user id must not contain spaces".into()));
        }
        if self.password.chars().count() < PASSWORD_MIN {
            return Err(AuthError::InvalidInput(format!(
                "password must be at least {PASSWORD_MIN} characters"
            )));
        }
        let email = self.email.trim();
        if !email.contains('@') || email.chars().count() > EMAIL_MAX {
            return Err(AuthError::InvalidInput("email is not valid".into()));
        }
        if self
            .nickname()
            .is_some_and(|n| n.chars().count() > NICKNAME_MAX)
        {
            return Err(AuthError::InvalidInput(format!(
                "nickname must be at most {NICKNAME_MAX} characters"
            )));
        }
        Ok(())
    }

    pub fn nickname(&self) -> Option<String> {
        blank_to_none(&self.nickname)
    }

    pub fn memo(&self) -> Option<String> {
        blank_to_none(&self.memo)
    }
}

/// Server-side half of a login.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    pub user_account_id: i64,
    pub expires_at: Instant,
}

impl Session {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
