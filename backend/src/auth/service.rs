//! Core business logic for the authentication system.
//!
//! This service handles account creation, password hashing and verification,
//! and the in-memory session table that cookie tokens index into.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use board_adapters::UserAccountRepository;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::{AuthError, Session, SignupForm};
use crate::dto::UserAccountDto;
use crate::state::AppState;

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// 32 random bytes, hex encoded.
fn new_session_token() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    hex::encode(bytes)
}

pub struct AuthService {
    user_account_repository: Arc<dyn UserAccountRepository>,
    sessions: RwLock<HashMap<String, Session>>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(user_account_repository: Arc<dyn UserAccountRepository>, session_ttl: Duration) -> Self {
        Self {
            user_account_repository,
            sessions: RwLock::new(HashMap::new()),
            session_ttl,
        }
    }

    pub async fn register(&self, form: SignupForm) -> Result<UserAccountDto, AuthError> {
        form.validate()?;
        let new_account = UserAccountDto::of(
            form.user_id.trim(),
            hash_password(&form.password)?,
            form.email.trim(),
            form.nickname(),
            form.memo(),
        );
        let account = self
            .user_account_repository
            .insert(new_account.to_new_entity())
            .await?;

        info!(user_id = %account.user_id, "Registered user account");
        Ok(UserAccountDto::from_entity(&account))
    }

    pub async fn authenticate(&self, user_id: &str, password: &str) -> Result<UserAccountDto, AuthError> {
        let account = self
            .user_account_repository
            .find_by_user_id(user_id.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.user_password) {
            debug!(user_id, "Password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        Ok(UserAccountDto::from_entity(&account))
    }

    /// Verifies credentials and opens a session. Returns the cookie token.
    pub async fn login(&self, user_id: &str, password: &str) -> Result<(String, UserAccountDto), AuthError> {
        let user = self.authenticate(user_id, password).await?;
        let token = self.start_session(&user).await;
        info!(user_id = %user.user_id, "Logged in");
        Ok((token, user))
    }

    pub async fn start_session(&self, user: &UserAccountDto) -> String {
        let token = new_session_token();
        let session = Session {
            user_account_id: user.id,
            expires_at: Instant::now() + self.session_ttl,
        };
        self.sessions.write().await.insert(token.clone(), session);
        token
    }

    /// Looks up the account behind a token. Expired sessions are dropped.
    pub async fn resolve_session(&self, token: &str) -> Result<Option<UserAccountDto>, AuthError> {
        let session = self.sessions.read().await.get(token).copied();
        let Some(session) = session else {
            return Ok(None);
        };
        if session.is_expired(Instant::now()) {
            self.sessions.write().await.remove(token);
            return Ok(None);
        }

        let account = self
            .user_account_repository
            .find_by_id(session.user_account_id)
            .await?;
        Ok(account.as_ref().map(UserAccountDto::from_entity))
    }

    pub async fn end_session(&self, token: &str) {
        if self.sessions.write().await.remove(token).is_some() {
            debug!("Session ended");
        }
    }

    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    pub async fn account_count(&self) -> Result<u64, AuthError> {
        Ok(self.user_account_repository.count().await?)
    }
}

/// Drops expired sessions every `every` until the runtime shuts down.
pub async fn run_session_reaper(state: Arc<AppState>, every: Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        let purged = state.auth.purge_expired().await;
        if purged > 0 {
            debug!(purged, "Purged expired sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_adapters::InMemoryStore;

    fn service(ttl: Duration) -> AuthService {
        AuthService::new(Arc::new(InMemoryStore::new()), ttl)
    }

    fn signup(user_id: &str) -> SignupForm {
        SignupForm {
            user_id: user_id.to_string(),
            password: "asdf1234".to_string(),
            email: format!("{user_id}@mail.com"),
            nickname: Some("Nick".to_string()),
            memo: None,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret").unwrap();
        assert_ne!(hash, "secret");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("secret", "not a phc string"));
    }

    #[test]
    fn test_session_tokens_are_unique_hex() {
        let a = new_session_token();
        let b = new_session_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let sut = service(Duration::from_secs(60));
        let registered = sut.register(signup("kim")).await.unwrap();
        assert_eq!(registered.nickname.as_deref(), Some("Nick"));
        assert_ne!(registered.user_password, "asdf1234");

        let (token, user) = sut.login("kim", "asdf1234").await.unwrap();
        assert_eq!(user.id, registered.id);

        let resolved = sut.resolve_session(&token).await.unwrap().unwrap();
        assert_eq!(resolved.user_id, "kim");
    }

    #[tokio::test]
    async fn test_wrong_password_is_rejected() {
        let sut = service(Duration::from_secs(60));
        sut.register(signup("kim")).await.unwrap();

        let err = sut.login("kim", "nope").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        let err = sut.login("nobody", "asdf1234").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_duplicate_registration() {
        let sut = service(Duration::from_secs(60));
        sut.register(signup("kim")).await.unwrap();
        let err = sut.register(signup("kim")).await.unwrap_err();
        assert!(matches!(err, AuthError::AlreadyExists));
        assert_eq!(sut.account_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_expired_session_resolves_to_none() {
        let sut = service(Duration::ZERO);
        let user = sut.register(signup("kim")).await.unwrap();
        let token = sut.start_session(&user).await;

        assert!(sut.resolve_session(&token).await.unwrap().is_none());
        assert_eq!(sut.purge_expired().await, 0);
    }

    #[tokio::test]
    async fn test_purge_and_logout() {
        let sut = service(Duration::ZERO);
        let user = sut.register(signup("kim")).await.unwrap();
        sut.start_session(&user).await;
        sut.start_session(&user).await;
        assert_eq!(sut.purge_expired().await, 2);

        let sut = service(Duration::from_secs(60));
        let user = sut.register(signup("lee")).await.unwrap();
        let token = sut.start_session(&user).await;
        sut.end_session(&token).await;
        assert!(sut.resolve_session(&token).await.unwrap().is_none());
    }
}
