//! Database connection setup and demo seeding.
//!
//! The store itself lives in `board-adapters`; this module decides which one
//! to open from the configuration and fills an empty database on request.

use std::sync::Arc;

use board_adapters::{AdapterResult, SqliteStore};
use tracing::info;

use crate::auth::SignupForm;
use crate::config::Config;
use crate::dto::ArticleRequest;
use crate::errors::AppError;
use crate::state::AppState;

pub const IN_MEMORY: &str = ":memory:";

pub fn open(config: &Config) -> AdapterResult<Arc<SqliteStore>> {
    let store = if config.database == IN_MEMORY {
        info!("Opening in-memory SQLite database");
        SqliteStore::open_in_memory()?
    } else {
        info!("Opening SQLite database at {}", config.database);
        SqliteStore::open(&config.database)?
    };
    Ok(Arc::new(store))
}

/// Creates `demo` / `demo1234` and a welcome article, but only when no
/// account exists yet. Returns whether anything was written.
pub async fn seed_demo_data(state: &AppState) -> Result<bool, AppError> {
    if state.auth.account_count().await? > 0 {
        return Ok(false);
    }

    let demo = state
        .auth
        .register(SignupForm {
            user_id: "demo".to_string(),
            password: "demo1234".to_string(),
            email: "demo@example.com".to_string(),
            nickname: Some("Demo".to_string()),
            memo: Some("Seeded account".to_string()),
        })
        .await?;
    state
        .articles
        .save_article(
            &demo,
            ArticleRequest {
                title: "Welcome to the board".to_string(),
                content: "Log in as demo / demo1234 to write articles and comments.".to_string(),
                hashtag: Some("#welcome".to_string()),
            },
        )
        .await?;

    info!("Seeded demo account and welcome article");
    Ok(true)
}
