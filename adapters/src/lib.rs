//! Core `adapters` crate for abstracting board persistence.
//!
//! This crate defines the repository traits the backend services are written
//! against (`ArticleRepository`, `ArticleCommentRepository`,
//! `UserAccountRepository`) and provides the concrete stores implementing them:
//! a SQLite store for deployments and an in-memory store for tests.

pub mod errors;
pub mod memory;
pub mod models;
pub mod sqlite;

use async_trait::async_trait;

pub use errors::{AdapterError, AdapterResult};
pub use memory::InMemoryStore;
pub use models::*;
pub use sqlite::SqliteStore;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find_all(
        &self,
        filter: &ArticleFilter,
        request: &PageRequest,
    ) -> AdapterResult<Page<Article>>;

    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<Article>>;

    async fn insert(&self, article: NewArticle) -> AdapterResult<Article>;

    /// Persists title, content, hashtag and the modified audit pair.
    async fn update(&self, article: &Article) -> AdapterResult<()>;

    /// Deletes the article only when `user_id` is its author. Comments go with it.
    async fn delete_by_id_and_user_id(&self, id: i64, user_id: &str) -> AdapterResult<()>;

    async fn count(&self) -> AdapterResult<u64>;

    /// Distinct non-empty hashtags, sorted.
    async fn find_all_distinct_hashtags(&self) -> AdapterResult<Vec<String>>;
}

#[async_trait]
pub trait ArticleCommentRepository: Send + Sync {
    /// Comments on an article, newest first.
    async fn find_by_article_id(&self, article_id: i64) -> AdapterResult<Vec<ArticleComment>>;

    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<ArticleComment>>;

    async fn insert(&self, comment: NewArticleComment) -> AdapterResult<ArticleComment>;

    async fn update(&self, comment: &ArticleComment) -> AdapterResult<()>;

    async fn delete_by_id_and_user_id(&self, id: i64, user_id: &str) -> AdapterResult<()>;
}

#[async_trait]
pub trait UserAccountRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<UserAccount>>;

    async fn find_by_user_id(&self, user_id: &str) -> AdapterResult<Option<UserAccount>>;

    /// Fails with `AdapterError::Conflict` on a duplicate user id or email.
    async fn insert(&self, account: NewUserAccount) -> AdapterResult<UserAccount>;

    async fn count(&self) -> AdapterResult<u64>;
}
