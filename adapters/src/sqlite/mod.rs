//! SQLite-backed store implementing every repository trait.
//!
//! A single `rusqlite::Connection` sits behind a `Mutex`. Each repository call
//! takes the lock, runs one or two statements, and releases it before
//! returning, so no guard ever lives across an `.await`.

pub mod queries;
pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use rusqlite::Connection;
use tracing::debug;

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{
    Article, ArticleComment, ArticleFilter, NewArticle, NewArticleComment, NewUserAccount, Page,
    PageRequest, UserAccount,
};
use crate::{ArticleCommentRepository, ArticleRepository, UserAccountRepository};

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database file and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> AdapterResult<Self> {
        let path = path.as_ref();
        debug!("Opening SQLite database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> AdapterResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> AdapterResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        schema::create_tables(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_connection<F, T>(&self, f: F) -> AdapterResult<T>
    where
        F: FnOnce(&Connection) -> AdapterResult<T>,
    {
        let conn = self.conn.lock().map_err(|_| AdapterError::LockPoisoned)?;
        f(&conn)
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[async_trait]
impl ArticleRepository for SqliteStore {
    async fn find_all(
        &self,
        filter: &ArticleFilter,
        request: &PageRequest,
    ) -> AdapterResult<Page<Article>> {
        self.with_connection(|conn| queries::find_articles(conn, filter, request))
    }

    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<Article>> {
        self.with_connection(|conn| queries::find_article_by_id(conn, id))
    }

    async fn insert(&self, article: NewArticle) -> AdapterResult<Article> {
        self.with_connection(|conn| {
            let id = queries::insert_article(conn, &article, now())?;
            queries::find_article_by_id(conn, id)?
                .ok_or_else(|| AdapterError::Corrupt(format!("article {id} vanished after insert")))
        })
    }

    async fn update(&self, article: &Article) -> AdapterResult<()> {
        self.with_connection(|conn| queries::update_article(conn, article).map(|_| ()))
    }

    async fn delete_by_id_and_user_id(&self, id: i64, user_id: &str) -> AdapterResult<()> {
        self.with_connection(|conn| {
            let deleted = queries::delete_article(conn, id, user_id)?;
            debug!(article_id = id, user_id, deleted, "Deleted article");
            Ok(())
        })
    }

    async fn count(&self) -> AdapterResult<u64> {
        self.with_connection(queries::count_articles)
    }

    async fn find_all_distinct_hashtags(&self) -> AdapterResult<Vec<String>> {
        self.with_connection(queries::find_distinct_hashtags)
    }
}

#[async_trait]
impl ArticleCommentRepository for SqliteStore {
    async fn find_by_article_id(&self, article_id: i64) -> AdapterResult<Vec<ArticleComment>> {
        self.with_connection(|conn| queries::find_comments_by_article_id(conn, article_id))
    }

    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<ArticleComment>> {
        self.with_connection(|conn| queries::find_comment_by_id(conn, id))
    }

    async fn insert(&self, comment: NewArticleComment) -> AdapterResult<ArticleComment> {
        self.with_connection(|conn| {
            let id = queries::insert_comment(conn, &comment, now())?;
            queries::find_comment_by_id(conn, id)?
                .ok_or_else(|| AdapterError::Corrupt(format!("comment {id} vanished after insert")))
        })
    }

    async fn update(&self, comment: &ArticleComment) -> AdapterResult<()> {
        self.with_connection(|conn| queries::update_comment(conn, comment).map(|_| ()))
    }

    async fn delete_by_id_and_user_id(&self, id: i64, user_id: &str) -> AdapterResult<()> {
        self.with_connection(|conn| {
            let deleted = queries::delete_comment(conn, id, user_id)?;
            debug!(comment_id = id, user_id, deleted, "Deleted article comment");
            Ok(())
        })
    }
}

#[async_trait]
impl UserAccountRepository for SqliteStore {
    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<UserAccount>> {
        self.with_connection(|conn| queries::find_user_account_by_id(conn, id))
    }

    async fn find_by_user_id(&self, user_id: &str) -> AdapterResult<Option<UserAccount>> {
        self.with_connection(|conn| queries::find_user_account_by_user_id(conn, user_id))
    }

    async fn insert(&self, account: NewUserAccount) -> AdapterResult<UserAccount> {
        self.with_connection(|conn| {
            let id = queries::insert_user_account(conn, &account, now())?;
            queries::find_user_account_by_id(conn, id)?
                .ok_or_else(|| AdapterError::Corrupt(format!("user account {id} vanished after insert")))
        })
    }

    async fn count(&self) -> AdapterResult<u64> {
        self.with_connection(queries::count_user_accounts)
    }
}
