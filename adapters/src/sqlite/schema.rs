//! Database schema definitions
//!
//! Contains SQL for creating all tables and indexes

use rusqlite::Connection;

use crate::errors::AdapterError;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS user_account (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL UNIQUE,
    user_password TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    nickname TEXT,
    memo TEXT,
    created_at TEXT NOT NULL,
    created_by TEXT NOT NULL,
    modified_at TEXT NOT NULL,
    modified_by TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS article (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_account_id INTEGER NOT NULL REFERENCES user_account(id),
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    hashtag TEXT,
    created_at TEXT NOT NULL,
    created_by TEXT NOT NULL,
    modified_at TEXT NOT NULL,
    modified_by TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_article_title ON article(title);
CREATE INDEX IF NOT EXISTS idx_article_hashtag ON article(hashtag);
CREATE INDEX IF NOT EXISTS idx_article_created_at ON article(created_at);
CREATE INDEX IF NOT EXISTS idx_article_created_by ON article(created_by);

CREATE TABLE IF NOT EXISTS article_comment (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    article_id INTEGER NOT NULL REFERENCES article(id) ON DELETE CASCADE,
    user_account_id INTEGER NOT NULL REFERENCES user_account(id),
    content TEXT NOT NULL,
    created_at TEXT NOT NULL,
    created_by TEXT NOT NULL,
    modified_at TEXT NOT NULL,
    modified_by TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_article_comment_article ON article_comment(article_id, created_at);
"#;

/// Create all database tables
pub fn create_tables(conn: &Connection) -> Result<(), AdapterError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}
