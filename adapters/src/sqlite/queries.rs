//! Database query implementations
//!
//! Plain functions over a borrowed `Connection`. `SqliteStore` takes the lock
//! and hands the connection in; nothing here touches the mutex.

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{
    Article, ArticleComment, ArticleFilter, AuditFields, Direction, NewArticle,
    NewArticleComment, NewUserAccount, Page, PageRequest, SortField, UserAccount,
};

const USER_ACCOUNT_COLUMNS: &str = "u.id, u.user_id, u.user_password, u.email, u.nickname, u.memo, \
     u.created_at, u.created_by, u.modified_at, u.modified_by";

const ARTICLE_SELECT: &str = "SELECT a.id, a.title, a.content, a.hashtag, \
     a.created_at, a.created_by, a.modified_at, a.modified_by, \
     u.id, u.user_id, u.user_password, u.email, u.nickname, u.memo, \
     u.created_at, u.created_by, u.modified_at, u.modified_by \
     FROM article a JOIN user_account u ON u.id = a.user_account_id";

const COMMENT_SELECT: &str = "SELECT c.id, c.article_id, c.content, \
     c.created_at, c.created_by, c.modified_at, c.modified_by, \
     u.id, u.user_id, u.user_password, u.email, u.nickname, u.memo, \
     u.created_at, u.created_by, u.modified_at, u.modified_by \
     FROM article_comment c JOIN user_account u ON u.id = c.user_account_id";

fn audit_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<AuditFields> {
    Ok(AuditFields {
        created_at: row.get(offset)?,
        created_by: row.get(offset + 1)?,
        modified_at: row.get(offset + 2)?,
        modified_by: row.get(offset + 3)?,
    })
}

fn user_account_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<UserAccount> {
    Ok(UserAccount {
        id: row.get(offset)?,
        user_id: row.get(offset + 1)?,
        user_password: row.get(offset + 2)?,
        email: row.get(offset + 3)?,
        nickname: row.get(offset + 4)?,
        memo: row.get(offset + 5)?,
        audit: audit_from_row(row, offset + 6)?,
    })
}

fn article_from_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        hashtag: row.get(3)?,
        audit: audit_from_row(row, 4)?,
        user_account: user_account_from_row(row, 8)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<ArticleComment> {
    Ok(ArticleComment {
        id: row.get(0)?,
        article_id: row.get(1)?,
        content: row.get(2)?,
        audit: audit_from_row(row, 3)?,
        user_account: user_account_from_row(row, 7)?,
    })
}

/// Escapes LIKE wildcards so user input only ever matches literally.
fn like_pattern(keyword: &str) -> String {
    let mut escaped = String::with_capacity(keyword.len() + 2);
    escaped.push('%');
    for ch in keyword.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn filter_clause(filter: &ArticleFilter) -> (&'static str, Option<String>) {
    match filter {
        ArticleFilter::All => ("", None),
        ArticleFilter::TitleContaining(k) => {
            (" WHERE a.title LIKE ?1 ESCAPE '\\'", Some(like_pattern(k)))
        }
        ArticleFilter::ContentContaining(k) => {
            (" WHERE a.content LIKE ?1 ESCAPE '\\'", Some(like_pattern(k)))
        }
        ArticleFilter::UserIdContaining(k) => {
            (" WHERE u.user_id LIKE ?1 ESCAPE '\\'", Some(like_pattern(k)))
        }
        ArticleFilter::NicknameContaining(k) => {
            (" WHERE u.nickname LIKE ?1 ESCAPE '\\'", Some(like_pattern(k)))
        }
        ArticleFilter::Hashtag(h) => (" WHERE a.hashtag = ?1", Some(h.clone())),
    }
}

fn order_clause(request: &PageRequest) -> String {
    let column = match request.sort.field {
        SortField::Title => "a.title",
        SortField::Hashtag => "a.hashtag",
        SortField::UserId => "u.user_id",
        SortField::CreatedAt => "a.created_at",
    };
    let direction = match request.sort.direction {
        Direction::Asc => "ASC",
        Direction::Desc => "DESC",
    };
    format!(" ORDER BY {column} {direction}, a.id {direction}")
}

// ---------------------------------------------------------------------------
// user_account
// ---------------------------------------------------------------------------

pub fn find_user_account_by_id(conn: &Connection, id: i64) -> AdapterResult<Option<UserAccount>> {
    let sql = format!("SELECT {USER_ACCOUNT_COLUMNS} FROM user_account u WHERE u.id = ?1");
    let account = conn
        .query_row(&sql, params![id], |row| user_account_from_row(row, 0))
        .optional()?;
    Ok(account)
}

pub fn find_user_account_by_user_id(
    conn: &Connection,
    user_id: &str,
) -> AdapterResult<Option<UserAccount>> {
    let sql = format!("SELECT {USER_ACCOUNT_COLUMNS} FROM user_account u WHERE u.user_id = ?1");
    let account = conn
        .query_row(&sql, params![user_id], |row| user_account_from_row(row, 0))
        .optional()?;
    Ok(account)
}

pub fn insert_user_account(
    conn: &Connection,
    account: &NewUserAccount,
    now: NaiveDateTime,
) -> AdapterResult<i64> {
    conn.execute(
        r#"
        INSERT INTO user_account
            (user_id, user_password, email, nickname, memo, created_at, created_by, modified_at, modified_by)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?1, ?6, ?1)
        "#,
        params![
            account.user_id,
            account.user_password,
            account.email,
            account.nickname,
            account.memo,
            now,
        ],
    )
    .map_err(|err| AdapterError::from_constraint(err, "user_account"))?;
    Ok(conn.last_insert_rowid())
}

pub fn count_user_accounts(conn: &Connection) -> AdapterResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM user_account", [], |row| row.get(0))?;
    Ok(count as u64)
}

// ---------------------------------------------------------------------------
// article
// ---------------------------------------------------------------------------

pub fn find_articles(
    conn: &Connection,
    filter: &ArticleFilter,
    request: &PageRequest,
) -> AdapterResult<Page<Article>> {
    let (where_clause, keyword) = filter_clause(filter);

    let count_sql = format!(
        "SELECT COUNT(*) FROM article a JOIN user_account u ON u.id = a.user_account_id{where_clause}"
    );
    let mut values: Vec<Value> = keyword.into_iter().map(Value::Text).collect();
    let total: i64 = conn.query_row(&count_sql, params_from_iter(values.iter()), |row| row.get(0))?;

    let next = values.len() + 1;
    let page_sql = format!(
        "{ARTICLE_SELECT}{where_clause}{} LIMIT ?{} OFFSET ?{}",
        order_clause(request),
        next,
        next + 1
    );
    let Ok(offset) = i64::try_from(request.offset()) else {
        return Ok(Page::new(Vec::new(), request, total as u64));
    };
    values.push(Value::Integer(request.size as i64));
    values.push(Value::Integer(offset));

    let mut stmt = conn.prepare(&page_sql)?;
    let articles = stmt
        .query_map(params_from_iter(values.iter()), article_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Page::new(articles, request, total as u64))
}

pub fn find_article_by_id(conn: &Connection, id: i64) -> AdapterResult<Option<Article>> {
    let sql = format!("{ARTICLE_SELECT} WHERE a.id = ?1");
    let article = conn.query_row(&sql, params![id], article_from_row).optional()?;
    Ok(article)
}

pub fn insert_article(conn: &Connection, article: &NewArticle, now: NaiveDateTime) -> AdapterResult<i64> {
    conn.execute(
        r#"
        INSERT INTO article
            (user_account_id, title, content, hashtag, created_at, created_by, modified_at, modified_by)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?5, ?6)
        "#,
        params![
            article.user_account_id,
            article.title,
            article.content,
            article.hashtag,
            now,
            article.actor,
        ],
    )
    .map_err(|err| AdapterError::from_constraint(err, "article"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_article(conn: &Connection, article: &Article) -> AdapterResult<usize> {
    let changed = conn.execute(
        r#"
        UPDATE article
        SET title = ?1, content = ?2, hashtag = ?3, modified_at = ?4, modified_by = ?5
        WHERE id = ?6
        "#,
        params![
            article.title,
            article.content,
            article.hashtag,
            article.audit.modified_at,
            article.audit.modified_by,
            article.id,
        ],
    )?;
    Ok(changed)
}

pub fn delete_article(conn: &Connection, id: i64, user_id: &str) -> AdapterResult<usize> {
    let deleted = conn.execute(
        r#"
        DELETE FROM article
        WHERE id = ?1
          AND user_account_id = (SELECT id FROM user_account WHERE user_id = ?2)
        "#,
        params![id, user_id],
    )?;
    Ok(deleted)
}

pub fn count_articles(conn: &Connection) -> AdapterResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM article", [], |row| row.get(0))?;
    Ok(count as u64)
}

pub fn find_distinct_hashtags(conn: &Connection) -> AdapterResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT hashtag FROM article WHERE hashtag IS NOT NULL AND hashtag <> '' ORDER BY hashtag",
    )?;
    let hashtags = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(hashtags)
}

// ---------------------------------------------------------------------------
// article_comment
// ---------------------------------------------------------------------------

pub fn find_comments_by_article_id(
    conn: &Connection,
    article_id: i64,
) -> AdapterResult<Vec<ArticleComment>> {
    let sql = format!("{COMMENT_SELECT} WHERE c.article_id = ?1 ORDER BY c.created_at DESC, c.id DESC");
    let mut stmt = conn.prepare(&sql)?;
    let comments = stmt
        .query_map(params![article_id], comment_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(comments)
}

pub fn find_comment_by_id(conn: &Connection, id: i64) -> AdapterResult<Option<ArticleComment>> {
    let sql = format!("{COMMENT_SELECT} WHERE c.id = ?1");
    let comment = conn.query_row(&sql, params![id], comment_from_row).optional()?;
    Ok(comment)
}

pub fn insert_comment(
    conn: &Connection,
    comment: &NewArticleComment,
    now: NaiveDateTime,
) -> AdapterResult<i64> {
    conn.execute(
        r#"
        INSERT INTO article_comment
            (article_id, user_account_id, content, created_at, created_by, modified_at, modified_by)
        VALUES (?1, ?2, ?3, ?4, ?5, ?4, ?5)
        "#,
        params![
            comment.article_id,
            comment.user_account_id,
            comment.content,
            now,
            comment.actor,
        ],
    )
    .map_err(|err| AdapterError::from_constraint(err, "article_comment"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_comment(conn: &Connection, comment: &ArticleComment) -> AdapterResult<usize> {
    let changed = conn.execute(
        "UPDATE article_comment SET content = ?1, modified_at = ?2, modified_by = ?3 WHERE id = ?4",
        params![
            comment.content,
            comment.audit.modified_at,
            comment.audit.modified_by,
            comment.id,
        ],
    )?;
    Ok(changed)
}

pub fn delete_comment(conn: &Connection, id: i64, user_id: &str) -> AdapterResult<usize> {
    let deleted = conn.execute(
        r#"
        DELETE FROM article_comment
        WHERE id = ?1
          AND user_account_id = (SELECT id FROM user_account WHERE user_id = ?2)
        "#,
        params![id, user_id],
    )?;
    Ok(deleted)
}
