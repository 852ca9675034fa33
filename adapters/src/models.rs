//! Persistence entities for the board and the paging types shared by every
//! repository implementation.
//!
//! These models mirror the relational schema: an `Article` carries its author
//! as a fully loaded `UserAccount`, and so does an `ArticleComment`. Comments
//! are not embedded in `Article`; they are fetched per article through
//! `ArticleCommentRepository`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamps and actors stamped on every row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_at: NaiveDateTime,
    pub created_by: String,
    pub modified_at: NaiveDateTime,
    pub modified_by: String,
}

impl AuditFields {
    /// Fresh audit stamp for a row created by `actor` at `now`.
    pub fn created(actor: &str, now: NaiveDateTime) -> Self {
        Self {
            created_at: now,
            created_by: actor.to_string(),
            modified_at: now,
            modified_by: actor.to_string(),
        }
    }

    pub fn touch(&mut self, actor: &str, now: NaiveDateTime) {
        self.modified_at = now;
        self.modified_by = actor.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub user_id: String,
    /// PHC-formatted password hash, never the raw password.
    pub user_password: String,
    pub email: String,
    pub nickname: Option<String>,
    pub memo: Option<String>,
    pub audit: AuditFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserAccount {
    pub user_id: String,
    pub user_password: String,
    pub email: String,
    pub nickname: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub user_account: UserAccount,
    pub title: String,
    pub content: String,
    pub hashtag: Option<String>,
    pub audit: AuditFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    /// Primary key of the author's `UserAccount`.
    pub user_account_id: i64,
    pub title: String,
    pub content: String,
    pub hashtag: Option<String>,
    /// `user_id` recorded in the audit columns.
    pub actor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleComment {
    pub id: i64,
    pub article_id: i64,
    pub user_account: UserAccount,
    pub content: String,
    pub audit: AuditFields,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticleComment {
    pub article_id: i64,
    pub user_account_id: i64,
    pub content: String,
    pub actor: String,
}

/// Predicate applied by `ArticleRepository::find_all`.
///
/// The `*Containing` variants are ASCII case-insensitive substring matches.
/// `Hashtag` is an exact match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticleFilter {
    #[default]
    All,
    TitleContaining(String),
    ContentContaining(String),
    UserIdContaining(String),
    NicknameContaining(String),
    Hashtag(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Title,
    Hashtag,
    UserId,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Parses the field names used in `sort=` query strings.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "hashtag" => Some(Self::Hashtag),
            "userId" | "userAccount.userId" => Some(Self::UserId),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Hashtag => "hashtag",
            Self::UserId => "userId",
            Self::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

impl Direction {
    pub fn parse(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("asc") {
            Some(Self::Asc)
        } else if name.eq_ignore_ascii_case("desc") {
            Some(Self::Desc)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn reverse(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

impl Sort {
    pub fn new(field: SortField, direction: Direction) -> Self {
        Self { field, direction }
    }

    /// Parses `field` or `field,direction`, e.g. `title,asc`.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(2, ',');
        let field = SortField::parse(parts.next()?.trim())?;
        let direction = match parts.next() {
            Some(dir) => Direction::parse(dir.trim())?,
            None => Direction::Asc,
        };
        Some(Self { field, direction })
    }
}

/// A zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort: Sort) -> Self {
        Self {
            page,
            size: size.max(1),
            sort,
        }
    }

    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, 10, Sort::default())
    }
}

/// One page of results plus enough totals to render a pagination bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: u64,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let size = request.size.max(1);
        let total_pages = (total_elements as usize).div_ceil(size);
        Self {
            content,
            number: request.page,
            size,
            total_elements,
            total_pages,
        }
    }

    pub fn empty(request: &PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages
    }
}
