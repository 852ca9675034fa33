//! In-memory store with the same observable semantics as `SqliteStore`.
//!
//! Rows live in `BTreeMap`s keyed by primary key behind a single `RwLock`.
//! Authors are stored by id and joined on read, so an account change is
//! visible through every article and comment that references it.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};

use crate::errors::{AdapterError, AdapterResult};
use crate::models::{
    Article, ArticleComment, ArticleFilter, AuditFields, Direction, NewArticle, NewArticleComment,
    NewUserAccount, Page, PageRequest, SortField, UserAccount,
};
use crate::{ArticleCommentRepository, ArticleRepository, UserAccountRepository};

#[derive(Debug, Clone)]
struct ArticleRow {
    id: i64,
    user_account_id: i64,
    title: String,
    content: String,
    hashtag: Option<String>,
    audit: AuditFields,
}

#[derive(Debug, Clone)]
struct CommentRow {
    id: i64,
    article_id: i64,
    user_account_id: i64,
    content: String,
    audit: AuditFields,
}

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<i64, UserAccount>,
    articles: BTreeMap<i64, ArticleRow>,
    comments: BTreeMap<i64, CommentRow>,
    next_account_id: i64,
    next_article_id: i64,
    next_comment_id: i64,
}

impl Tables {
    fn account(&self, id: i64) -> AdapterResult<&UserAccount> {
        self.accounts
            .get(&id)
            .ok_or_else(|| AdapterError::Corrupt(format!("user account {id} is referenced but missing")))
    }

    fn account_by_user_id(&self, user_id: &str) -> Option<&UserAccount> {
        self.accounts.values().find(|a| a.user_id == user_id)
    }

    fn join_article(&self, row: &ArticleRow) -> AdapterResult<Article> {
        Ok(Article {
            id: row.id,
            user_account: self.account(row.user_account_id)?.clone(),
            title: row.title.clone(),
            content: row.content.clone(),
            hashtag: row.hashtag.clone(),
            audit: row.audit.clone(),
        })
    }

    fn join_comment(&self, row: &CommentRow) -> AdapterResult<ArticleComment> {
        Ok(ArticleComment {
            id: row.id,
            article_id: row.article_id,
            user_account: self.account(row.user_account_id)?.clone(),
            content: row.content.clone(),
            audit: row.audit.clone(),
        })
    }
}

fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

fn matches(filter: &ArticleFilter, article: &Article) -> bool {
    match filter {
        ArticleFilter::All => true,
        ArticleFilter::TitleContaining(k) => contains_ignore_ascii_case(&article.title, k),
        ArticleFilter::ContentContaining(k) => contains_ignore_ascii_case(&article.content, k),
        ArticleFilter::UserIdContaining(k) => {
            contains_ignore_ascii_case(&article.user_account.user_id, k)
        }
        ArticleFilter::NicknameContaining(k) => article
            .user_account
            .nickname
            .as_deref()
            .is_some_and(|nickname| contains_ignore_ascii_case(nickname, k)),
        ArticleFilter::Hashtag(h) => article.hashtag.as_deref() == Some(h.as_str()),
    }
}

fn compare(field: SortField, a: &Article, b: &Article) -> Ordering {
    let primary = match field {
        SortField::Title => a.title.cmp(&b.title),
        SortField::Hashtag => a.hashtag.cmp(&b.hashtag),
        SortField::UserId => a.user_account.user_id.cmp(&b.user_account.user_id),
        SortField::CreatedAt => a.audit.created_at.cmp(&b.audit.created_at),
    };
    primary.then(a.id.cmp(&b.id))
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AdapterResult<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|_| AdapterError::LockPoisoned)
    }

    fn write(&self) -> AdapterResult<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|_| AdapterError::LockPoisoned)
    }
}

#[async_trait]
impl ArticleRepository for InMemoryStore {
    async fn find_all(
        &self,
        filter: &ArticleFilter,
        request: &PageRequest,
    ) -> AdapterResult<Page<Article>> {
        let tables = self.read()?;
        let mut hits = tables
            .articles
            .values()
            .map(|row| tables.join_article(row))
            .collect::<AdapterResult<Vec<_>>>()?;
        hits.retain(|article| matches(filter, article));
        hits.sort_by(|a, b| {
            let ordering = compare(request.sort.field, a, b);
            match request.sort.direction {
                Direction::Asc => ordering,
                Direction::Desc => ordering.reverse(),
            }
        });

        let total = hits.len() as u64;
        let content = hits
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<Article>> {
        let tables = self.read()?;
        tables
            .articles
            .get(&id)
            .map(|row| tables.join_article(row))
            .transpose()
    }

    async fn insert(&self, article: NewArticle) -> AdapterResult<Article> {
        let mut tables = self.write()?;
        if !tables.accounts.contains_key(&article.user_account_id) {
            return Err(AdapterError::MissingReference("article".to_string()));
        }
        tables.next_article_id += 1;
        let row = ArticleRow {
            id: tables.next_article_id,
            user_account_id: article.user_account_id,
            title: article.title,
            content: article.content,
            hashtag: article.hashtag,
            audit: AuditFields::created(&article.actor, now()),
        };
        tables.articles.insert(row.id, row.clone());
        tables.join_article(&row)
    }

    async fn update(&self, article: &Article) -> AdapterResult<()> {
        let mut tables = self.write()?;
        if let Some(row) = tables.articles.get_mut(&article.id) {
            row.title = article.title.clone();
            row.content = article.content.clone();
            row.hashtag = article.hashtag.clone();
            row.audit.modified_at = article.audit.modified_at;
            row.audit.modified_by = article.audit.modified_by.clone();
        }
        Ok(())
    }

    async fn delete_by_id_and_user_id(&self, id: i64, user_id: &str) -> AdapterResult<()> {
        let mut tables = self.write()?;
        let Some(author) = tables.account_by_user_id(user_id).map(|a| a.id) else {
            return Ok(());
        };
        let owned = tables
            .articles
            .get(&id)
            .is_some_and(|row| row.user_account_id == author);
        if owned {
            tables.articles.remove(&id);
            tables.comments.retain(|_, comment| comment.article_id != id);
        }
        Ok(())
    }

    async fn count(&self) -> AdapterResult<u64> {
        Ok(self.read()?.articles.len() as u64)
    }

    async fn find_all_distinct_hashtags(&self) -> AdapterResult<Vec<String>> {
        let tables = self.read()?;
        let mut hashtags: Vec<String> = tables
            .articles
            .values()
            .filter_map(|row| row.hashtag.clone())
            .filter(|hashtag| !hashtag.is_empty())
            .collect();
        hashtags.sort();
        hashtags.dedup();
        Ok(hashtags)
    }
}

#[async_trait]
impl ArticleCommentRepository for InMemoryStore {
    async fn find_by_article_id(&self, article_id: i64) -> AdapterResult<Vec<ArticleComment>> {
        let tables = self.read()?;
        let mut comments = tables
            .comments
            .values()
            .filter(|row| row.article_id == article_id)
            .map(|row| tables.join_comment(row))
            .collect::<AdapterResult<Vec<_>>>()?;
        comments.sort_by(|a, b| {
            b.audit
                .created_at
                .cmp(&a.audit.created_at)
                .then(b.id.cmp(&a.id))
        });
        Ok(comments)
    }

    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<ArticleComment>> {
        let tables = self.read()?;
        tables
            .comments
            .get(&id)
            .map(|row| tables.join_comment(row))
            .transpose()
    }

    async fn insert(&self, comment: NewArticleComment) -> AdapterResult<ArticleComment> {
        let mut tables = self.write()?;
        if !tables.articles.contains_key(&comment.article_id)
            || !tables.accounts.contains_key(&comment.user_account_id)
        {
            return Err(AdapterError::MissingReference("article_comment".to_string()));
        }
        tables.next_comment_id += 1;
        let row = CommentRow {
            id: tables.next_comment_id,
            article_id: comment.article_id,
            user_account_id: comment.user_account_id,
            content: comment.content,
            audit: AuditFields::created(&comment.actor, now()),
        };
        tables.comments.insert(row.id, row.clone());
        tables.join_comment(&row)
    }

    async fn update(&self, comment: &ArticleComment) -> AdapterResult<()> {
        let mut tables = self.write()?;
        if let Some(row) = tables.comments.get_mut(&comment.id) {
            row.content = comment.content.clone();
            row.audit.modified_at = comment.audit.modified_at;
            row.audit.modified_by = comment.audit.modified_by.clone();
        }
        Ok(())
    }

    async fn delete_by_id_and_user_id(&self, id: i64, user_id: &str) -> AdapterResult<()> {
        let mut tables = self.write()?;
        let Some(author) = tables.account_by_user_id(user_id).map(|a| a.id) else {
            return Ok(());
        };
        let owned = tables
            .comments
            .get(&id)
            .is_some_and(|row| row.user_account_id == author);
        if owned {
            tables.comments.remove(&id);
        }
        Ok(())
    }
}

#[async_trait]
impl UserAccountRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> AdapterResult<Option<UserAccount>> {
        Ok(self.read()?.accounts.get(&id).cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> AdapterResult<Option<UserAccount>> {
        Ok(self.read()?.account_by_user_id(user_id).cloned())
    }

    async fn insert(&self, account: NewUserAccount) -> AdapterResult<UserAccount> {
        let mut tables = self.write()?;
        let duplicate = tables
            .accounts
            .values()
            .any(|a| a.user_id == account.user_id || a.email == account.email);
        if duplicate {
            return Err(AdapterError::Conflict(format!(
                "user_account: {} or {} already taken",
                account.user_id, account.email
            )));
        }
        tables.next_account_id += 1;
        let saved = UserAccount {
            id: tables.next_account_id,
            audit: AuditFields::created(&account.user_id, now()),
            user_id: account.user_id,
            user_password: account.user_password,
            email: account.email,
            nickname: account.nickname,
            memo: account.memo,
        };
        tables.accounts.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn count(&self) -> AdapterResult<u64> {
        Ok(self.read()?.accounts.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sort;

    async fn account(store: &InMemoryStore, user_id: &str, nickname: &str) -> UserAccount {
        UserAccountRepository::insert(
            store,
            NewUserAccount {
                user_id: user_id.to_string(),
                user_password: "hash".to_string(),
                email: format!("{user_id}@mail.com"),
                nickname: Some(nickname.to_string()),
                memo: None,
            },
        )
        .await
        .unwrap()
    }

    async fn article(store: &InMemoryStore, author: &UserAccount, title: &str, hashtag: &str) -> Article {
        ArticleRepository::insert(
            store,
            NewArticle {
                user_account_id: author.id,
                title: title.to_string(),
                content: "body".to_string(),
                hashtag: Some(hashtag.to_string()),
                actor: author.user_id.clone(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_nickname_search_and_sort() {
        let store = InMemoryStore::new();
        let kim = account(&store, "kim", "Kimchi").await;
        let lee = account(&store, "lee", "Leek").await;
        article(&store, &kim, "b", "#a").await;
        article(&store, &lee, "a", "#b").await;
        article(&store, &kim, "c", "#a").await;

        let page = store
            .find_all(
                &ArticleFilter::NicknameContaining("KIM".into()),
                &PageRequest::new(0, 10, Sort::new(SortField::Title, Direction::Desc)),
            )
            .await
            .unwrap();
        let titles: Vec<_> = page.content.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b"]);
        assert_eq!(page.total_elements, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let store = InMemoryStore::new();
        account(&store, "kim", "Kim").await;
        let err = UserAccountRepository::insert(
            &store,
            NewUserAccount {
                user_id: "other".to_string(),
                user_password: "hash".to_string(),
                email: "kim@mail.com".to_string(),
                nickname: None,
                memo: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AdapterError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_comment_on_missing_article_is_rejected() {
        let store = InMemoryStore::new();
        let kim = account(&store, "kim", "Kim").await;
        let err = ArticleCommentRepository::insert(
            &store,
            NewArticleComment {
                article_id: 42,
                user_account_id: kim.id,
                content: "hello".to_string(),
                actor: "kim".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AdapterError::MissingReference(_)));
    }

    #[tokio::test]
    async fn test_delete_article_cascades_and_checks_author() {
        let store = InMemoryStore::new();
        let kim = account(&store, "kim", "Kim").await;
        let lee = account(&store, "lee", "Lee").await;
        let post = article(&store, &kim, "post", "#a").await;
        ArticleCommentRepository::insert(
            &store,
            NewArticleComment {
                article_id: post.id,
                user_account_id: lee.id,
                content: "hi".to_string(),
                actor: "lee".to_string(),
            },
        )
        .await
        .unwrap();

        ArticleRepository::delete_by_id_and_user_id(&store, post.id, "lee")
            .await
            .unwrap();
        assert_eq!(ArticleRepository::count(&store).await.unwrap(), 1);

        ArticleRepository::delete_by_id_and_user_id(&store, post.id, "kim")
            .await
            .unwrap();
        assert_eq!(ArticleRepository::count(&store).await.unwrap(), 0);
        assert!(store.find_by_article_id(post.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_distinct_hashtags() {
        let store = InMemoryStore::new();
        let kim = account(&store, "kim", "Kim").await;
        article(&store, &kim, "1", "#rust").await;
        article(&store, &kim, "2", "#java").await;
        article(&store, &kim, "3", "#rust").await;

        assert_eq!(
            store.find_all_distinct_hashtags().await.unwrap(),
            vec!["#java".to_string(), "#rust".to_string()]
        );
    }
}
