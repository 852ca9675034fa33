//! Article listing, search, and authoring.

use std::{fmt, str::FromStr, sync::Arc};

use board_adapters::{
    ArticleCommentRepository, ArticleFilter, ArticleRepository, NewArticle, Page, PageRequest,
};
use chrono::Local;
use tracing::{debug, warn};

use crate::dto::{ArticleDto, ArticleRequest, ArticleWithCommentsDto, UserAccountDto};
use crate::errors::AppError;

/// What the keyword on the article list is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    Title,
    Content,
    Id,
    Nickname,
    Hashtag,
}

impl SearchType {
    pub const ALL: [SearchType; 5] = [
        SearchType::Title,
        SearchType::Content,
        SearchType::Id,
        SearchType::Nickname,
        SearchType::Hashtag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Title => "TITLE",
            SearchType::Content => "CONTENT",
            SearchType::Id => "ID",
            SearchType::Nickname => "NICKNAME",
            SearchType::Hashtag => "HASHTAG",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SearchType::Title => "Title",
            SearchType::Content => "Content",
            SearchType::Id => "User ID",
            SearchType::Nickname => "Nickname",
            SearchType::Hashtag => "Hashtag",
        }
    }

    fn filter(&self, keyword: &str) -> ArticleFilter {
        match self {
            SearchType::Title => ArticleFilter::TitleContaining(keyword.to_string()),
            SearchType::Content => ArticleFilter::ContentContaining(keyword.to_string()),
            SearchType::Id => ArticleFilter::UserIdContaining(keyword.to_string()),
            SearchType::Nickname => ArticleFilter::NicknameContaining(keyword.to_string()),
            SearchType::Hashtag => {
                ArticleFilter::Hashtag(format!("#{}", keyword.trim_start_matches('#')))
            }
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::BadRequest(format!("unknown search type: {s}")))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct ArticleService {
    article_repository: Arc<dyn ArticleRepository>,
    article_comment_repository: Arc<dyn ArticleCommentRepository>,
}

impl ArticleService {
    pub fn new(
        article_repository: Arc<dyn ArticleRepository>,
        article_comment_repository: Arc<dyn ArticleCommentRepository>,
    ) -> Self {
        Self {
            article_repository,
            article_comment_repository,
        }
    }

    /// Lists articles, narrowed by `search_type` when a keyword is given.
    pub async fn search_articles(
        &self,
        search_type: Option<SearchType>,
        search_keyword: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<ArticleDto>, AppError> {
        let filter = match (search_type, non_blank(search_keyword)) {
            (Some(search_type), Some(keyword)) => search_type.filter(keyword),
            _ => ArticleFilter::All,
        };
        debug!(?filter, page = request.page, "Searching articles");

        let page = self.article_repository.find_all(&filter, request).await?;
        Ok(page.map(|article| ArticleDto::from_entity(&article)))
    }

    pub async fn search_articles_via_hashtag(
        &self,
        hashtag: Option<&str>,
        request: &PageRequest,
    ) -> Result<Page<ArticleDto>, AppError> {
        let Some(hashtag) = non_blank(hashtag) else {
            return Ok(Page::empty(request));
        };

        let filter = ArticleFilter::Hashtag(hashtag.to_string());
        let page = self.article_repository.find_all(&filter, request).await?;
        Ok(page.map(|article| ArticleDto::from_entity(&article)))
    }

    pub async fn get_article(&self, article_id: i64) -> Result<ArticleWithCommentsDto, AppError> {
        let article = self
            .article_repository
            .find_by_id(article_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("article not found - article_id: {article_id}")))?;
        let comments = self
            .article_comment_repository
            .find_by_article_id(article_id)
            .await?;

        Ok(ArticleWithCommentsDto::from_parts(&article, &comments))
    }

    pub async fn save_article(
        &self,
        user: &UserAccountDto,
        request: ArticleRequest,
    ) -> Result<ArticleDto, AppError> {
        request.validate()?;
        let hashtag = request.hashtag();
        let saved = self
            .article_repository
            .insert(NewArticle {
                user_account_id: user.id,
                title: request.title.trim().to_string(),
                content: request.content,
                hashtag,
                actor: user.user_id.clone(),
            })
            .await?;

        debug!(article_id = saved.id, user_id = %user.user_id, "Saved article");
        Ok(ArticleDto::from_entity(&saved))
    }

    /// Overwrites title, content and hashtag. A missing article, or one
    /// written by somebody else, is logged and left alone.
    pub async fn update_article(
        &self,
        article_id: i64,
        user: &UserAccountDto,
        request: ArticleRequest,
    ) -> Result<(), AppError> {
        request.validate()?;

        let Some(mut article) = self.article_repository.find_by_id(article_id).await? else {
            warn!("Failed to update article. Article not found - article_id: {article_id}");
            return Ok(());
        };
        if article.user_account.user_id != user.user_id {
            warn!(
                "Failed to update article. {} is not the author - article_id: {article_id}",
                user.user_id
            );
            return Ok(());
        }

        article.hashtag = request.hashtag();
        article.title = request.title.trim().to_string();
        article.content = request.content;
        article.audit.touch(&user.user_id, Local::now().naive_local());

        self.article_repository.update(&article).await?;
        Ok(())
    }

    pub async fn delete_article(&self, article_id: i64, user: &UserAccountDto) -> Result<(), AppError> {
        self.article_repository
            .delete_by_id_and_user_id(article_id, &user.user_id)
            .await?;
        Ok(())
    }

    pub async fn get_article_count(&self) -> Result<u64, AppError> {
        Ok(self.article_repository.count().await?)
    }

    pub async fn get_hashtags(&self) -> Result<Vec<String>, AppError> {
        Ok(self.article_repository.find_all_distinct_hashtags().await?)
    }
}
