use board_adapters::{Article, ArticleComment};
use chrono::NaiveDateTime;

use super::{ArticleCommentDto, UserAccountDto};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleDto {
    pub id: i64,
    pub user_account: UserAccountDto,
    pub title: String,
    pub content: String,
    pub hashtag: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: String,
    pub modified_at: NaiveDateTime,
    pub modified_by: String,
}

impl ArticleDto {
    pub fn from_entity(entity: &Article) -> Self {
        Self {
            id: entity.id,
            user_account: UserAccountDto::from_entity(&entity.user_account),
            title: entity.title.clone(),
            content: entity.content.clone(),
            hashtag: entity.hashtag.clone(),
            created_at: entity.audit.created_at,
            created_by: entity.audit.created_by.clone(),
            modified_at: entity.audit.modified_at,
            modified_by: entity.audit.modified_by.clone(),
        }
    }
}

/// An article together with its comments, newest comment first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleWithCommentsDto {
    pub id: i64,
    pub user_account: UserAccountDto,
    pub article_comments: Vec<ArticleCommentDto>,
    pub title: String,
    pub content: String,
    pub hashtag: Option<String>,
    pub created_at: NaiveDateTime,
    pub created_by: String,
    pub modified_at: NaiveDateTime,
    pub modified_by: String,
}

impl ArticleWithCommentsDto {
    pub fn from_parts(article: &Article, comments: &[ArticleComment]) -> Self {
        Self {
            id: article.id,
            user_account: UserAccountDto::from_entity(&article.user_account),
            article_comments: comments.iter().map(ArticleCommentDto::from_entity).collect(),
            title: article.title.clone(),
            content: article.content.clone(),
            hashtag: article.hashtag.clone(),
            created_at: article.audit.created_at,
            created_by: article.audit.created_by.clone(),
            modified_at: article.audit.modified_at,
            modified_by: article.audit.modified_by.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::fixtures;

    #[test]
    fn test_from_parts_keeps_comment_order() {
        let kim = fixtures::user_account(1, "kim");
        let article = fixtures::article(10, &kim);
        let comments = vec![
            fixtures::article_comment(3, 10, &kim, "newest"),
            fixtures::article_comment(1, 10, &kim, "oldest"),
        ];

        let dto = ArticleWithCommentsDto::from_parts(&article, &comments);
        assert_eq!(dto.id, 10);
        assert_eq!(dto.user_account.user_id, "kim");
        let contents: Vec<_> = dto.article_comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["newest", "oldest"]);
    }

    #[test]
    fn test_article_dto_from_entity() {
        let kim = fixtures::user_account(1, "kim");
        let dto = ArticleDto::from_entity(&fixtures::article(5, &kim));
        assert_eq!(dto.title, "title");
        assert_eq!(dto.hashtag.as_deref(), Some("#java"));
        assert_eq!(dto.created_by, "kim");
    }
}
