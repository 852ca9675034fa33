use chrono::NaiveDateTime;
use serde::Serialize;

use super::{ArticleCommentDto, ArticleDto, ArticleWithCommentsDto};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Empty when the article has no hashtag.
    pub hashtag: String,
    pub created_at: NaiveDateTime,
    pub email: String,
    pub nickname: String,
    pub user_id: String,
}

impl From<ArticleDto> for ArticleResponse {
    fn from(dto: ArticleDto) -> Self {
        Self {
            id: dto.id,
            nickname: dto.user_account.display_name().to_string(),
            email: dto.user_account.email,
            user_id: dto.user_account.user_id,
            title: dto.title,
            content: dto.content,
            hashtag: dto.hashtag.unwrap_or_default(),
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCommentResponse {
    pub id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub email: String,
    pub nickname: String,
    pub user_id: String,
}

impl From<ArticleCommentDto> for ArticleCommentResponse {
    fn from(dto: ArticleCommentDto) -> Self {
        Self {
            id: dto.id,
            nickname: dto.user_account.display_name().to_string(),
            email: dto.user_account.email,
            user_id: dto.user_account.user_id,
            content: dto.content,
            created_at: dto.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleWithCommentsResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub hashtag: String,
    pub created_at: NaiveDateTime,
    pub email: String,
    pub nickname: String,
    pub user_id: String,
    pub article_comment_responses: Vec<ArticleCommentResponse>,
}

impl From<ArticleWithCommentsDto> for ArticleWithCommentsResponse {
    fn from(dto: ArticleWithCommentsDto) -> Self {
        Self {
            id: dto.id,
            nickname: dto.user_account.display_name().to_string(),
            email: dto.user_account.email,
            user_id: dto.user_account.user_id,
            title: dto.title,
            content: dto.content,
            hashtag: dto.hashtag.unwrap_or_default(),
            created_at: dto.created_at,
            article_comment_responses: dto
                .article_comments
                .into_iter()
                .map(ArticleCommentResponse::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::fixtures;

    #[test]
    fn test_nickname_falls_back_to_user_id() {
        let mut kim = fixtures::user_account(1, "kim");
        kim.nickname = None;
        let response = ArticleResponse::from(ArticleDto::from_entity(&fixtures::article(1, &kim)));
        assert_eq!(response.nickname, "kim");
        assert_eq!(response.email, "kim@gmail.com");
    }

    #[test]
    fn test_with_comments_response_serializes_camel_case() {
        let kim = fixtures::user_account(1, "kim");
        let article = fixtures::article(2, &kim);
        let comments = vec![fixtures::article_comment(1, 2, &kim, "hello")];
        let response =
            ArticleWithCommentsResponse::from(ArticleWithCommentsDto::from_parts(&article, &comments));

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"articleCommentResponses\":["));
        assert!(json.contains("\"nickname\":\"KIM\""));
        assert!(json.contains("\"content\":\"hello\""));
    }
}
