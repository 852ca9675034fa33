use board_adapters::ArticleComment;
use chrono::NaiveDateTime;

use super::UserAccountDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCommentDto {
    pub id: i64,
    pub article_id: i64,
    pub user_account: UserAccountDto,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub created_by: String,
    pub modified_at: NaiveDateTime,
    pub modified_by: String,
}

impl ArticleCommentDto {
    pub fn from_entity(entity: &ArticleComment) -> Self {
        Self {
            id: entity.id,
            article_id: entity.article_id,
            user_account: UserAccountDto::from_entity(&entity.user_account),
            content: entity.content.clone(),
            created_at: entity.audit.created_at,
            created_by: entity.audit.created_by.clone(),
            modified_at: entity.audit.modified_at,
            modified_by: entity.audit.modified_by.clone(),
        }
    }
}
