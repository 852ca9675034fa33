use std::sync::Arc;

use board_adapters::{ArticleCommentRepository, ArticleRepository, NewArticleComment};
use chrono::Local;
use tracing::{debug, warn};

use crate::dto::{ArticleCommentDto, ArticleCommentRequest, UserAccountDto};
use crate::errors::AppError;

pub struct ArticleCommentService {
    article_repository: Arc<dyn ArticleRepository>,
    article_comment_repository: Arc<dyn ArticleCommentRepository>,
}

impl ArticleCommentService {
    pub fn new(
        article_repository: Arc<dyn ArticleRepository>,
        article_comment_repository: Arc<dyn ArticleCommentRepository>,
    ) -> Self {
        Self {
            article_repository,
            article_comment_repository,
        }
    }

    pub async fn search_article_comments(
        &self,
        article_id: i64,
    ) -> Result<Vec<ArticleCommentDto>, AppError> {
        let comments = self
            .article_comment_repository
            .find_by_article_id(article_id)
            .await?;
        Ok(comments.iter().map(ArticleCommentDto::from_entity).collect())
    }

    /// Saves a comment. When the article is gone the request is logged and
    /// dropped without touching the comment table.
    pub async fn save_article_comment(
        &self,
        user: &UserAccountDto,
        request: ArticleCommentRequest,
    ) -> Result<(), AppError> {
        request.validate()?;

        if self
            .article_repository
            .find_by_id(request.article_id)
            .await?
            .is_none()
        {
            warn!(
                "Failed to save comment. Article not found - article_id: {}",
                request.article_id
            );
            return Ok(());
        }

        let saved = self
            .article_comment_repository
            .insert(NewArticleComment {
                article_id: request.article_id,
                user_account_id: user.id,
                content: request.content,
                actor: user.user_id.clone(),
            })
            .await?;
        debug!(comment_id = saved.id, article_id = saved.article_id, "Saved comment");
        Ok(())
    }

    pub async fn update_article_comment(
        &self,
        comment_id: i64,
        user: &UserAccountDto,
        content: &str,
    ) -> Result<(), AppError> {
        let Some(mut comment) = self.article_comment_repository.find_by_id(comment_id).await? else {
            warn!("Failed to update comment. Comment not found - comment_id: {comment_id}");
            return Ok(());
        };
        if comment.user_account.user_id != user.user_id {
            warn!(
                "Failed to update comment. {} is not the author - comment_id: {comment_id}",
                user.user_id
            );
            return Ok(());
        }

        ArticleCommentRequest {
            article_id: comment.article_id,
            content: content.to_string(),
        }
        .validate()?;

        comment.content = content.to_string();
        comment.audit.touch(&user.user_id, Local::now().naive_local());
        self.article_comment_repository.update(&comment).await?;
        Ok(())
    }

    pub async fn delete_article_comment(
        &self,
        comment_id: i64,
        user: &UserAccountDto,
    ) -> Result<(), AppError> {
        self.article_comment_repository
            .delete_by_id_and_user_id(comment_id, &user.user_id)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::{self, Recording};
    use board_adapters::InMemoryStore;

    struct Fixture {
        store: Arc<InMemoryStore>,
        articles: Arc<Recording<InMemoryStore>>,
        comments: Arc<Recording<InMemoryStore>>,
        sut: ArticleCommentService,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let articles = Recording::new(store.clone());
        let comments = Recording::new(store.clone());
        let sut = ArticleCommentService::new(articles.clone(), comments.clone());
        Fixture {
            store,
            articles,
            comments,
            sut,
        }
    }

    #[tokio::test]
    async fn test_search_comments_by_article_id() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let article = testing::article(&f.store, &kim, "post", None).await;
        testing::comment(&f.store, &article, &kim, "content").await;

        let actual = f.sut.search_article_comments(article.id).await.unwrap();

        assert_eq!(actual.len(), 1);
        assert_eq!(actual[0].content, "content");
        assert_eq!(
            f.comments.calls(),
            vec![format!("find_by_article_id({})", article.id)]
        );
    }

    #[tokio::test]
    async fn test_save_comment() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let article = testing::article(&f.store, &kim, "post", None).await;

        f.sut
            .save_article_comment(
                &UserAccountDto::from_entity(&kim),
                ArticleCommentRequest {
                    article_id: article.id,
                    content: "comment".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(f.articles.calls(), vec![format!("find_by_id({})", article.id)]);
        assert_eq!(f.comments.calls(), vec!["insert(comment)".to_string()]);
        assert_eq!(f.store.find_by_article_id(article.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_comment_for_missing_article_logs_and_does_nothing() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;

        f.sut
            .save_article_comment(
                &UserAccountDto::from_entity(&kim),
                ArticleCommentRequest {
                    article_id: 1,
                    content: "comment".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(f.articles.calls(), vec!["find_by_id(1)".to_string()]);
        assert!(f.comments.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_comment() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let article = testing::article(&f.store, &kim, "post", None).await;
        let comment = testing::comment(&f.store, &article, &kim, "content").await;

        f.sut
            .update_article_comment(comment.id, &UserAccountDto::from_entity(&kim), "updated")
            .await
            .unwrap();

        let updated = ArticleCommentRepository::find_by_id(f.store.as_ref(), comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(updated.content, "content");
        assert_eq!(updated.content, "updated");
        assert_eq!(
            f.comments.calls(),
            vec![format!("find_by_id({})", comment.id), format!("update({})", comment.id)]
        );
    }

    #[tokio::test]
    async fn test_update_missing_comment_logs_and_does_nothing() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;

        f.sut
            .update_article_comment(1, &UserAccountDto::from_entity(&kim), "updated")
            .await
            .unwrap();

        assert_eq!(f.comments.calls(), vec!["find_by_id(1)".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let article = testing::article(&f.store, &kim, "post", None).await;
        let comment = testing::comment(&f.store, &article, &kim, "content").await;

        f.sut
            .delete_article_comment(comment.id, &UserAccountDto::from_entity(&kim))
            .await
            .unwrap();

        assert_eq!(
            f.comments.calls(),
            vec![format!("delete_by_id_and_user_id({}, kim)", comment.id)]
        );
        assert!(f.store.find_by_article_id(article.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_by_other_user_does_nothing() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let lee = testing::account(&f.store, "lee").await;
        let article = testing::article(&f.store, &kim, "post", None).await;
        let comment = testing::comment(&f.store, &article, &kim, "content").await;

        f.sut
            .update_article_comment(comment.id, &UserAccountDto::from_entity(&lee), "hijacked")
            .await
            .unwrap();

        let unchanged = ArticleCommentRepository::find_by_id(f.store.as_ref(), comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.content, "content");
        assert_eq!(unchanged.audit.modified_by, "kim");
        assert_eq!(f.comments.calls(), vec![format!("find_by_id({})", comment.id)]);
    }

    #[tokio::test]
    async fn test_update_with_blank_content_is_bad_request() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let article = testing::article(&f.store, &kim, "post", None).await;
        let comment = testing::comment(&f.store, &article, &kim, "content").await;

        let err = f
            .sut
            .update_article_comment(comment.id, &UserAccountDto::from_entity(&kim), "   ")
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
        let unchanged = ArticleCommentRepository::find_by_id(f.store.as_ref(), comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.content, "content");
        assert_eq!(f.comments.calls(), vec![format!("find_by_id({})", comment.id)]);
    }

    #[tokio::test]
    async fn test_delete_by_other_user_keeps_comment() {
        let f = fixture();
        let kim = testing::account(&f.store, "kim").await;
        let lee = testing::account(&f.store, "lee").await;
        let article = testing::article(&f.store, &kim, "post", None).await;
        let comment = testing::comment(&f.store, &article, &kim, "content").await;

        f.sut
            .delete_article_comment(comment.id, &UserAccountDto::from_entity(&lee))
            .await
            .unwrap();

        assert_eq!(
            f.comments.calls(),
            vec![format!("delete_by_id_and_user_id({}, lee)", comment.id)]
        );
        let remaining = f.store.find_by_article_id(article.id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, comment.id);
    }
}
