use serde::Deserialize;

use crate::errors::AppError;

pub const TITLE_MAX: usize = 255;
pub const CONTENT_MAX: usize = 10_000;
pub const HASHTAG_MAX: usize = 255;
pub const COMMENT_MAX: usize = 500;

fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} must not be blank")));
    }
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Article form as posted by the new/edit pages.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub hashtag: Option<String>,
}

impl ArticleRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_text("title", &self.title, TITLE_MAX)?;
        check_text("content", &self.content, CONTENT_MAX)?;
        if let Some(hashtag) = self.hashtag() {
            if hashtag.chars().count() > HASHTAG_MAX {
                return Err(AppError::BadRequest(format!(
                    "hashtag must be at most {HASHTAG_MAX} characters"
                )));
            }
        }
        Ok(())
    }

    /// Trimmed hashtag with a leading `#`, or `None` when left blank.
    pub fn hashtag(&self) -> Option<String> {
        let raw = self.hashtag.as_deref()?.trim();
        if raw.is_empty() {
            None
        } else if raw.starts_with('#') {
            Some(raw.to_string())
        } else {
            Some(format!("#{raw}"))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCommentRequest {
    pub article_id: i64,
    pub content: String,
}

impl ArticleCommentRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        check_text("comment", &self.content, COMMENT_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, content: &str, hashtag: Option<&str>) -> ArticleRequest {
        ArticleRequest {
            title: title.to_string(),
            content: content.to_string(),
            hashtag: hashtag.map(str::to_string),
        }
    }

    #[test]
    fn test_hashtag_normalization() {
        assert_eq!(request("t", "c", Some("java")).hashtag().as_deref(), Some("#java"));
        assert_eq!(request("t", "c", Some(" #rust ")).hashtag().as_deref(), Some("#rust"));
        assert_eq!(request("t", "c", Some("   ")).hashtag(), None);
        assert_eq!(request("t", "c", None).hashtag(), None);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let err = request("  ", "content", None).validate().unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_oversized_content_is_rejected() {
        let content = "x".repeat(CONTENT_MAX + 1);
        assert!(request("title", &content, None).validate().is_err());
        assert!(request("title", "ok", Some("#tag")).validate().is_ok());
    }

    #[test]
    fn test_comment_validation() {
        let ok = ArticleCommentRequest { article_id: 1, content: "nice".into() };
        assert!(ok.validate().is_ok());
        let blank = ArticleCommentRequest { article_id: 1, content: "".into() };
        assert!(blank.validate().is_err());
    }
}
