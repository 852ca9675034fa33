//! Data-transfer shapes between the service layer and the handlers.
//!
//! `*Dto` types mirror persistence entities one to one. `*Request` types are
//! what forms post in. `*Response` types are flattened for templates and JSON.

mod article;
mod article_comment;
mod request;
mod response;
mod user_account;

pub use article::{ArticleDto, ArticleWithCommentsDto};
pub use article_comment::ArticleCommentDto;
pub use request::{ArticleCommentRequest, ArticleRequest};
pub use response::{ArticleCommentResponse, ArticleResponse, ArticleWithCommentsResponse};
pub use user_account::UserAccountDto;
