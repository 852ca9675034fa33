//! Module for core business logic services.
//!
//! Services sit between the HTTP handlers and the repositories: they map
//! entities to DTOs, validate requests and decide what a missing row means
//! (a 404, or a logged warning and a no-op).

pub mod article_comment_service;
pub mod article_service;
pub mod pagination;

pub use article_comment_service::ArticleCommentService;
pub use article_service::{ArticleService, SearchType};
pub use pagination::PaginationService;
