//! Shared application state handed to every handler.

use std::sync::Arc;

use board_adapters::{ArticleCommentRepository, ArticleRepository, UserAccountRepository};

use crate::auth::AuthService;
use crate::config::Config;
use crate::services::{ArticleCommentService, ArticleService, PaginationService};

pub struct AppState {
    pub config: Config,
    pub articles: ArticleService,
    pub comments: ArticleCommentService,
    pub pagination: PaginationService,
    pub auth: AuthService,
}

impl AppState {
    /// Wires every service to one store implementing all repositories.
    pub fn new<S>(config: Config, store: Arc<S>) -> Arc<Self>
    where
        S: ArticleRepository + ArticleCommentRepository + UserAccountRepository + 'static,
    {
        let articles = ArticleService::new(store.clone(), store.clone());
        let comments = ArticleCommentService::new(store.clone(), store.clone());
        let auth = AuthService::new(store, config.session_ttl);
        Arc::new(Self {
            config,
            articles,
            comments,
            pagination: PaginationService,
            auth,
        })
    }
}
