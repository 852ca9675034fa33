//! Comment form targets. Every action redirects back to the article page.

pub mod handlers;
pub mod routes;
