//! Authentication module for user accounts, sessions and access control.
//!
//! This module provides sign-up, login and logout, the in-memory session
//! table behind the session cookie, and the extractors that guard pages
//! requiring a logged-in user.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;

// Re-exports for convenience
pub use errors::*;
pub use middleware::*;
pub use models::*;
pub use routes::*;
pub use service::*;
