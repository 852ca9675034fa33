//! Article pages: the list, detail view, hashtag search, and the new/edit
//! forms.

pub mod handlers;
pub mod routes;
