//! Askama page models.
//!
//! Every page carries `current_user_id`, empty for anonymous visitors, which
//! the shared layout uses to show either the user or a login link. Values the
//! templates branch on are computed here so the templates stay free of
//! `Option` handling and comparisons.

use askama::Template;
use axum::response::Html;
use board_adapters::{Direction, Page, Sort, SortField};

use crate::dto::{ArticleCommentResponse, ArticleResponse, ArticleWithCommentsResponse};
use crate::errors::AppError;
use crate::services::SearchType;

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}

pub struct PageLink {
    pub label: String,
    pub href: String,
    pub is_current: bool,
}

/// The numbered bar under a list plus previous/next links. An empty href
/// means the link is disabled.
pub struct PaginationView {
    pub links: Vec<PageLink>,
    pub previous_href: String,
    pub next_href: String,
}

impl PaginationView {
    pub fn new<T>(bar_numbers: &[usize], page: &Page<T>, href: impl Fn(usize) -> String) -> Self {
        let links = bar_numbers
            .iter()
            .map(|&number| PageLink {
                label: (number + 1).to_string(),
                href: href(number),
                is_current: number == page.number,
            })
            .collect();
        let previous_href = if page.is_first() {
            String::new()
        } else {
            href(page.number - 1)
        };
        let next_href = if page.is_last() {
            String::new()
        } else {
            href(page.number + 1)
        };
        Self {
            links,
            previous_href,
            next_href,
        }
    }
}

pub struct SortLink {
    pub label: &'static str,
    pub href: String,
}

pub struct SearchTypeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Query state of the article list, used to build its links.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub search_type: Option<SearchType>,
    pub search_value: String,
    pub size: usize,
    pub sort: Sort,
}

impl ListQuery {
    pub fn href(&self, page: usize, sort: Sort) -> String {
        let mut href = format!(
            "/articles?page={page}&size={}&sort={},{}",
            self.size,
            sort.field.as_str(),
            sort.direction.as_str()
        );
        if let Some(search_type) = self.search_type.filter(|_| !self.search_value.is_empty()) {
            href.push_str(&format!(
                "&searchType={search_type}&searchValue={}",
                urlencoding::encode(&self.search_value)
            ));
        }
        href
    }

    /// Column header links. Clicking the active column flips its direction.
    pub fn sort_links(&self) -> Vec<SortLink> {
        [
            (SortField::Title, "Title"),
            (SortField::Hashtag, "Hashtag"),
            (SortField::UserId, "Author"),
            (SortField::CreatedAt, "Created"),
        ]
        .into_iter()
        .map(|(field, label)| {
            let direction = if self.sort.field == field {
                self.sort.direction.reverse()
            } else {
                Direction::Asc
            };
            SortLink {
                label,
                href: self.href(0, Sort::new(field, direction)),
            }
        })
        .collect()
    }

    pub fn search_type_options(&self) -> Vec<SearchTypeOption> {
        SearchType::ALL
            .into_iter()
            .map(|t| SearchTypeOption {
                value: t.as_str(),
                label: t.description(),
                selected: self.search_type == Some(t),
            })
            .collect()
    }
}

pub fn hashtag_href(hashtag: &str, page: usize) -> String {
    format!(
        "/articles/search-hashtag?searchValue={}&page={page}",
        urlencoding::encode(hashtag)
    )
}

#[derive(Template)]
#[template(path = "articles/index.html")]
pub struct ArticlesPage {
    pub current_user_id: String,
    pub articles: Vec<ArticleResponse>,
    pub total_elements: u64,
    pub search_value: String,
    pub search_types: Vec<SearchTypeOption>,
    pub sort_links: Vec<SortLink>,
    pub pagination: PaginationView,
}

pub struct CommentView {
    pub comment: ArticleCommentResponse,
    pub can_edit: bool,
    pub update_action: String,
    pub delete_action: String,
}

#[derive(Template)]
#[template(path = "articles/detail.html")]
pub struct ArticleDetailPage {
    pub current_user_id: String,
    pub article: ArticleWithCommentsResponse,
    pub comments: Vec<CommentView>,
    pub can_edit: bool,
    /// Empty when the article has no hashtag.
    pub hashtag_href: String,
    pub total_count: u64,
}

#[derive(Template)]
#[template(path = "articles/form.html")]
pub struct ArticleFormPage {
    pub current_user_id: String,
    pub heading: &'static str,
    pub form_action: String,
    pub title: String,
    pub content: String,
    pub hashtag: String,
    pub error: String,
    pub cancel_href: String,
}

pub struct HashtagLink {
    pub name: String,
    pub href: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "articles/search-hashtag.html")]
pub struct HashtagSearchPage {
    pub current_user_id: String,
    pub hashtags: Vec<HashtagLink>,
    pub selected: String,
    pub articles: Vec<ArticleResponse>,
    pub pagination: PaginationView,
}

#[derive(Template)]
#[template(path = "auth/login.html")]
pub struct LoginPage {
    pub current_user_id: String,
    pub user_id: String,
    pub error: String,
}

#[derive(Template)]
#[template(path = "auth/signup.html")]
pub struct SignupPage {
    pub current_user_id: String,
    pub user_id: String,
    pub email: String,
    pub nickname: String,
    pub memo: String,
    pub error: String,
}

#[derive(Template, Clone)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub current_user_id: String,
    pub status: u16,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_adapters::PageRequest;

    fn query() -> ListQuery {
        ListQuery {
            search_type: Some(SearchType::Title),
            search_value: "rust & co".to_string(),
            size: 10,
            sort: Sort::new(SortField::Title, Direction::Asc),
        }
    }

    #[test]
    fn test_list_href_encodes_keyword() {
        let href = query().href(2, Sort::default());
        assert_eq!(
            href,
            "/articles?page=2&size=10&sort=createdAt,desc&searchType=TITLE&searchValue=rust%20%26%20co"
        );
    }

    #[test]
    fn test_list_href_without_keyword_drops_search_type() {
        let mut q = query();
        q.search_value.clear();
        assert_eq!(q.href(0, q.sort), "/articles?page=0&size=10&sort=title,asc");
    }

    #[test]
    fn test_active_sort_column_flips_direction() {
        let links = query().sort_links();
        assert!(links[0].href.contains("sort=title,desc"));
        assert!(links[3].href.contains("sort=createdAt,asc"));
    }

    #[test]
    fn test_pagination_view_disables_edges() {
        let request = PageRequest::new(0, 10, Sort::default());
        let page: Page<()> = Page::new(Vec::new(), &request, 25);
        let view = PaginationView::new(&[0, 1, 2], &page, |n| format!("?page={n}"));

        assert_eq!(view.links.len(), 3);
        assert_eq!(view.links[0].label, "1");
        assert!(view.links[0].is_current);
        assert!(view.previous_href.is_empty());
        assert_eq!(view.next_href, "?page=1");
    }

    #[test]
    fn test_pagination_view_past_the_end() {
        let request = PageRequest::new(usize::MAX, 10, Sort::default());
        let page: Page<()> = Page::new(Vec::new(), &request, 25);
        let view = PaginationView::new(&[], &page, |n| format!("?page={n}"));

        assert!(view.links.is_empty());
        assert!(view.next_href.is_empty());
        assert_eq!(view.previous_href, format!("?page={}", usize::MAX - 1));
    }

    #[test]
    fn test_error_page_renders_message() {
        let html = ErrorPage {
            current_user_id: String::new(),
            status: 404,
            message: "article not found - article_id: 7".to_string(),
        }
        .render()
        .unwrap();
        assert!(html.contains("data-view=\"error\""));
        assert!(html.contains("article not found - article_id: 7"));
        assert!(html.contains("href=\"/login\""));
    }
}
