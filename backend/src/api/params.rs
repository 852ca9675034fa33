use board_adapters::{PageRequest, Sort};
use serde::Deserialize;

use crate::errors::AppError;
use crate::services::SearchType;

pub const MAX_PAGE_SIZE: usize = 100;

/// Query string of the article list, the hashtag page and `/api/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub search_type: Option<String>,
    pub search_value: Option<String>,
    pub page: Option<usize>,
    pub size: Option<usize>,
    /// `field` or `field,direction`.
    pub sort: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ListParams {
    pub fn page_request(&self, default_size: usize) -> Result<PageRequest, AppError> {
        let sort = match non_blank(self.sort.as_deref()) {
            Some(raw) => Sort::parse(raw)
                .ok_or_else(|| AppError::BadRequest(format!("unsupported sort: {raw}")))?,
            None => Sort::default(),
        };
        let size = self.size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE);
        let page = self.page.unwrap_or(0);
        // The row offset has to fit a SQLite integer.
        let max_page = usize::try_from(i64::MAX).unwrap_or(usize::MAX) / size;
        if page > max_page {
            return Err(AppError::BadRequest(format!("page out of range: {page}")));
        }
        Ok(PageRequest::new(page, size, sort))
    }

    pub fn search_type(&self) -> Result<Option<SearchType>, AppError> {
        non_blank(self.search_type.as_deref())
            .map(str::parse::<SearchType>)
            .transpose()
    }

    pub fn search_value(&self) -> String {
        non_blank(self.search_value.as_deref())
            .unwrap_or_default()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_adapters::{Direction, SortField};

    #[test]
    fn test_defaults() {
        let request = ListParams::default().page_request(10).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, 10);
        assert_eq!(request.sort, Sort::new(SortField::CreatedAt, Direction::Desc));
    }

    #[test]
    fn test_size_is_capped_and_sort_parsed() {
        let params = ListParams {
            size: Some(5000),
            sort: Some("title,asc".to_string()),
            ..ListParams::default()
        };
        let request = params.page_request(10).unwrap();
        assert_eq!(request.size, MAX_PAGE_SIZE);
        assert_eq!(request.sort, Sort::new(SortField::Title, Direction::Asc));
    }

    #[test]
    fn test_unknown_sort_or_search_type_is_bad_request() {
        let params = ListParams {
            sort: Some("password".to_string()),
            search_type: Some("EVERYTHING".to_string()),
            ..ListParams::default()
        };
        assert!(matches!(params.page_request(10), Err(AppError::BadRequest(_))));
        assert!(matches!(params.search_type(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_huge_page_is_bad_request() {
        let params = ListParams {
            page: Some(usize::MAX),
            size: Some(10),
            ..ListParams::default()
        };
        assert!(matches!(params.page_request(10), Err(AppError::BadRequest(_))));

        let params = ListParams {
            page: Some(1_000_000),
            ..ListParams::default()
        };
        assert_eq!(params.page_request(10).unwrap().page, 1_000_000);
    }

    #[test]
    fn test_blank_search_type_means_none() {
        let params = ListParams {
            search_type: Some(" ".to_string()),
            search_value: Some("  rust ".to_string()),
            ..ListParams::default()
        };
        assert_eq!(params.search_type().unwrap(), None);
        assert_eq!(params.search_value(), "rust");
    }
}
