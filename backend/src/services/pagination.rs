//! Page numbers for the pagination bar under article lists.

pub const BAR_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationService;

impl PaginationService {
    /// Zero-based page numbers to show around `current_page`, at most
    /// `BAR_LENGTH` of them, with the current page centred where possible.
    pub fn pagination_bar_numbers(&self, current_page: usize, total_pages: usize) -> Vec<usize> {
        let start = current_page.saturating_sub(BAR_LENGTH / 2);
        let end = start.saturating_add(BAR_LENGTH).min(total_pages);
        (start..end).collect()
    }

    pub fn current_bar_length(&self) -> usize {
        BAR_LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_bar_numbers() {
        let sut = PaginationService;
        let cases: [(usize, usize, Vec<usize>); 9] = [
            (0, 13, vec![0, 1, 2, 3, 4]),
            (1, 13, vec![0, 1, 2, 3, 4]),
            (2, 13, vec![0, 1, 2, 3, 4]),
            (3, 13, vec![1, 2, 3, 4, 5]),
            (4, 13, vec![2, 3, 4, 5, 6]),
            (5, 13, vec![3, 4, 5, 6, 7]),
            (10, 13, vec![8, 9, 10, 11, 12]),
            (11, 13, vec![9, 10, 11, 12]),
            (12, 13, vec![10, 11, 12]),
        ];
        for (current, total, expected) in cases {
            assert_eq!(
                sut.pagination_bar_numbers(current, total),
                expected,
                "current={current} total={total}"
            );
        }
    }

    #[test]
    fn test_no_pages_gives_empty_bar() {
        assert!(PaginationService.pagination_bar_numbers(0, 0).is_empty());
    }

    #[test]
    fn test_page_far_past_the_end_gives_empty_bar() {
        assert!(PaginationService
            .pagination_bar_numbers(usize::MAX, 3)
            .is_empty());
    }

    #[test]
    fn test_current_bar_length() {
        assert_eq!(PaginationService.current_bar_length(), 5);
    }
}
