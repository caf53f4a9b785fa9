//! Page requests and paginated results shared by stores and queries.

use serde::{Deserialize, Serialize};

/// A page request. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Default page size when the caller does not ask for one.
    pub const DEFAULT_PER_PAGE: usize = 15;

    /// Upper bound on the page size a caller may request.
    pub const MAX_PER_PAGE: usize = 100;

    /// Creates a page request, clamping both values into their valid ranges.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Number of items to skip before this page starts.
    ///
    /// Saturates for page numbers far past the end of any result set.
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, Self::DEFAULT_PER_PAGE)
    }
}

/// One page of items plus the totals needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub per_page: usize,
    pub current_page: usize,
    pub last_page: usize,
}

impl<T> PaginatedResult<T> {
    /// Builds a result for `pagination`, deriving `last_page` from `total`.
    pub fn new(items: Vec<T>, total: usize, pagination: Pagination) -> Self {
        let last_page = total.div_ceil(pagination.per_page).max(1);
        Self {
            items,
            total,
            per_page: pagination.per_page,
            current_page: pagination.page,
            last_page,
        }
    }

    /// Converts every item, keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PaginatedResult<U> {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
        }
    }

    /// Fallible version of [`map`](Self::map).
    pub fn try_map<U, E>(
        self,
        f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<PaginatedResult<U>, E> {
        Ok(PaginatedResult {
            items: self.items.into_iter().map(f).collect::<Result<Vec<_>, _>>()?,
            total: self.total,
            per_page: self.per_page,
            current_page: self.current_page,
            last_page: self.last_page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_clamps_values() {
        let p = Pagination::new(0, 0);
        assert_eq!(p.page, 1);
        assert_eq!(p.per_page, 1);

        let p = Pagination::new(3, 1_000);
        assert_eq!(p.per_page, Pagination::MAX_PER_PAGE);
    }

    #[test]
    fn pagination_offset() {
        assert_eq!(Pagination::new(1, 10).offset(), 0);
        assert_eq!(Pagination::new(3, 10).offset(), 20);
    }

    #[test]
    fn pagination_offset_saturates_for_huge_pages() {
        let p = Pagination::new(usize::MAX, 15);
        assert_eq!(p.page, usize::MAX);
        assert_eq!(p.offset(), usize::MAX);
    }

    #[test]
    fn last_page_rounds_up() {
        let result = PaginatedResult::new(vec![1, 2], 21, Pagination::new(1, 10));
        assert_eq!(result.last_page, 3);
        assert_eq!(result.current_page, 1);
    }

    #[test]
    fn empty_result_has_one_page() {
        let result: PaginatedResult<i32> = PaginatedResult::new(vec![], 0, Pagination::default());
        assert_eq!(result.last_page, 1);
        assert_eq!(result.total, 0);
    }

    #[test]
    fn map_keeps_metadata() {
        let result = PaginatedResult::new(vec![1, 2, 3], 3, Pagination::new(1, 5));
        let mapped = result.map(|n| n * 10);
        assert_eq!(mapped.items, vec![10, 20, 30]);
        assert_eq!(mapped.per_page, 5);
    }
}
