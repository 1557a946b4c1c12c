//! Offset pagination types.
//!
//! List endpoints accept an optional `page`/`limit` pair. When either half is
//! absent the whole result set is returned as page 1 with the `9999` limit
//! sentinel, so clients that never paginate keep working.

use serde::{Deserialize, Serialize};

/// The limit substituted when a request omits `page` or `limit`.
pub const ALL_ON_ONE_PAGE_LIMIT: u32 = 9999;

/// A client pagination request, both halves optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: Option<u32>,

    /// Maximum records per page.
    pub limit: Option<u32>,
}

impl PageRequest {
    /// Creates a request for an explicit page and limit.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Resolves the effective `(page, limit)` pair.
    ///
    /// Both halves must be present to paginate; a request carrying only one
    /// of them falls back to the all-on-one-page default, matching the
    /// behavior clients already depend on.
    pub fn effective(&self) -> (u32, u32) {
        match (self.page, self.limit) {
            (Some(page), Some(limit)) => (page.max(1), limit.max(1)),
            _ => (1, ALL_ON_ONE_PAGE_LIMIT),
        }
    }

    /// The number of records to skip for the effective page.
    pub fn skip(&self) -> usize {
        let (page, limit) = self.effective();
        ((page - 1) as usize).saturating_mul(limit as usize)
    }
}

/// A page of results plus the counters the response envelope reports.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    /// The records on this page.
    pub records: Vec<T>,

    /// Total matching records across all pages.
    pub total: u64,

    /// Total page count, `ceil(total / limit)`.
    pub total_pages: u32,

    /// The 1-based page this response covers.
    pub current_page: u32,

    /// The limit the page was sliced with.
    pub limit: u32,
}

impl<T> Page<T> {
    /// Assembles a page from a full count and the sliced records.
    pub fn new(records: Vec<T>, total: u64, request: &PageRequest) -> Self {
        let (page, limit) = request.effective();
        Self {
            records,
            total,
            total_pages: total.div_ceil(limit as u64) as u32,
            current_page: page,
            limit,
        }
    }

    /// Maps the records to a different type, keeping the counters.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            records: self.records.into_iter().map(f).collect(),
            total: self.total,
            total_pages: self.total_pages,
            current_page: self.current_page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_half_defaults_to_one_page() {
        assert_eq!(PageRequest::default().effective(), (1, ALL_ON_ONE_PAGE_LIMIT));
        let only_page = PageRequest {
            page: Some(3),
            limit: None,
        };
        assert_eq!(only_page.effective(), (1, ALL_ON_ONE_PAGE_LIMIT));
        let only_limit = PageRequest {
            page: None,
            limit: Some(5),
        };
        assert_eq!(only_limit.effective(), (1, ALL_ON_ONE_PAGE_LIMIT));
    }

    #[test]
    fn explicit_pair_is_honored() {
        let request = PageRequest::new(3, 10);
        assert_eq!(request.effective(), (3, 10));
        assert_eq!(request.skip(), 20);
    }

    #[test]
    fn zero_values_are_clamped() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.effective(), (1, 1));
        assert_eq!(request.skip(), 0);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::new(1, 2);
        let page = Page::new(vec![1, 2], 5, &request);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.limit, 2);

        let empty: Page<i32> = Page::new(Vec::new(), 0, &request);
        assert_eq!(empty.total_pages, 0);
    }
}
