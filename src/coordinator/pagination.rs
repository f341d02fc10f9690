pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// 1-indexed page cursor. Out-of-range moves are ignored rather than clamped
/// into range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
    pub total_count: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total_pages: 1,
            total_count: 0,
        }
    }
}

impl Pagination {
    /// Returns true when the page actually changed.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page > self.total_pages || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Changing the page size always restarts from page 1.
    pub fn set_limit(&mut self, limit: u32) -> bool {
        if limit == 0 || limit == self.limit {
            return false;
        }
        self.limit = limit;
        self.page = 1;
        true
    }

    pub fn apply_totals(&mut self, total_pages: u32, total_count: u32) {
        self.total_pages = total_pages.max(1);
        self.total_count = total_count;
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}
