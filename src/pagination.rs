//! Page window input and derived pagination metadata.

use serde::Serialize;

pub const DEFAULT_LIMIT: u32 = 10;
pub const MAX_LIMIT: u32 = 100;

/// Normalized page window: page >= 1, limit in [1, MAX_LIMIT].
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    /// Clamp raw query values into a valid window. Missing values fall back
    /// to page 1 / DEFAULT_LIMIT.
    pub fn clamp(page: Option<u32>, limit: Option<u32>) -> Self {
        Page {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::clamp(None, None)
    }
}

/// Navigation metadata for a windowed result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: i64,
    pub limit: u32,
    pub has_next: bool,
    pub has_prev: bool,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

impl PageMeta {
    pub fn new(page: Page, total_count: i64) -> Self {
        let total = total_count.max(0) as u64;
        let total_pages = (total.div_ceil(u64::from(page.limit))) as u32;
        let has_next = page.page < total_pages;
        let has_prev = page.page > 1;
        PageMeta {
            current_page: page.page,
            total_pages,
            total_count,
            limit: page.limit,
            has_next,
            has_prev,
            next_page: has_next.then(|| page.page + 1),
            prev_page: has_prev.then(|| page.page - 1),
        }
    }
}
