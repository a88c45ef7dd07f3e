//! Offset pagination types for list operations.

use serde::{Deserialize, Serialize};

/// An offset/limit window over a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// Number of matching items to skip.
    pub skip: u64,
    /// Maximum number of items to return.
    pub limit: u64,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_LIMIT: u64 = 10;
    /// The maximum allowed page size.
    pub const MAX_LIMIT: u64 = 100;

    /// Creates a new page request, clamping the limit into `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(skip: u64, limit: u64) -> Self {
        Self {
            skip,
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_LIMIT)
    }

    /// Returns the 1-based page number that `skip` falls on.
    #[must_use]
    pub const fn page_number(&self) -> u64 {
        if self.limit == 0 {
            return 1;
        }
        (self.skip / self.limit).saturating_add(1)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Returns `ceil(total / limit)`, or 0 for a zero limit.
#[must_use]
pub const fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub users: Vec<T>,
    /// Number of items matching the filters before pagination.
    pub total: u64,
    /// 1-based page number.
    pub page: u64,
    /// The limit that produced this page.
    pub limit: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> Page<T> {
    /// Creates a new page from the items of one window and the total count.
    #[must_use]
    pub fn new(users: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            users,
            total,
            page: request.page_number(),
            limit: request.limit,
            total_pages: total_pages(total, request.limit),
        }
    }
}
