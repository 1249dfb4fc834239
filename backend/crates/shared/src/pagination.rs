//! Offset pagination
//!
//! `page` and `per_page` are positive integers supplied by the client. The
//! derived values (`pages`, `has_next`, `has_prev`) are computed on every
//! response and never stored.

use serde::Serialize;

use crate::error::app_error::{AppError, AppResult};

/// Validated page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Build a page request from raw query values.
    ///
    /// Absent values fall back to page 1 and `default_per_page`. Zero or
    /// negative values are rejected; `per_page` above `max_per_page` is
    /// clamped.
    ///
    /// ```
    /// use kernel::pagination::PageRequest;
    /// let req = PageRequest::new(Some(2), None, 12, 100).unwrap();
    /// assert_eq!(req.offset(), 12);
    /// ```
    pub fn new(
        page: Option<i64>,
        per_page: Option<i64>,
        default_per_page: u32,
        max_per_page: u32,
    ) -> AppResult<Self> {
        let page = match page {
            None => 1,
            Some(p) if p >= 1 => u32::try_from(p).unwrap_or(u32::MAX),
            Some(_) => {
                return Err(AppError::bad_request("page must be a positive integer"));
            }
        };

        let per_page = match per_page {
            None => default_per_page,
            Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX).min(max_per_page),
            Some(_) => {
                return Err(AppError::bad_request("per_page must be a positive integer"));
            }
        };

        Ok(Self { page, per_page })
    }

    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[inline]
    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Rows to skip
    #[inline]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.per_page)
    }

    /// Rows to take
    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.per_page)
    }
}

/// Pagination block returned alongside every listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        let per_page = u64::from(request.per_page);
        let pages = total.div_ceil(per_page);

        Self {
            total,
            page: request.page,
            per_page: request.per_page,
            pages,
            has_next: u64::from(request.page) < pages,
            has_prev: request.page > 1,
        }
    }
}

/// A page of items together with its pagination block
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: Pagination::new(request, total),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
