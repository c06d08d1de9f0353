//! Page-number pagination primitives shared by the contact book server and
//! client.
//!
//! Endpoints accept a `page` and a `limit` from untrusted input. Rather than
//! rejecting out-of-range values, [`PageRequest::clamped`] coerces them into
//! the supported window:
//!
//! - `page` is at least [`MIN_PAGE`];
//! - `limit` lies within [`MIN_LIMIT`]`..=`[`MAX_LIMIT`].
//!
//! Responses wrap a page of items in [`Paginated`], whose
//! [`PaginationMeta`] is derived entirely from the clamped request and the
//! total row count observed in the same read.
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, Paginated};
//!
//! let request = PageRequest::clamped(2, 6);
//! let page = Paginated::new(vec!["g", "h", "i", "j", "k", "l"], request, 13);
//!
//! assert_eq!(page.pagination.total_pages, 3);
//! assert!(page.pagination.has_next);
//! assert!(page.pagination.has_prev);
//! ```

use serde::{Deserialize, Serialize};

/// Smallest page number a request can address.
pub const MIN_PAGE: u64 = 1;
/// Smallest page size a request can ask for.
pub const MIN_LIMIT: u64 = 1;
/// Largest page size a request can ask for.
pub const MAX_LIMIT: u64 = 50;
/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u64 = 10;

/// A clamped page-number request.
///
/// ## Invariants
/// - `page >= MIN_PAGE`
/// - `MIN_LIMIT <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request, silently clamping out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::clamped(0, 5), PageRequest::clamped(1, 5));
    /// assert_eq!(PageRequest::clamped(1, 1000).limit(), 50);
    /// assert_eq!(PageRequest::clamped(-5, -5), PageRequest::clamped(1, 1));
    /// ```
    #[must_use]
    pub fn clamped(page: i64, limit: i64) -> Self {
        let page = page.max(1).unsigned_abs();
        let limit = limit.clamp(1, 50).unsigned_abs();
        Self { page, limit }
    }

    /// Build a request from optional inputs, substituting defaults first.
    ///
    /// A missing page means the first page; a missing limit means
    /// [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn from_optional(page: Option<i64>, limit: Option<i64>) -> Self {
        let default_limit = i64::try_from(DEFAULT_LIMIT).unwrap_or(i64::MAX);
        Self::clamped(page.unwrap_or(1), limit.unwrap_or(default_limit))
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items preceding this page, saturating on overflow.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: MIN_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata describing a window over the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// One-based page number that was served.
    pub page: u64,
    /// Page size that was applied.
    pub limit: u64,
    /// Total number of items across all pages.
    pub total: u64,
    /// `ceil(total / limit)`; zero when there are no items.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Derive metadata for `request` over a result set of `total` items.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit);
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next: request.page < total_pages,
            has_prev: request.page > 1,
        }
    }
}

/// A page of items together with its [`PaginationMeta`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items on the requested page, in presentation order.
    pub data: Vec<T>,
    /// Window metadata.
    pub pagination: PaginationMeta,
}

impl<T> Paginated<T> {
    /// Wrap `data` for `request`, given the total size of the result set.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            data,
            pagination: PaginationMeta::new(request, total),
        }
    }

    /// Convert every item while keeping the window metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
