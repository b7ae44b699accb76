//! Lookahead pagination over ordered sources.
//!
//! A page is produced with a single range fetch: the paginator asks the
//! source for `page_size + 1` items starting at `(page_index - 1) * page_size`
//! and uses the extra "lookahead" item only to decide whether another page
//! exists. No count query is issued.
//!
//! # Ordering
//!
//! The paginator never sorts. Results are only well-defined when the source
//! yields items in a stable order (e.g. `ORDER BY code, id`).
//!
//! # Example
//!
//! ```ignore
//! use drivedesk_core::pagination::{SliceSource, paginate};
//!
//! let numbers: Vec<i32> = (1..=10).collect();
//! let page = paginate(&SliceSource::new(&numbers), 1, 3).await?;
//!
//! assert_eq!(page.items(), &[1, 2, 3]);
//! assert!(page.has_next_page());
//! ```
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "pagedItems": [...],
//!   "pageIndex": 2,
//!   "pageSize": 10,
//!   "hasNextPage": true
//! }
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::serde::deserialize_optional_i64;

/// Which pagination argument failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageParameter {
    PageIndex,
    PageSize,
}

impl PageParameter {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PageIndex => "pageIndex",
            Self::PageSize => "pageSize",
        }
    }
}

impl fmt::Display for PageParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    #[error("{parameter} must be greater than zero")]
    ValueMustBeGreaterThanZero { parameter: PageParameter },
}

/// A validated page index and page size.
///
/// Both values are guaranteed to be at least 1. The page index has no upper
/// bound: asking for a page past the end of a source is valid and yields an
/// empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page_index: i64,
    page_size: i64,
}

impl PageRequest {
    /// Validates the arguments, checking `page_index` first.
    pub fn new(page_index: i64, page_size: i64) -> Result<Self, PaginationError> {
        if page_index <= 0 {
            return Err(PaginationError::ValueMustBeGreaterThanZero {
                parameter: PageParameter::PageIndex,
            });
        }
        if page_size <= 0 {
            return Err(PaginationError::ValueMustBeGreaterThanZero {
                parameter: PageParameter::PageSize,
            });
        }

        Ok(Self {
            page_index,
            page_size,
        })
    }

    #[inline]
    pub const fn page_index(&self) -> i64 {
        self.page_index
    }

    #[inline]
    pub const fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of items to skip, or `None` if it does not fit in an `i64`.
    pub fn offset(&self) -> Option<i64> {
        (self.page_index - 1).checked_mul(self.page_size)
    }

    /// Number of items to fetch: the page plus one lookahead item.
    pub fn fetch_limit(&self) -> i64 {
        self.page_size.saturating_add(1)
    }
}

/// One bounded slice of an ordered result set plus a continuation flag.
///
/// Fields are private so that `items.len() <= page_size` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "pagedItems")]
    items: Vec<T>,
    page_index: i64,
    page_size: i64,
    has_next_page: bool,
}

impl<T> Page<T> {
    /// Builds a page from the result of a lookahead fetch.
    ///
    /// `fetched` may hold up to `page_size + 1` items; anything past
    /// `page_size` only signals that a next page exists and is discarded.
    pub fn from_lookahead(request: PageRequest, mut fetched: Vec<T>) -> Self {
        let page_size = usize::try_from(request.page_size).unwrap_or(usize::MAX);
        let has_next_page = fetched.len() > page_size;
        fetched.truncate(page_size);

        Self {
            items: fetched,
            page_index: request.page_index,
            page_size: request.page_size,
            has_next_page,
        }
    }

    pub fn empty(request: PageRequest) -> Self {
        Self::from_lookahead(request, Vec::new())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub const fn page_index(&self) -> i64 {
        self.page_index
    }

    pub const fn page_size(&self) -> i64 {
        self.page_size
    }

    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Converts every item, keeping the pagination fields as they are.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_index: self.page_index,
            page_size: self.page_size,
            has_next_page: self.has_next_page,
        }
    }
}

/// An ordered, range-addressable data source.
///
/// Implementations must return at most `limit` items starting at `offset`,
/// in a stable order. Their error type must be able to carry a
/// [`PaginationError`] so [`paginate`] can report invalid arguments through
/// the same channel; fetch errors are returned to the caller untouched.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;
    type Error: From<PaginationError> + Send;

    async fn fetch_range(&self, offset: i64, limit: i64) -> Result<Vec<Self::Item>, Self::Error>;
}

/// Fetches page `page_index` (1-based) of `page_size` items from `source`.
///
/// Arguments are validated before the source is touched.
pub async fn paginate<S>(
    source: &S,
    page_index: i64,
    page_size: i64,
) -> Result<Page<S::Item>, S::Error>
where
    S: PageSource + ?Sized,
{
    let request = PageRequest::new(page_index, page_size)?;
    fetch_page(source, request).await
}

/// Same as [`paginate`] for an already validated request.
#[instrument(skip(source), level = "debug")]
pub async fn fetch_page<S>(source: &S, request: PageRequest) -> Result<Page<S::Item>, S::Error>
where
    S: PageSource + ?Sized,
{
    let Some(offset) = request.offset() else {
        debug!("offset overflows, returning an empty page");
        return Ok(Page::empty(request));
    };

    let fetched = source.fetch_range(offset, request.fetch_limit()).await?;
    let page = Page::from_lookahead(request, fetched);

    debug!(
        items = page.len(),
        has_next_page = page.has_next_page(),
        "page fetched"
    );

    Ok(page)
}

/// In-memory [`PageSource`] over a borrowed slice, in slice order.
#[derive(Debug, Clone, Copy)]
pub struct SliceSource<'a, T> {
    items: &'a [T],
}

impl<'a, T> SliceSource<'a, T> {
    pub fn new(items: &'a [T]) -> Self {
        Self { items }
    }
}

#[async_trait]
impl<'a, T> PageSource for SliceSource<'a, T>
where
    T: Clone + Send + Sync,
{
    type Item = T;
    type Error = PaginationError;

    async fn fetch_range(&self, offset: i64, limit: i64) -> Result<Vec<T>, PaginationError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);

        Ok(self.items.iter().skip(skip).take(take).cloned().collect())
    }
}

/// Query parameters for a paginated listing.
///
/// Empty strings are treated as absent. A missing `pageIndex` means the first
/// page; a missing `pageSize` falls back to the configured default. Explicit
/// values are never clamped, so `pageSize=0` is rejected rather than fixed up.
///
/// ```ignore
/// // GET /api/licence-categories?pageIndex=2&pageSize=20
/// let request = params.to_request(config.default_page_size)?;
/// ```
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page_index: Option<i64>,
    /// Items per page (default: configured page size)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
}

impl PageParams {
    pub const DEFAULT_PAGE_INDEX: i64 = 1;

    pub fn new(page_index: i64, page_size: i64) -> Self {
        Self {
            page_index: Some(page_index),
            page_size: Some(page_size),
        }
    }

    pub fn page_index(&self) -> i64 {
        self.page_index.unwrap_or(Self::DEFAULT_PAGE_INDEX)
    }

    pub fn page_size_or(&self, default_page_size: i64) -> i64 {
        self.page_size.unwrap_or(default_page_size)
    }

    pub fn to_request(&self, default_page_size: i64) -> Result<PageRequest, PaginationError> {
        PageRequest::new(self.page_index(), self.page_size_or(default_page_size))
    }
}
