//! Pagination: slicing an ordered result into pages.
//!
//! The paginator is a pure function over the *filtered* sequence - `total`
//! always reflects the current result set, never the raw snapshot. It
//! reports faithfully on whatever page it is asked for and never adjusts
//! the page number itself; proactive clamping is the reconciler's and the
//! view's job.

use serde::{Deserialize, Serialize};

/// A 1-based page request.
///
/// Constructors clamp non-positive input to 1, so an invalid request can
/// only ever under-select, never panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: usize,
    per_page: usize,
}

impl PageRequest {
    /// Creates a request for the given page and page size, clamped to 1.
    pub fn new(page: usize, per_page: usize) -> Self {
        PageRequest {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    /// Creates a request for the first page.
    pub fn first(per_page: usize) -> Self {
        PageRequest::new(1, per_page)
    }

    /// Returns the 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Returns the zero-based start offset of this page.
    pub fn offset(&self) -> usize {
        (self.page - 1) * self.per_page
    }
}

/// One page of an ordered result, plus the figures the table chrome needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<R> {
    /// The records on this page, in result order.
    pub items: Vec<R>,
    /// Size of the whole filtered result, not just this page.
    pub total: usize,
    /// The 1-based page this slice came from.
    pub page: usize,
    /// The page size the slice was cut with.
    pub per_page: usize,
}

impl<R> Paginated<R> {
    /// Number of pages in the filtered result (0 when empty).
    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.per_page)
    }

    /// Returns `true` if a later page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// Returns `true` if an earlier page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Number of records on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if this page holds no records.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Cuts one page out of an ordered result.
///
/// `total` is the length of `ordered`; `items` is the zero-based slice
/// `[(page-1)*per_page, page*per_page)`. A page past the end yields empty
/// `items` with the correct `total` - the page number is reported back
/// unchanged, never mutated here.
///
/// # Example
///
/// ```
/// use backview::{paginate, PageRequest};
///
/// let ordered: Vec<u32> = (1..=25).collect();
/// let page = paginate(&ordered, PageRequest::new(3, 10));
/// assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
/// assert_eq!(page.total, 25);
/// assert_eq!(page.page_count(), 3);
/// assert!(!page.has_next());
/// ```
pub fn paginate<R: Clone>(ordered: &[R], request: PageRequest) -> Paginated<R> {
    // Re-clamp in case the request bypassed the constructor (serde).
    let per_page = request.per_page.max(1);
    let page = request.page.max(1);

    let total = ordered.len();
    let start = ((page - 1) * per_page).min(total);
    let end = (start + per_page).min(total);

    Paginated {
        items: ordered[start..end].to_vec(),
        total,
        page,
        per_page,
    }
}
