//! Page-number pagination primitives shared by MyTrip backend endpoints.
//!
//! The upstream tourism provider pages results by page number and reports a
//! total count, so listings expose the same shape: a validated
//! [`PageRequest`], a [`Page`] envelope carrying the total page count, and a
//! compact page-number [`window`] with ellipsis markers for navigation
//! controls. [`PageLinks`] rewrites the `page` query parameter of a request URL
//! while preserving every other filter.

use serde::{Deserialize, Serialize};
use url::Url;

/// Default number of items rendered per listing page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Upper bound accepted for caller-supplied page sizes.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Name of the query parameter carrying the page number.
pub const PAGE_QUERY_PARAM: &str = "page";

/// Validation failures raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers start at one.
    #[error("page number must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("page size must be at least 1")]
    ZeroPageSize,
    /// The requested page size exceeds [`MAX_PAGE_SIZE`].
    #[error("page size must be at most {max}")]
    PageSizeTooLarge {
        /// Largest accepted page size.
        max: u32,
    },
}

/// One-based page number plus page size.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let request = PageRequest::new(3, 12)?;
/// assert_eq!(request.offset(), 24);
/// # Ok::<(), pagination::PageRequestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when the page is zero or the page size is
    /// outside `1..=MAX_PAGE_SIZE`.
    pub const fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if page_size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    /// First page using [`DEFAULT_PAGE_SIZE`].
    #[must_use]
    pub const fn first() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Zero-based index of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.page_size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Number of pages needed to show `total_items` at `page_size` per page.
///
/// A zero page size yields zero pages.
#[must_use]
pub const fn total_pages(total_items: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size as u64)
}

/// One entry of a page-number navigation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
pub enum PageSlot {
    /// A clickable page number.
    Page(u64),
    /// A gap between non-adjacent page numbers.
    Ellipsis,
}

/// Build a page-number window of at most `max_visible` numbered slots around
/// `current`, always anchoring the first and last page.
///
/// When every page fits in the window no ellipsis is emitted. Otherwise the
/// first and last pages are pinned and gaps wider than one page collapse into
/// [`PageSlot::Ellipsis`].
///
/// # Examples
/// ```
/// use pagination::{window, PageSlot};
///
/// let slots = window(6, 20, 5);
/// assert_eq!(
///     slots,
///     vec![
///         PageSlot::Page(1),
///         PageSlot::Ellipsis,
///         PageSlot::Page(4),
///         PageSlot::Page(5),
///         PageSlot::Page(6),
///         PageSlot::Page(7),
///         PageSlot::Page(8),
///         PageSlot::Ellipsis,
///         PageSlot::Page(20),
///     ]
/// );
/// ```
#[must_use]
pub fn window(current: u64, total: u64, max_visible: u64) -> Vec<PageSlot> {
    if total == 0 || max_visible == 0 {
        return Vec::new();
    }
    if total <= max_visible {
        return (1..=total).map(PageSlot::Page).collect();
    }

    let current_page = current.clamp(1, total);
    // Half the window, rounded down.
    let half = max_visible.saturating_sub(1) >> 1;
    let provisional_start = current_page.saturating_sub(half).max(1);
    let end = provisional_start
        .saturating_add(max_visible - 1)
        .min(total);
    let start = if end - provisional_start < max_visible - 1 {
        end.saturating_sub(max_visible - 1).max(1)
    } else {
        provisional_start
    };

    let mut slots = Vec::new();
    if start > 1 {
        slots.push(PageSlot::Page(1));
        if start > 2 {
            slots.push(PageSlot::Ellipsis);
        }
    }
    slots.extend((start..=end).map(PageSlot::Page));
    if end < total {
        if end < total - 1 {
            slots.push(PageSlot::Ellipsis);
        }
        slots.push(PageSlot::Page(total));
    }
    slots
}

/// One page of results together with navigation metadata.
///
/// # Examples
/// ```
/// use pagination::{Page, PageRequest};
///
/// let page = Page::new(vec!["a", "b"], PageRequest::new(1, 2)?, 5);
/// assert_eq!(page.total_pages, 3);
/// assert!(page.has_more);
/// # Ok::<(), pagination::PageRequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// One-based page number.
    pub page: u32,
    /// Items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total_items: u64,
    /// Total number of pages.
    pub total_pages: u64,
    /// Whether a later page exists.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Assemble a page envelope from items and the reported total.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let pages = total_pages(total_items, request.page_size());
        Self {
            items,
            page: request.page(),
            page_size: request.page_size(),
            total_items,
            total_pages: pages,
            has_more: u64::from(request.page()) < pages,
        }
    }

    /// Map each item while keeping the navigation metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_more: self.has_more,
        }
    }

    /// Page-number window for this page.
    #[must_use]
    pub fn window(&self, max_visible: u64) -> Vec<PageSlot> {
        window(u64::from(self.page), self.total_pages, max_visible)
    }
}

/// Navigation links derived from a request URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLinks {
    /// Link to the current page.
    #[serde(rename = "self")]
    pub self_: Url,
    /// Link to the previous page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<Url>,
    /// Link to the next page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<Url>,
}

impl PageLinks {
    /// Derive links for `page` of `total_pages` from `base`.
    ///
    /// Existing query parameters other than `page` are preserved in order.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageLinks;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://example.com/api/v1/tours?area=1&page=9")?;
    /// let links = PageLinks::for_page(&base, 2, 3);
    /// assert_eq!(links.self_.as_str(), "https://example.com/api/v1/tours?area=1&page=2");
    /// assert_eq!(
    ///     links.next.map(|url| url.to_string()).as_deref(),
    ///     Some("https://example.com/api/v1/tours?area=1&page=3"),
    /// );
    /// # Ok::<(), url::ParseError>(())
    /// ```
    #[must_use]
    pub fn for_page(base: &Url, page: u64, total_pages: u64) -> Self {
        let prev = (page > 1).then(|| with_page(base, page - 1));
        let next = (page < total_pages).then(|| with_page(base, page + 1));
        Self {
            self_: with_page(base, page),
            prev,
            next,
        }
    }
}

fn with_page(base: &Url, page: u64) -> Url {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(PAGE_QUERY_PARAM, &page.to_string());
    url
}

#[cfg(test)]
mod tests {
    //! Unit coverage for pagination primitives.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 12, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::ZeroPageSize)]
    #[case(1, 101, PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE })]
    fn page_request_rejects_out_of_range_values(
        #[case] page: u32,
        #[case] size: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, size), Err(expected));
    }

    #[rstest]
    #[case(0, 12, 0)]
    #[case(1, 12, 1)]
    #[case(12, 12, 1)]
    #[case(13, 12, 2)]
    #[case(100, 0, 0)]
    fn total_pages_rounds_up(#[case] total: u64, #[case] size: u32, #[case] expected: u64) {
        assert_eq!(total_pages(total, size), expected);
    }

    #[rstest]
    fn small_totals_list_every_page() {
        assert_eq!(
            window(2, 3, 5),
            vec![PageSlot::Page(1), PageSlot::Page(2), PageSlot::Page(3)]
        );
    }

    #[rstest]
    fn window_at_start_has_trailing_ellipsis() {
        assert_eq!(
            window(1, 10, 5),
            vec![
                PageSlot::Page(1),
                PageSlot::Page(2),
                PageSlot::Page(3),
                PageSlot::Page(4),
                PageSlot::Page(5),
                PageSlot::Ellipsis,
                PageSlot::Page(10),
            ]
        );
    }

    #[rstest]
    fn window_at_end_shifts_back_to_stay_full() {
        assert_eq!(
            window(10, 10, 5),
            vec![
                PageSlot::Page(1),
                PageSlot::Ellipsis,
                PageSlot::Page(6),
                PageSlot::Page(7),
                PageSlot::Page(8),
                PageSlot::Page(9),
                PageSlot::Page(10),
            ]
        );
    }

    #[rstest]
    fn adjacent_anchor_skips_ellipsis() {
        assert_eq!(
            window(3, 7, 3),
            vec![
                PageSlot::Page(1),
                PageSlot::Page(2),
                PageSlot::Page(3),
                PageSlot::Page(4),
                PageSlot::Ellipsis,
                PageSlot::Page(7),
            ]
        );
    }

    #[rstest]
    fn empty_total_yields_no_slots() {
        assert!(window(1, 0, 5).is_empty());
    }

    #[rstest]
    fn last_page_has_no_more() {
        let Ok(request) = PageRequest::new(2, 12) else {
            panic!("request should be valid");
        };
        let page = Page::new(vec![1_u8; 3], request, 15);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_more);
    }

    #[rstest]
    fn links_omit_prev_on_first_page() {
        let Ok(base) = Url::parse("https://example.com/tours?keyword=palace") else {
            panic!("base URL should parse");
        };
        let links = PageLinks::for_page(&base, 1, 1);
        assert!(links.prev.is_none());
        assert!(links.next.is_none());
        assert_eq!(
            links.self_.as_str(),
            "https://example.com/tours?keyword=palace&page=1"
        );
    }

    #[rstest]
    fn page_slots_serialise_with_kind_tag() {
        let Ok(json) = serde_json::to_value(vec![PageSlot::Page(2), PageSlot::Ellipsis]) else {
            panic!("slots should serialise");
        };
        assert_eq!(
            json,
            serde_json::json!([{ "kind": "page", "page": 2 }, { "kind": "ellipsis" }])
        );
    }
}
