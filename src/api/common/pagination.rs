//
//  atlassian-api
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types and the Page Collection Loop
//!
//! Atlassian products list resources one page at a time using offset-based
//! pagination (`start` + `limit`), but describe the "is there more" signal
//! differently:
//!
//! | Type | Products | Next-page signal |
//! |------|----------|------------------|
//! | [`ContentPage`] | Confluence | `_links.next` present |
//! | [`ServerPage`] | Stash / Bitbucket Server, Jira Agile | `isLastPage == false` |
//!
//! Both implement [`Paged`], so [`collect_pages`] can flatten either into one
//! ordered `Vec`.
//!
//! # Example
//!
//! ```rust
//! use atlassian_api::api::common::{collect_pages, ContentPage, PageLinks};
//!
//! // A fake server holding 5 items, serving at most 2 per page.
//! let items: Vec<u32> = (0..5).collect();
//! let all = collect_pages(None, 9999, |start, _limit| {
//!     let start = start as usize;
//!     let end = (start + 2).min(items.len());
//!     let results = items[start..end].to_vec();
//!     Ok(Some(ContentPage {
//!         size: Some(results.len() as u32),
//!         results,
//!         start: start as u32,
//!         limit: 2,
//!         links: PageLinks {
//!             next: (end < items.len()).then(|| "/next".to_string()),
//!             ..Default::default()
//!         },
//!     }))
//! });
//! assert_eq!(all, vec![0, 1, 2, 3, 4]);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::ApiError;

/// Page size requested when the caller gives no cap.
///
/// Servers clamp this to their own maximum and report the limit they
/// actually honored, which is then used for the following requests.
pub const DEFAULT_PAGE_SIZE: u32 = 9999;

/// A single page of a paginated listing.
pub trait Paged<T> {
    /// Number of items the server reports for this page.
    fn size(&self) -> u32;

    /// The page size limit the server actually honored.
    fn limit(&self) -> u32;

    /// Whether the server indicated that another page follows.
    fn has_next(&self) -> bool;

    /// Consumes the page, yielding its items in server order.
    fn into_items(self) -> Vec<T>;
}

/// Links block attached to Confluence list responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Relative link to the next page. Absent on the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// Relative link to the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,

    /// Base URL of the Confluence instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Context path of the Confluence instance (e.g. `/wiki`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Link to this page of results.
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Paginated response from the Confluence REST API.
///
/// ```json
/// {
///   "results": [ ... ],
///   "start": 0,
///   "limit": 25,
///   "size": 25,
///   "_links": { "next": "/rest/api/content/search?cql=...&start=25" }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPage<T> {
    /// Items on this page. Required, so that a non-list response is not
    /// mistaken for an empty page.
    pub results: Vec<T>,

    /// Offset of the first item on this page.
    #[serde(default)]
    pub start: u32,

    /// Page size limit honored by the server.
    #[serde(default)]
    pub limit: u32,

    /// Number of items on this page. Falls back to `results.len()` when absent.
    #[serde(default)]
    pub size: Option<u32>,

    /// Navigation links.
    #[serde(default, rename = "_links")]
    pub links: PageLinks,
}

impl<T> Paged<T> for ContentPage<T> {
    fn size(&self) -> u32 {
        self.size.unwrap_or(self.results.len() as u32)
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn has_next(&self) -> bool {
        self.links.next.is_some()
    }

    fn into_items(self) -> Vec<T> {
        self.results
    }
}

/// Paginated response from Stash / Bitbucket Server style APIs.
///
/// ```json
/// {
///   "values": [ ... ],
///   "size": 25,
///   "limit": 25,
///   "isLastPage": false,
///   "nextPageStart": 25,
///   "start": 0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerPage<T> {
    /// Items on this page.
    pub values: Vec<T>,

    /// Number of items on this page.
    #[serde(default)]
    pub size: u32,

    /// Page size limit honored by the server.
    #[serde(default)]
    pub limit: u32,

    /// Whether this is the final page.
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: bool,

    /// Offset the server suggests for the next request.
    #[serde(default, rename = "nextPageStart")]
    pub next_page_start: Option<u32>,

    /// Offset of the first item on this page.
    #[serde(default)]
    pub start: u32,
}

impl<T> Paged<T> for ServerPage<T> {
    fn size(&self) -> u32 {
        self.size
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn has_next(&self) -> bool {
        !self.is_last_page
    }

    fn into_items(self) -> Vec<T> {
        self.values
    }
}

/// Either page shape, for callers that do not know which product answered.
///
/// Deserialization tries the Stash shape (`values`) first, then the
/// Confluence shape (`results`). A body with neither list fails to decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnyPage<T> {
    /// A Stash / Bitbucket Server page.
    Server(ServerPage<T>),
    /// A Confluence page.
    Content(ContentPage<T>),
}

impl<T> Paged<T> for AnyPage<T> {
    fn size(&self) -> u32 {
        match self {
            Self::Server(page) => page.size(),
            Self::Content(page) => page.size(),
        }
    }

    fn limit(&self) -> u32 {
        match self {
            Self::Server(page) => page.limit(),
            Self::Content(page) => page.limit(),
        }
    }

    fn has_next(&self) -> bool {
        match self {
            Self::Server(page) => page.has_next(),
            Self::Content(page) => page.has_next(),
        }
    }

    fn into_items(self) -> Vec<T> {
        match self {
            Self::Server(page) => page.into_items(),
            Self::Content(page) => page.into_items(),
        }
    }
}

/// Offset/limit state while walking a paginated listing.
///
/// The offset only ever moves forward, by the number of items the server
/// actually returned (not the number requested).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    start: u32,
    limit: u32,
    cap: Option<u32>,
}

impl PageCursor {
    /// Creates a cursor at offset 0.
    ///
    /// A zero `page_size` is treated as 1 so the cursor can always advance.
    pub fn new(cap: Option<u32>, page_size: u32) -> Self {
        Self {
            start: 0,
            limit: page_size.max(1),
            cap,
        }
    }

    /// The offset of the next request.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// The optional cap on the total number of items.
    pub fn cap(&self) -> Option<u32> {
        self.cap
    }

    /// Whether the cap has been reached.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.cap, Some(cap) if self.start >= cap)
    }

    /// Page size for the next request: the current limit, bounded by what is
    /// left of the cap.
    pub fn request_limit(&self) -> u32 {
        match self.cap {
            Some(cap) => cap.saturating_sub(self.start).min(self.limit),
            None => self.limit,
        }
    }

    /// Moves past a page of `size` items, adopting the server's `honored_limit`
    /// for subsequent requests.
    pub fn advance(&mut self, size: u32, honored_limit: u32) {
        self.start = self.start.saturating_add(size);
        if honored_limit > 0 {
            self.limit = honored_limit;
        }
    }
}

/// Fetches pages until the listing is exhausted and returns all items in
/// server order.
///
/// `fetch` is called with `(start, limit)` and returns one page. The loop
/// stops when:
///
/// - the cap is reached,
/// - `fetch` returns `Ok(None)` or a page with no items,
/// - the page carries no next-page indicator,
/// - `fetch` fails. The error is logged and whatever has been collected so far
///   is returned, so a failing first page yields an empty `Vec`.
///
/// The result never exceeds `cap` items.
pub fn collect_pages<T, P, F>(cap: Option<u32>, page_size: u32, mut fetch: F) -> Vec<T>
where
    P: Paged<T>,
    F: FnMut(u32, u32) -> Result<Option<P>, ApiError>,
{
    let mut cursor = PageCursor::new(cap, page_size);
    let mut items = Vec::new();

    while !cursor.is_exhausted() {
        let start = cursor.start();
        let limit = cursor.request_limit();
        debug!(start, limit, cap = ?cursor.cap(), "Fetching page");

        let page = match fetch(start, limit) {
            Ok(Some(page)) => page,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, start, "Page fetch failed, returning partial results");
                break;
            }
        };

        let size = page.size();
        if size == 0 {
            break;
        }
        let honored_limit = page.limit();
        let has_next = page.has_next();

        items.extend(page.into_items());
        cursor.advance(size, honored_limit);

        if !has_next {
            break;
        }
    }

    if let Some(cap) = cap {
        items.truncate(cap as usize);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_page(values: Vec<u32>, limit: u32, last: bool) -> ServerPage<u32> {
        ServerPage {
            size: values.len() as u32,
            values,
            limit,
            is_last_page: last,
            next_page_start: None,
            start: 0,
        }
    }

    #[test]
    fn test_cursor_request_limit_respects_cap() {
        let mut cursor = PageCursor::new(Some(30), DEFAULT_PAGE_SIZE);
        assert_eq!(cursor.request_limit(), 30);
        cursor.advance(25, 25);
        assert_eq!(cursor.start(), 25);
        assert_eq!(cursor.request_limit(), 5);
        cursor.advance(5, 5);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_cursor_without_cap_never_exhausts() {
        let mut cursor = PageCursor::new(None, 10);
        cursor.advance(10, 10);
        cursor.advance(10, 10);
        assert!(!cursor.is_exhausted());
        assert_eq!(cursor.start(), 20);
    }

    #[test]
    fn test_collect_stops_on_last_page() {
        let mut calls = 0;
        let items = collect_pages(None, 2, |start, _| {
            calls += 1;
            Ok(Some(match start {
                0 => server_page(vec![1, 2], 2, false),
                _ => server_page(vec![3], 2, true),
            }))
        });
        assert_eq!(items, vec![1, 2, 3]);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_collect_stops_on_empty_page() {
        let mut calls = 0;
        let items: Vec<u32> = collect_pages(None, 2, |_, _| {
            calls += 1;
            Ok(Some(server_page(vec![], 2, false)))
        });
        assert!(items.is_empty());
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_collect_returns_partial_results_on_error() {
        let items = collect_pages(None, 2, |start, _| {
            if start == 0 {
                Ok(Some(server_page(vec![1, 2], 2, false)))
            } else {
                Err(ApiError::UnexpectedResponse("boom".to_string()))
            }
        });
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn test_collect_truncates_overdelivery() {
        let items = collect_pages(Some(3), DEFAULT_PAGE_SIZE, |_, _| {
            Ok(Some(server_page(vec![1, 2, 3, 4, 5], 5, false)))
        });
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_any_page_detects_shape() {
        let server: AnyPage<u32> =
            serde_json::from_str(r#"{"values":[1],"size":1,"limit":25,"isLastPage":true,"start":0}"#)
                .unwrap();
        assert!(matches!(server, AnyPage::Server(_)));
        assert!(!server.has_next());

        let content: AnyPage<u32> = serde_json::from_str(
            r#"{"results":[1,2],"start":0,"limit":2,"size":2,"_links":{"next":"/x"}}"#,
        )
        .unwrap();
        assert!(matches!(content, AnyPage::Content(_)));
        assert!(content.has_next());
        assert_eq!(content.size(), 2);
    }

    #[test]
    fn test_any_page_rejects_non_list_objects() {
        let result = serde_json::from_str::<AnyPage<u32>>(r#"{"key": "DOCS", "name": "Docs"}"#);
        assert!(result.is_err());
        assert!(serde_json::from_str::<ContentPage<u32>>(r#"{"start": 0, "limit": 25}"#).is_err());
    }
}
