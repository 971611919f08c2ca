//
//  atlassian-api
//  api/confluence/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CQL search.
//!
//! [`Confluence::search`] walks every result page of a CQL query and can
//! return a very large number of items. Pass a `limit` unless the query is
//! known to be narrow.

use tracing::debug;

use super::content::Content;
use super::{Confluence, CONTENT_PATH};
use crate::api::common::{collect_pages, ApiError, ContentPage, DEFAULT_PAGE_SIZE};
use crate::api::request::Query;

impl Confluence {
    /// Runs a CQL query and returns up to `limit` results in server order.
    ///
    /// A failing page ends the search early: the error is logged and the
    /// results gathered so far are returned.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use atlassian_api::api::confluence::Confluence;
    /// # fn demo(confluence: &Confluence) {
    /// let pages = confluence.search("space = DOCS and type = page", Some("version"), Some(100));
    /// for page in pages {
    ///     println!("{}: {}", page.id, page.title);
    /// }
    /// # }
    /// ```
    pub fn search(&self, cql: &str, expand: Option<&str>, limit: Option<u32>) -> Vec<Content> {
        debug!(cql, ?limit, "Searching content");
        collect_pages(limit, DEFAULT_PAGE_SIZE, |start, page_limit| {
            self.search_page(cql, expand, Some(start), Some(page_limit))
        })
    }

    /// Fetches a single page of CQL search results.
    ///
    /// Sends `GET /rest/api/content/search?cql=..[&expand=..][&start=..][&limit=..]`.
    pub fn search_page(
        &self,
        cql: &str,
        expand: Option<&str>,
        start: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Option<ContentPage<Content>>, ApiError> {
        let query = Query::new()
            .param("cql", cql)
            .param_opt("expand", expand.filter(|e| !e.is_empty()))
            .param_opt("start", start)
            .param_opt("limit", limit);

        self.client.get(&format!("{CONTENT_PATH}/search"), query)
    }
}
