//
//  atlassian-api
//  api/confluence/pages.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page operations.
//!
//! # Overview
//!
//! Pages are addressed either by id or by `(space key, title)`. The lookups
//! here build on `GET /rest/api/content`; the write operations build on
//! `POST /rest/api/content/` and `PUT /rest/api/content/{id}`.
//!
//! # Update-or-Create
//!
//! [`Confluence::update_or_create`] makes a page under a parent hold a given
//! body, writing only when needed:
//!
//! | Page state | Reads | Writes | Result |
//! |------------|-------|--------|--------|
//! | Absent | space, title lookup | 1 `POST` | [`Upsert::Created`] |
//! | Present, body differs | space, title lookup, history | 1 `PUT` | [`Upsert::Updated`] |
//! | Present, body identical | space, title lookup | none | [`Upsert::Unchanged`] |
//! | Several pages with the title | space, title lookup | none | [`ApiError::AmbiguousTitle`] |
//!
//! The version number sent with a `PUT` is one more than the last version
//! reported by the page history. A concurrent writer bumping the version in
//! between makes the server reject the `PUT`; that rejection is returned as
//! is, without retrying.

use tracing::{debug, info, warn};

use super::compare::ContentComparator;
use super::content::{
    AncestorRef, Content, ContentBody, ContentQuery, ContentUpdate, History, NewContent, SpaceKey,
    TitleLookup, VersionNumber, PAGE,
};
use super::{required, Confluence, CONTENT_PATH};
use crate::api::common::{ApiError, ContentPage};
use crate::api::request::Query;

/// Outcome of an update operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Upsert {
    /// The page did not exist and was created. Carries the server's
    /// response, if it sent one.
    Created(Option<Content>),
    /// The page existed with a different body and was updated.
    Updated(Option<Content>),
    /// The page already held the desired body. Nothing was written.
    Unchanged(Content),
}

impl Upsert {
    /// The page as last seen, if the server returned it.
    pub fn content(&self) -> Option<&Content> {
        match self {
            Self::Created(content) | Self::Updated(content) => content.as_ref(),
            Self::Unchanged(content) => Some(content),
        }
    }

    /// Returns `true` if a write was issued.
    pub fn is_written(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }

    /// Short lowercase label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::Updated(_) => "updated",
            Self::Unchanged(_) => "unchanged",
        }
    }
}

impl Confluence {
    /// Returns `true` if a page with `title` exists in `space`.
    ///
    /// A 404 from the server counts as "does not exist". Every other error
    /// is returned.
    pub fn page_exists(&self, space: &str, title: &str) -> Result<bool, ApiError> {
        let exists = match self.get_page_by_title(space, title, &ContentQuery::default()) {
            Ok(lookup) => lookup.is_found(),
            Err(e) if e.is_not_found() => false,
            Err(e) => return Err(e),
        };

        if exists {
            info!(space, title, "Page already exists");
        } else {
            info!(space, title, "Page does not exist");
        }
        Ok(exists)
    }

    /// Looks up the id of the page titled `title` in `space`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AmbiguousTitle`] if several pages match.
    pub fn get_page_id(&self, space: &str, title: &str) -> Result<Option<String>, ApiError> {
        let page = self
            .get_page_by_title(space, title, &ContentQuery::default())?
            .into_single(space, title)?;
        Ok(page.map(|p| p.id))
    }

    /// Returns the title of a page.
    pub fn get_page_title(&self, page_id: &str) -> Result<String, ApiError> {
        Ok(self.get_page_by_id(page_id, &ContentQuery::default())?.title)
    }

    /// Returns the key of the space containing a page.
    pub fn get_page_space(&self, page_id: &str) -> Result<String, ApiError> {
        let page = self.get_page_by_id(page_id, &ContentQuery::expanding("space"))?;
        page.space_key().map(str::to_string).ok_or_else(|| {
            ApiError::UnexpectedResponse(format!("page {page_id} has no space"))
        })
    }

    /// Looks pages up by title within a space.
    ///
    /// Sends `GET /rest/api/content?spaceKey=..&title=..&status=..&expand=..`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use atlassian_api::api::confluence::{Confluence, ContentQuery, TitleLookup};
    /// # fn demo(confluence: &Confluence) -> Result<(), atlassian_api::api::ApiError> {
    /// match confluence.get_page_by_title("DOCS", "Roadmap", &ContentQuery::default())? {
    ///     TitleLookup::None => println!("no such page"),
    ///     TitleLookup::One(page) => println!("found {}", page.id),
    ///     TitleLookup::Many(pages) => println!("{} pages share this title", pages.len()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_page_by_title(
        &self,
        space: &str,
        title: &str,
        options: &ContentQuery,
    ) -> Result<TitleLookup, ApiError> {
        let query = options.apply(Query::new().param("spaceKey", space).param("title", title));
        let page: Option<ContentPage<Content>> = self.client.get(CONTENT_PATH, query)?;
        Ok(TitleLookup::from_results(
            page.map(|p| p.results).unwrap_or_default(),
        ))
    }

    /// Fetches a page by id.
    ///
    /// Sends `GET /rest/api/content/{id}?status=..&expand=..`.
    pub fn get_page_by_id(&self, page_id: &str, options: &ContentQuery) -> Result<Content, ApiError> {
        let path = format!("{CONTENT_PATH}/{page_id}");
        required(
            self.client.get(&path, options.apply(Query::new()))?,
            "content lookup",
        )
    }

    /// Creates a page (or other content type) under `parent_id`.
    ///
    /// The body is sent in the storage representation.
    pub fn create_page(
        &self,
        space: &str,
        parent_id: &str,
        title: &str,
        body: &str,
        content_type: &str,
    ) -> Result<Option<Content>, ApiError> {
        info!(content_type, space, title, "Creating content");

        let new_content = NewContent {
            content_type: content_type.to_string(),
            ancestors: vec![AncestorRef::new(content_type, parent_id)],
            title: title.to_string(),
            space: SpaceKey {
                key: space.to_string(),
            },
            body: ContentBody::storage(body),
        };

        self.client.post(&format!("{CONTENT_PATH}/"), &new_content)
    }

    /// Returns the version history summary of a page.
    pub fn history(&self, page_id: &str) -> Result<History, ApiError> {
        let path = format!("{CONTENT_PATH}/{page_id}/history");
        required(self.client.get(&path, Query::new())?, "history")
    }

    /// Checks whether a page already holds `body`, using the configured
    /// comparator.
    pub fn is_page_content_already_updated(&self, page_id: &str, body: &str) -> Result<bool, ApiError> {
        let page = self.get_page_by_id(page_id, &ContentQuery::default())?;
        Ok(self.holds_body(&page, page.storage_value().unwrap_or_default(), body, self.comparator()))
    }

    /// Updates a page unless it already holds `body`, using the configured
    /// comparator.
    ///
    /// When `parent_id` is given the page is also moved under it.
    pub fn update_page(
        &self,
        parent_id: Option<&str>,
        page_id: &str,
        title: &str,
        body: &str,
        content_type: &str,
    ) -> Result<Upsert, ApiError> {
        self.update_page_with(parent_id, page_id, title, body, content_type, self.comparator())
    }

    /// [`update_page`](Self::update_page) with an explicit comparator.
    pub fn update_page_with(
        &self,
        parent_id: Option<&str>,
        page_id: &str,
        title: &str,
        body: &str,
        content_type: &str,
        comparator: &dyn ContentComparator,
    ) -> Result<Upsert, ApiError> {
        info!(content_type, title, "Updating content");
        let current = self.get_page_by_id(page_id, &ContentQuery::default())?;
        let stored = current.storage_value().unwrap_or_default().to_string();
        self.write_if_changed(parent_id, current, &stored, title, body, content_type, comparator)
    }

    /// Makes the page titled `title` under `parent_id` hold `body`.
    ///
    /// The page is looked up in the parent's space. It is created if absent,
    /// updated if its body differs, and left untouched otherwise.
    ///
    /// # Errors
    ///
    /// - [`ApiError::AmbiguousTitle`] if several pages in the space carry
    ///   `title`; nothing is written
    /// - any transport error of the individual calls
    pub fn update_or_create(&self, parent_id: &str, title: &str, body: &str) -> Result<Upsert, ApiError> {
        let space = self.get_page_space(parent_id)?;
        let existing = self
            .get_page_by_title(&space, title, &ContentQuery::default())?
            .into_single(&space, title)?;

        let outcome = match existing {
            None => {
                info!(space = %space, title, "Page does not exist");
                Upsert::Created(self.create_page(&space, parent_id, title, body, PAGE)?)
            }
            Some(page) => {
                info!(space = %space, title, page_id = %page.id, "Page already exists");
                let stored = self.stored_body(&page)?;
                self.write_if_changed(
                    Some(parent_id),
                    page,
                    &stored,
                    title,
                    body,
                    PAGE,
                    self.comparator(),
                )?
            }
        };

        if let Some(tinyui) = outcome.content().and_then(|c| c.links.tinyui.as_deref()) {
            warn!("You may access your page at: {}{}", self.client.base_url(), tinyui);
        }

        Ok(outcome)
    }

    /// The storage body of a looked-up page, fetched by id only when the
    /// lookup did not carry it.
    fn stored_body(&self, page: &Content) -> Result<String, ApiError> {
        if let Some(value) = page.storage_value() {
            return Ok(value.to_string());
        }
        let fetched = self.get_page_by_id(&page.id, &ContentQuery::default())?;
        Ok(fetched.storage_value().unwrap_or_default().to_string())
    }

    fn holds_body(
        &self,
        page: &Content,
        stored: &str,
        desired: &str,
        comparator: &dyn ContentComparator,
    ) -> bool {
        debug!(page_id = %page.id, "Old Content: \"\"\"{stored}\"\"\"");
        debug!(page_id = %page.id, "New Content: \"\"\"{desired}\"\"\"");

        if comparator.is_same(stored, desired) {
            warn!("Content of {} is exactly the same", page.id);
            true
        } else {
            info!("Content of {} differs", page.id);
            false
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn write_if_changed(
        &self,
        parent_id: Option<&str>,
        current: Content,
        stored: &str,
        title: &str,
        body: &str,
        content_type: &str,
        comparator: &dyn ContentComparator,
    ) -> Result<Upsert, ApiError> {
        if self.holds_body(&current, stored, body, comparator) {
            return Ok(Upsert::Unchanged(current));
        }

        let version = self.history(&current.id)?.last_updated.number + 1;
        let update = ContentUpdate {
            id: current.id.clone(),
            content_type: content_type.to_string(),
            title: title.to_string(),
            body: ContentBody::storage(body),
            version: VersionNumber { number: version },
            ancestors: parent_id
                .map(|parent| vec![AncestorRef::new(PAGE, parent)])
                .unwrap_or_default(),
        };

        let path = format!("{CONTENT_PATH}/{}", current.id);
        Ok(Upsert::Updated(self.client.put(&path, &update)?))
    }
}
