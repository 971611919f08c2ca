//
//  atlassian-api
//  api/confluence/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Confluence REST API client.
//!
//! This module provides typed access to Confluence content, spaces, CQL search
//! and page restrictions, built on the shared [`AtlassianClient`] transport.
//!
//! # Module Organization
//!
//! - [`content`] - Content, body, version and history types
//! - [`pages`] - Page lookup, creation, update and update-or-create
//! - [`space`] - Space metadata and space content listings
//! - [`search`] - CQL search with automatic pagination
//! - [`restrictions`] - Read/update restrictions on pages
//! - [`compare`] - Strategies deciding whether a page already holds a body
//!
//! # Example
//!
//! ```rust,no_run
//! use atlassian_api::api::{AtlassianClient, Connection};
//! use atlassian_api::api::confluence::{Confluence, Upsert};
//!
//! let connection = Connection::new("https://wiki.example.com", "jdoe", "s3cret")?;
//! let confluence = Confluence::new(AtlassianClient::new(connection)?);
//!
//! match confluence.update_or_create("123456", "Release notes", "<p>v1.2</p>")? {
//!     Upsert::Created(_) => println!("created"),
//!     Upsert::Updated(_) => println!("updated"),
//!     Upsert::Unchanged(page) => println!("page {} already up to date", page.id),
//! }
//! # Ok::<(), atlassian_api::api::ApiError>(())
//! ```
//!
//! # Notes
//!
//! - Page bodies are always exchanged in the `storage` (XHTML) representation
//! - Titles are only unique per space by convention; lookups report ambiguity
//! - Restriction endpoints live under the experimental API on Server

use std::sync::Arc;

use super::client::AtlassianClient;
use super::common::ApiError;

pub mod compare;
pub mod content;
pub mod pages;
pub mod restrictions;
pub mod search;
pub mod space;

pub use compare::{normalize_entities, ContentComparator, EntityNormalizedComparator};
pub use content::*;
pub use pages::Upsert;
pub use restrictions::{
    Group, OperationRestriction, PageRestrictions, RestrictionOperation, UnknownOperation,
};
pub use space::{Space, SpaceContent};

const CONTENT_PATH: &str = "rest/api/content";
const SPACE_PATH: &str = "rest/api/space";
const EXPERIMENTAL_CONTENT_PATH: &str = "rest/experimental/content";

/// Client for a Confluence instance.
///
/// Wraps an [`AtlassianClient`] and the [`ContentComparator`] used by the
/// update operations to decide whether a page already holds the desired body.
pub struct Confluence {
    client: AtlassianClient,
    comparator: Arc<dyn ContentComparator>,
}

impl Confluence {
    /// Creates a Confluence client using [`EntityNormalizedComparator`].
    pub fn new(client: AtlassianClient) -> Self {
        Self {
            client,
            comparator: Arc::new(EntityNormalizedComparator),
        }
    }

    /// Replaces the comparator used by [`update_page`](Self::update_page) and
    /// [`update_or_create`](Self::update_or_create).
    ///
    /// ```rust,no_run
    /// use atlassian_api::api::{AtlassianClient, Connection};
    /// use atlassian_api::api::confluence::Confluence;
    /// use std::sync::Arc;
    ///
    /// let client = AtlassianClient::new(Connection::new("https://wiki.example.com", "u", "p")?)?;
    /// let confluence = Confluence::new(client)
    ///     .with_comparator(Arc::new(|current: &str, desired: &str| current.trim() == desired.trim()));
    /// # Ok::<(), atlassian_api::api::ApiError>(())
    /// ```
    pub fn with_comparator(mut self, comparator: Arc<dyn ContentComparator>) -> Self {
        self.comparator = comparator;
        self
    }

    /// The underlying transport client.
    pub fn client(&self) -> &AtlassianClient {
        &self.client
    }

    /// The comparator used by update operations.
    pub fn comparator(&self) -> &dyn ContentComparator {
        self.comparator.as_ref()
    }
}

/// Turns an absent body into an error for calls that must return one.
fn required<T>(value: Option<T>, what: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::UnexpectedResponse(format!("{what} returned no content")))
}
