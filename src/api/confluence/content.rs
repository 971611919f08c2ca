//
//  atlassian-api
//  api/confluence/content.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Confluence Content Types
//!
//! Response and request types for `/rest/api/content`.
//!
//! Only the fields this crate reads are modeled. Everything else the server
//! sends is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::common::ApiError;
use crate::api::request::Query;

/// Content type for regular pages.
pub const PAGE: &str = "page";

/// Content type for blog posts.
pub const BLOG_POST: &str = "blogpost";

/// Representation used for page bodies.
pub const STORAGE: &str = "storage";

fn default_content_type() -> String {
    PAGE.to_string()
}

/// A piece of Confluence content (page, blog post, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Content id, a numeric string.
    pub id: String,

    /// `page`, `blogpost`, `comment` or `attachment`.
    #[serde(rename = "type", default = "default_content_type")]
    pub content_type: String,

    /// `current`, `draft`, `trashed`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// The title.
    #[serde(default)]
    pub title: String,

    /// The containing space, present when expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceRef>,

    /// The body, present when `body.storage` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<ContentBody>,

    /// The current version, present when expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,

    /// Parent pages, root first, present when expanded.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<AncestorRef>,

    /// UI and API links.
    #[serde(default, rename = "_links")]
    pub links: ContentLinks,
}

impl Content {
    /// The storage-format body, if it was expanded.
    pub fn storage_value(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map(|s| s.value.as_str())
    }

    /// The key of the containing space, if it was expanded.
    pub fn space_key(&self) -> Option<&str> {
        self.space.as_ref().map(|s| s.key.as_str())
    }

    /// The current version number, if it was expanded.
    pub fn version_number(&self) -> Option<u64> {
        self.version.as_ref().map(|v| v.number)
    }
}

/// A reference to a space, as embedded in content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceRef {
    /// The space key.
    pub key: String,

    /// The space name, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A reference to a parent page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncestorRef {
    /// Content type of the parent.
    #[serde(rename = "type", default = "default_content_type")]
    pub content_type: String,

    /// Id of the parent.
    pub id: String,

    /// Title of the parent, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl AncestorRef {
    /// A parent reference for a write request.
    pub fn new(content_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            id: id.into(),
            title: None,
        }
    }
}

/// Content body in one or more representations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBody {
    /// The storage (XHTML) representation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<Storage>,
}

impl ContentBody {
    /// A storage-format body for a write request.
    pub fn storage(value: impl Into<String>) -> Self {
        Self {
            storage: Some(Storage {
                value: value.into(),
                representation: STORAGE.to_string(),
            }),
        }
    }
}

/// A body value in a given representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Storage {
    /// The body markup.
    pub value: String,

    /// Always `storage` for this type.
    #[serde(default)]
    pub representation: String,
}

/// A content or history version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    /// Server-assigned, monotonically increasing version number.
    pub number: u64,

    /// When this version was created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<DateTime<Utc>>,

    /// Who created this version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by: Option<User>,

    /// The version comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Whether this was a minor edit.
    #[serde(default, rename = "minorEdit")]
    pub minor_edit: bool,
}

/// A Confluence user reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Login name (Server/Data Center).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Display name.
    #[serde(default, rename = "displayName", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl User {
    /// The best available name for display.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// Links attached to content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentLinks {
    /// Relative link to the page in the web UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webui: Option<String>,

    /// Relative short link (`/x/AbCd`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tinyui: Option<String>,

    /// REST link to the content.
    #[serde(default, rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Response of `/rest/api/content/{id}/history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    /// The most recent version.
    #[serde(rename = "lastUpdated")]
    pub last_updated: Version,

    /// Whether the requested content is the latest version.
    #[serde(default)]
    pub latest: bool,

    /// The author of the first version.
    #[serde(default, rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<User>,

    /// When the first version was created.
    #[serde(default, rename = "createdDate", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
}

/// Body of `POST /rest/api/content/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub ancestors: Vec<AncestorRef>,
    pub title: String,
    pub space: SpaceKey,
    pub body: ContentBody,
}

/// Body of `PUT /rest/api/content/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ContentUpdate {
    pub id: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub title: String,
    pub body: ContentBody,
    pub version: VersionNumber,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<AncestorRef>,
}

/// `{"key": "..."}` in write requests.
#[derive(Debug, Clone, Serialize)]
pub struct SpaceKey {
    pub key: String,
}

/// `{"number": n}` in write requests.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VersionNumber {
    pub number: u64,
}

/// Options for fetching content by id or title.
///
/// | Field | Default |
/// |-------|---------|
/// | `status` | `current` |
/// | `representation` | `storage` (expands `body.storage`) |
/// | `expand` | none |
/// | `limit` | none |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub status: Option<String>,
    pub representation: Option<String>,
    pub expand: Option<String>,
    pub limit: Option<u32>,
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            status: Some("current".to_string()),
            representation: Some(STORAGE.to_string()),
            expand: None,
            limit: None,
        }
    }
}

impl ContentQuery {
    /// Default options with extra expansions (comma separated).
    pub fn expanding(expand: impl Into<String>) -> Self {
        Self {
            expand: Some(expand.into()),
            ..Self::default()
        }
    }

    /// The combined `expand` value: caller expansions, then the body
    /// representation.
    pub fn expand_value(&self) -> Option<String> {
        let parts: Vec<String> = self
            .expand
            .iter()
            .filter(|e| !e.is_empty())
            .cloned()
            .chain(self.representation.iter().map(|r| format!("body.{r}")))
            .collect();

        (!parts.is_empty()).then(|| parts.join(","))
    }

    /// Appends `status`, `expand` and `limit` to a query.
    pub fn apply(&self, query: Query) -> Query {
        query
            .param_opt("status", self.status.as_deref())
            .param_opt("expand", self.expand_value())
            .param_opt("limit", self.limit)
    }
}

/// Result of looking a page up by title within a space.
///
/// Titles are meant to be unique within a space, but the server does not
/// guarantee a single match, so callers have to handle all three cases.
#[derive(Debug, Clone, PartialEq)]
pub enum TitleLookup {
    /// No page has this title.
    None,
    /// Exactly one page has this title.
    One(Content),
    /// Several pages have this title.
    Many(Vec<Content>),
}

impl TitleLookup {
    /// Builds a lookup result from the server's result list.
    pub fn from_results(mut results: Vec<Content>) -> Self {
        match results.len() {
            0 => Self::None,
            1 => Self::One(results.remove(0)),
            _ => Self::Many(results),
        }
    }

    /// Returns `true` if at least one page matched.
    pub fn is_found(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Collapses the lookup to at most one page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AmbiguousTitle`] carrying every match for
    /// [`TitleLookup::Many`].
    pub fn into_single(self, space: &str, title: &str) -> Result<Option<Content>, ApiError> {
        match self {
            Self::None => Ok(None),
            Self::One(content) => Ok(Some(content)),
            Self::Many(matches) => Err(ApiError::AmbiguousTitle {
                space: space.to_string(),
                title: title.to_string(),
                matches,
            }),
        }
    }
}
