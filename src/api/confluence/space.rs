//
//  atlassian-api
//  api/confluence/space.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Space types and operations.

use serde::{Deserialize, Serialize};

use super::content::{Content, ContentLinks};
use super::{required, Confluence, SPACE_PATH};
use crate::api::common::{ApiError, ContentPage};
use crate::api::request::Query;

/// A Confluence space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    /// Numeric space id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// The space key, e.g. `DOCS`.
    pub key: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    /// `global` or `personal`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub space_type: Option<String>,

    /// `current` or `archived`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Links to the space in the web UI.
    #[serde(default, rename = "_links")]
    pub links: ContentLinks,
}

/// Response of `/rest/api/space/{key}/content`: one page per content type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceContent {
    /// Pages in the space.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<ContentPage<Content>>,

    /// Blog posts in the space.
    #[serde(default, rename = "blogpost", skip_serializing_if = "Option::is_none")]
    pub blog_post: Option<ContentPage<Content>>,
}

impl SpaceContent {
    /// All returned items, pages first.
    pub fn items(&self) -> impl Iterator<Item = &Content> {
        self.page
            .iter()
            .chain(self.blog_post.iter())
            .flat_map(|p| p.results.iter())
    }
}

impl Confluence {
    /// Fetches a space by key.
    pub fn get_space(&self, space: &str, expand: Option<&str>) -> Result<Space, ApiError> {
        let query = Query::new().param_opt("expand", expand.filter(|e| !e.is_empty()));
        required(
            self.client.get(&format!("{SPACE_PATH}/{space}"), query)?,
            "space lookup",
        )
    }

    /// Lists the content of a space, one page of results per content type.
    pub fn get_space_content(
        &self,
        space: &str,
        expand: Option<&str>,
        start: Option<u32>,
        limit: Option<u32>,
    ) -> Result<SpaceContent, ApiError> {
        let query = Query::new()
            .param_opt("expand", expand.filter(|e| !e.is_empty()))
            .param_opt("start", start)
            .param_opt("limit", limit);

        required(
            self.client
                .get(&format!("{SPACE_PATH}/{space}/content"), query)?,
            "space content",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_content_items() {
        let json = r#"{
            "page": {"results": [{"id": "1", "type": "page", "title": "A"}], "start": 0, "limit": 25, "size": 1, "_links": {}},
            "blogpost": {"results": [{"id": "2", "type": "blogpost", "title": "B"}], "start": 0, "limit": 25, "size": 1, "_links": {}},
            "_links": {"base": "https://wiki.example.com"}
        }"#;
        let content: SpaceContent = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = content.items().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_space_deserializes() {
        let json = r#"{"id": 98305, "key": "DOCS", "name": "Documentation", "type": "global", "_links": {"webui": "/display/DOCS"}}"#;
        let space: Space = serde_json::from_str(json).unwrap();
        assert_eq!(space.key, "DOCS");
        assert_eq!(space.space_type.as_deref(), Some("global"));
        assert_eq!(space.links.webui.as_deref(), Some("/display/DOCS"));
    }
}
