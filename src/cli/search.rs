//
//  atlassian-api
//  cli/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CQL search command
//!
//! ```bash
//! atl search 'space = DOCS and type = page' --limit 50
//! atl search 'label = "release-notes"' --all --json
//! ```

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::api::confluence::Content;
use crate::output::{write_json, OutputWriter, TableBuilder};
use crate::util::truncate;

use super::GlobalOptions;

/// Search content with CQL
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// CQL query (e.g. "space = DOCS and title ~ 'release'")
    pub cql: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "25", conflicts_with = "all")]
    pub limit: u32,

    /// Fetch every result
    #[arg(long)]
    pub all: bool,

    /// Comma separated list of properties to expand
    #[arg(long, default_value = "space")]
    pub expand: String,
}

/// One row of a content listing.
#[derive(Debug, Serialize)]
pub(super) struct ContentListItem {
    id: String,
    #[serde(rename = "type")]
    content_type: String,
    title: String,
    space: Option<String>,
    status: Option<String>,
}

impl From<&Content> for ContentListItem {
    fn from(content: &Content) -> Self {
        Self {
            id: content.id.clone(),
            content_type: content.content_type.clone(),
            title: content.title.clone(),
            space: content.space_key().map(str::to_string),
            status: content.status.clone(),
        }
    }
}

/// Prints content rows as a table, or as a JSON array in JSON mode.
pub(super) fn write_content_list(output: &OutputWriter, items: &[ContentListItem]) -> Result<()> {
    if output.is_json() {
        return write_json(items);
    }

    TableBuilder::new()
        .color(output.color_enabled())
        .headers(["ID", "TYPE", "SPACE", "TITLE", "STATUS"])
        .rows(items.iter().map(|item| {
            [
                item.id.clone(),
                item.content_type.clone(),
                item.space.clone().unwrap_or_else(|| "-".to_string()),
                truncate(&item.title, 60),
                item.status.clone().unwrap_or_else(|| "-".to_string()),
            ]
        }))
        .print();
    Ok(())
}

impl SearchCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let confluence = global.connect()?;
        let limit = if self.all { None } else { Some(self.limit) };
        let results = confluence.search(&self.cql, Some(&self.expand), limit);

        let output = global.output();
        let items: Vec<ContentListItem> = results.iter().map(ContentListItem::from).collect();
        if items.is_empty() && !output.is_json() {
            output.write_info("No results");
            return Ok(());
        }

        write_content_list(&output, &items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        search: SearchCommand,
    }

    #[test]
    fn test_defaults() {
        let harness = Harness::parse_from(["search", "type = page"]);
        assert_eq!(harness.search.limit, 25);
        assert!(!harness.search.all);
        assert_eq!(harness.search.expand, "space");
    }

    #[test]
    fn test_all_conflicts_with_limit() {
        assert!(Harness::try_parse_from(["search", "type = page", "--all", "--limit", "5"]).is_err());
    }

    #[test]
    fn test_list_item_from_content() {
        let content: Content = serde_json::from_str(
            r#"{"id": "42", "type": "page", "title": "Roadmap", "space": {"key": "DOCS"}}"#,
        )
        .unwrap();
        let item = ContentListItem::from(&content);
        assert_eq!(item.space.as_deref(), Some("DOCS"));
        assert_eq!(item.content_type, "page");
    }
}
