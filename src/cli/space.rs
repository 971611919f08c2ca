//
//  atlassian-api
//  cli/space.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Space commands

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::confluence::Space;
use crate::output::TableOutput;
use crate::util::join_link;

use super::search::{write_content_list, ContentListItem};
use super::GlobalOptions;

/// View spaces
#[derive(Args, Debug)]
pub struct SpaceCommand {
    #[command(subcommand)]
    pub command: SpaceSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SpaceSubcommand {
    /// View a space
    View {
        /// Space key (e.g. DOCS)
        key: String,

        /// Comma separated list of properties to expand
        #[arg(long)]
        expand: Option<String>,
    },

    /// List pages and blog posts in a space
    Content(ContentArgs),
}

#[derive(Args, Debug)]
pub struct ContentArgs {
    /// Space key (e.g. DOCS)
    pub key: String,

    /// Offset of the first item
    #[arg(long)]
    pub start: Option<u32>,

    /// Maximum number of items per content type
    #[arg(long, short = 'l', default_value = "25")]
    pub limit: u32,

    /// Comma separated list of properties to expand
    #[arg(long)]
    pub expand: Option<String>,
}

#[derive(Debug, Serialize)]
struct SpaceDetail {
    #[serde(flatten)]
    space: Space,
    url: Option<String>,
}

impl TableOutput for SpaceDetail {
    fn print_table(&self, color: bool) {
        let title = if color {
            style(&self.space.name).bold().to_string()
        } else {
            self.space.name.clone()
        };

        println!("{}", title);
        println!();
        println!("  Key:    {}", self.space.key);
        if let Some(id) = self.space.id {
            println!("  ID:     {}", id);
        }
        println!("  Type:   {}", self.space.space_type.as_deref().unwrap_or("-"));
        println!("  Status: {}", self.space.status.as_deref().unwrap_or("-"));
        if let Some(url) = &self.url {
            println!();
            println!("  URL: {}", url);
        }
    }
}

impl SpaceCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SpaceSubcommand::View { key, expand } => view(key, expand.as_deref(), global),
            SpaceSubcommand::Content(args) => content(args, global),
        }
    }
}

fn view(key: &str, expand: Option<&str>, global: &GlobalOptions) -> Result<()> {
    let confluence = global.connect()?;
    let space = confluence.get_space(key, expand)?;
    let url = space
        .links
        .webui
        .as_deref()
        .map(|link| join_link(confluence.client().base_url(), link));

    global.output().write(&SpaceDetail { space, url })
}

fn content(args: &ContentArgs, global: &GlobalOptions) -> Result<()> {
    let confluence = global.connect()?;
    let content =
        confluence.get_space_content(&args.key, args.expand.as_deref(), args.start, Some(args.limit))?;

    let output = global.output();
    let items: Vec<ContentListItem> = content.items().map(ContentListItem::from).collect();
    if items.is_empty() && !output.is_json() {
        output.write_info(&format!("No content found in space {}", args.key));
        return Ok(());
    }
    write_content_list(&output, &items)
}
