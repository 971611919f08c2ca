//
//  atlassian-api
//  cli/page.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Page commands
//!
//! Bodies are given in Confluence storage format, either inline with
//! `--body` or from a file with `--body-file` (`-` reads stdin).
//!
//! ```bash
//! atl page view 123456
//! atl page view --space DOCS --title "Release notes" --web
//! atl page upsert --parent 123456 --title "Release notes" --body-file notes.xml
//! atl page restrict 123456 --operation update --group confluence-administrators
//! ```

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::api::confluence::{
    Confluence, Content, ContentQuery, History, OperationRestriction, PageRestrictions,
    RestrictionOperation, Upsert, PAGE,
};
use crate::output::{format_status, print_field, TableOutput};
use crate::util::{format_relative_time, format_time, join_link, open_browser, read_body};

use super::GlobalOptions;

/// View, create and update pages
#[derive(Args, Debug)]
pub struct PageCommand {
    #[command(subcommand)]
    pub command: PageSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PageSubcommand {
    /// View a page by id, or by space and title
    View(ViewArgs),

    /// Create a page under a parent page
    Create(CreateArgs),

    /// Update a page unless it already holds the body
    #[command(visible_alias = "edit")]
    Update(UpdateArgs),

    /// Create or update the page with a title under a parent page
    Upsert(UpsertArgs),

    /// Show the version history summary of a page
    History {
        /// Page id
        id: String,
    },

    /// Show read and update restrictions of a page
    Restrictions {
        /// Page id
        id: String,
    },

    /// Restrict an operation on a page to groups and users
    Restrict(RestrictArgs),

    /// Remove groups and users from a page restriction
    Unrestrict(RestrictArgs),
}

#[derive(Args, Debug)]
pub struct BodyArgs {
    /// Page body in storage format
    #[arg(long, conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the body from a file ("-" for stdin)
    #[arg(long, short = 'F')]
    pub body_file: Option<PathBuf>,
}

impl BodyArgs {
    fn read(&self) -> Result<String> {
        read_body(self.body.as_deref(), self.body_file.as_deref())
    }
}

#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Page id
    #[arg(required_unless_present = "title", conflicts_with_all = ["space", "title"])]
    pub id: Option<String>,

    /// Space key, used with --title
    #[arg(long, short = 's', requires = "title")]
    pub space: Option<String>,

    /// Page title, used with --space
    #[arg(long, short = 't', requires = "space")]
    pub title: Option<String>,

    /// Comma separated list of properties to expand
    #[arg(long, default_value = "space,version")]
    pub expand: String,

    /// Print the body
    #[arg(long, short = 'b')]
    pub body: bool,

    /// Open the page in the browser
    #[arg(long, short = 'w')]
    pub web: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Space key
    #[arg(long, short = 's')]
    pub space: String,

    /// Id of the parent page
    #[arg(long, short = 'p')]
    pub parent: String,

    /// Page title
    #[arg(long, short = 't')]
    pub title: String,

    #[command(flatten)]
    pub body: BodyArgs,

    /// Content type
    #[arg(long = "type", default_value = PAGE)]
    pub content_type: String,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Page id
    pub id: String,

    /// Page title
    #[arg(long, short = 't')]
    pub title: String,

    #[command(flatten)]
    pub body: BodyArgs,

    /// Move the page under this parent
    #[arg(long, short = 'p')]
    pub parent: Option<String>,

    /// Content type
    #[arg(long = "type", default_value = PAGE)]
    pub content_type: String,
}

#[derive(Args, Debug)]
pub struct UpsertArgs {
    /// Id of the parent page. The page is looked up in the parent's space.
    #[arg(long, short = 'p')]
    pub parent: String,

    /// Page title
    #[arg(long, short = 't')]
    pub title: String,

    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Args, Debug)]
pub struct RestrictArgs {
    /// Page id
    pub id: String,

    /// Operation to restrict (read or update)
    #[arg(long, short = 'o')]
    pub operation: RestrictionOperation,

    /// Group name (repeatable)
    #[arg(long, short = 'g')]
    pub group: Vec<String>,

    /// Username (repeatable)
    #[arg(long, short = 'u')]
    pub user: Vec<String>,
}

impl RestrictArgs {
    fn ensure_subjects(&self) -> Result<()> {
        if self.group.is_empty() && self.user.is_empty() {
            bail!("Give at least one --group or --user");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct PageDetail {
    #[serde(flatten)]
    content: Content,
    url: Option<String>,
    #[serde(skip)]
    show_body: bool,
}

impl TableOutput for PageDetail {
    fn print_table(&self, color: bool) {
        let page = &self.content;
        let title = if color {
            style(&page.title).bold().to_string()
        } else {
            page.title.clone()
        };

        println!("{}", title);
        println!();
        print_field("  ID", &page.id, color);
        print_field("  Type", &page.content_type, color);
        if let Some(status) = &page.status {
            print_field("  Status", &format_status(status, color), color);
        }
        if let Some(space) = page.space_key() {
            print_field("  Space", space, color);
        }
        if let Some(version) = &page.version {
            let mut line = version.number.to_string();
            if let Some(when) = &version.when {
                line.push_str(&format!(" ({})", format_relative_time(when)));
            }
            if let Some(by) = &version.by {
                line.push_str(&format!(" by {}", by.name()));
            }
            print_field("  Version", &line, color);
        }
        if let Some(url) = &self.url {
            println!();
            println!("  URL: {}", url);
        }
        if self.show_body {
            println!();
            println!("{}", page.storage_value().unwrap_or_default());
        }
    }
}

#[derive(Debug, Serialize)]
struct UpsertResult {
    outcome: &'static str,
    id: Option<String>,
    title: Option<String>,
    version: Option<u64>,
    url: Option<String>,
}

impl UpsertResult {
    fn new(upsert: &Upsert, base_url: &str) -> Self {
        let content = upsert.content();
        Self {
            outcome: upsert.as_str(),
            id: content.map(|c| c.id.clone()),
            title: content.map(|c| c.title.clone()),
            version: content.and_then(Content::version_number),
            url: content
                .and_then(|c| c.links.tinyui.as_deref().or(c.links.webui.as_deref()))
                .map(|link| join_link(base_url, link)),
        }
    }
}

impl TableOutput for UpsertResult {
    fn print_table(&self, color: bool) {
        let marker = if color {
            style("✓").green().bold().to_string()
        } else {
            "✓".to_string()
        };
        let label = match self.outcome {
            "unchanged" => "Page is already up to date",
            "created" => "Created page",
            _ => "Updated page",
        };

        match (&self.id, &self.title) {
            (Some(id), Some(title)) => println!("{} {} {} ({})", marker, label, title, id),
            _ => println!("{} {}", marker, label),
        }
        if let Some(version) = self.version {
            println!("  Version: {}", version);
        }
        if let Some(url) = &self.url {
            println!("  URL: {}", url);
        }
    }
}

impl TableOutput for History {
    fn print_table(&self, color: bool) {
        let last = &self.last_updated;
        print_field("Latest version", &last.number.to_string(), color);
        if let Some(when) = &last.when {
            print_field(
                "Last updated",
                &format!("{} ({})", format_time(when), format_relative_time(when)),
                color,
            );
        }
        if let Some(by) = &last.by {
            print_field("Updated by", by.name(), color);
        }
        if let Some(message) = last.message.as_deref().filter(|m| !m.is_empty()) {
            print_field("Message", message, color);
        }
        if let Some(created) = &self.created_date {
            print_field("Created", &format_time(created), color);
        }
        if let Some(by) = &self.created_by {
            print_field("Created by", by.name(), color);
        }
    }
}

impl TableOutput for PageRestrictions {
    fn print_table(&self, color: bool) {
        for operation in [RestrictionOperation::Read, RestrictionOperation::Update] {
            let heading = if color {
                style(operation.as_str()).bold().to_string()
            } else {
                operation.as_str().to_string()
            };
            println!("{}", heading);
            match self.get(operation) {
                Some(restriction) => print_subjects(restriction, color),
                None => println!("  (unrestricted)"),
            }
        }
    }
}

fn print_subjects(restriction: &OperationRestriction, color: bool) {
    let groups = restriction.group_names();
    let users = restriction.user_names();
    if groups.is_empty() && users.is_empty() {
        println!("  (unrestricted)");
        return;
    }
    if !groups.is_empty() {
        print_field("  Groups", &groups.join(", "), color);
    }
    if !users.is_empty() {
        print_field("  Users", &users.join(", "), color);
    }
}

impl PageCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            PageSubcommand::View(args) => view(args, global),
            PageSubcommand::Create(args) => create(args, global),
            PageSubcommand::Update(args) => update(args, global),
            PageSubcommand::Upsert(args) => upsert(args, global),
            PageSubcommand::History { id } => history(id, global),
            PageSubcommand::Restrictions { id } => restrictions(id, global),
            PageSubcommand::Restrict(args) => restrict(args, global),
            PageSubcommand::Unrestrict(args) => unrestrict(args, global),
        }
    }
}

fn find_page(confluence: &Confluence, args: &ViewArgs) -> Result<Content> {
    let query = ContentQuery::expanding(args.expand.clone());
    if let Some(id) = &args.id {
        return Ok(confluence.get_page_by_id(id, &query)?);
    }

    let (Some(space), Some(title)) = (&args.space, &args.title) else {
        bail!("Give a page id, or --space and --title");
    };
    match confluence
        .get_page_by_title(space, title, &query)?
        .into_single(space, title)?
    {
        Some(page) => Ok(page),
        None => bail!("No page titled '{title}' in space {space}"),
    }
}

fn view(args: &ViewArgs, global: &GlobalOptions) -> Result<()> {
    let confluence = global.connect()?;
    let content = find_page(&confluence, args)?;
    let url = content
        .links
        .webui
        .as_deref()
        .map(|link| join_link(confluence.client().base_url(), link));

    if args.web {
        let Some(url) = url else {
            bail!("The server returned no web link for page {}", content.id);
        };
        global.output().write_info(&format!("Opening {url} in your browser"));
        return open_browser(&url);
    }

    global.output().write(&PageDetail {
        content,
        url,
        show_body: args.body,
    })
}

fn create(args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
    let body = args.body.read()?;
    let confluence = global.connect()?;
    let created = confluence.create_page(
        &args.space,
        &args.parent,
        &args.title,
        &body,
        &args.content_type,
    )?;

    let result = UpsertResult::new(&Upsert::Created(created), confluence.client().base_url());
    global.output().write(&result)
}

fn update(args: &UpdateArgs, global: &GlobalOptions) -> Result<()> {
    let body = args.body.read()?;
    let confluence = global.connect()?;
    let outcome = confluence.update_page(
        args.parent.as_deref(),
        &args.id,
        &args.title,
        &body,
        &args.content_type,
    )?;

    global
        .output()
        .write(&UpsertResult::new(&outcome, confluence.client().base_url()))
}

fn upsert(args: &UpsertArgs, global: &GlobalOptions) -> Result<()> {
    let body = args.body.read()?;
    let confluence = global.connect()?;
    let outcome = confluence.update_or_create(&args.parent, &args.title, &body)?;

    global
        .output()
        .write(&UpsertResult::new(&outcome, confluence.client().base_url()))
}

fn history(id: &str, global: &GlobalOptions) -> Result<()> {
    let confluence = global.connect()?;
    global.output().write(&confluence.history(id)?)
}

fn restrictions(id: &str, global: &GlobalOptions) -> Result<()> {
    let confluence = global.connect()?;
    let restrictions = confluence.get_page_restrictions(id, Some("restrictions.user,restrictions.group"))?;
    global.output().write(&restrictions)
}

fn restrict(args: &RestrictArgs, global: &GlobalOptions) -> Result<()> {
    args.ensure_subjects()?;
    let confluence = global.connect()?;
    confluence.add_page_restrictions(&args.id, args.operation, &args.group, &args.user)?;

    global.output().write_success(&format!(
        "Restricted {} on page {}",
        args.operation, args.id
    ));
    Ok(())
}

fn unrestrict(args: &RestrictArgs, global: &GlobalOptions) -> Result<()> {
    args.ensure_subjects()?;
    let confluence = global.connect()?;
    confluence.delete_page_restrictions(&args.id, args.operation, &args.group, &args.user)?;

    global.output().write_success(&format!(
        "Removed {} restrictions on page {}",
        args.operation, args.id
    ));
    Ok(())
}
