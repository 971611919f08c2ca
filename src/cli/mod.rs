//
//  atlassian-api
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Command-line interface definitions for `atl`.
//!
//! Every subcommand lives in its own module and exposes a `run` method taking
//! the [`GlobalOptions`]. Commands that talk to a server obtain their client
//! through [`GlobalOptions::connect`], which resolves the host, credentials
//! and TLS setting in one place.

mod api;
mod auth;
mod completion;
mod config;
mod page;
mod search;
mod space;

pub use api::ApiCommand;
pub use auth::AuthCommand;
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use page::PageCommand;
pub use search::SearchCommand;
pub use space::SpaceCommand;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};

use crate::api::confluence::Confluence;
use crate::api::{AtlassianClient, Connection};
use crate::auth::{Credentials, KeyringStore};
use crate::config::{base_url_for, Config};
use crate::output::{OutputFormat, OutputWriter};

#[derive(Parser, Debug)]
#[command(
    name = "atl",
    version,
    about = "Work with Atlassian REST APIs from the command line",
    long_about = "atl is a CLI for Confluence and other Atlassian REST APIs.\n\n\
                  It reads, creates and updates pages, runs CQL searches, and gives \
                  raw access to any REST endpoint.",
    propagate_version = true,
    after_help = "Use 'atl <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Atlassian host or base URL (e.g. https://wiki.example.com)
    #[arg(long, global = true, env = "ATL_HOST")]
    pub host: Option<String>,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage stored credentials
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Manage CLI configuration
    Config(ConfigCommand),

    /// View spaces
    Space(SpaceCommand),

    /// View, create and update pages
    Page(PageCommand),

    /// Search content with CQL
    Search(SearchCommand),

    /// Make API requests
    Api(ApiCommand),

    /// Generate shell completion scripts
    Completion(CompletionCommand),

    /// Print version information
    Version,
}

impl GlobalOptions {
    /// The output writer for the selected format.
    pub fn output(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }

    /// Builds a transport client for the selected host.
    ///
    /// The host comes from `--host`/`ATL_HOST`, then `core.default_host`,
    /// then the only configured host.
    pub fn client(&self) -> Result<AtlassianClient> {
        let config = Config::load()?;
        let host = config.resolve_host(self.host.as_deref()).ok_or_else(|| {
            anyhow!("No host selected. Use --host, set ATL_HOST, or run 'atl auth login'")
        })?;

        let host_config = config.host_config(&host).cloned().unwrap_or_default();
        let base_url = match (&self.host, host_config.url.is_empty()) {
            (Some(explicit), true) => base_url_for(explicit),
            _ => host_config.base_url(&host),
        };

        let credentials = Credentials::resolve(&host, &config, &KeyringStore::new())?;
        let verify_tls = host_config.verify_ssl && !self.insecure;
        tracing::debug!(host = %host, base_url = %base_url, verify_tls, "Connecting");

        let connection = Connection::new(&base_url, credentials.username, credentials.secret)?
            .with_verify_tls(verify_tls);
        Ok(AtlassianClient::new(connection)?)
    }

    /// Builds a Confluence client for the selected host.
    pub fn connect(&self) -> Result<Confluence> {
        Ok(Confluence::new(self.client()?))
    }
}
