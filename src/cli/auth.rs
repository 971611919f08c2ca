//
//  atlassian-api
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands
//!
//! `atl` authenticates with HTTP basic auth. The username is recorded in the
//! configuration file and the password or API token in the system keyring.
//!
//! ```bash
//! # Interactive login
//! atl auth login --host https://wiki.example.com
//!
//! # Non-interactive login, token on stdin
//! echo "$TOKEN" | atl auth login --host wiki.example.com --username jdoe --with-token
//! ```

use std::io::BufRead;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::auth::{Credentials, KeyringStore, TOKEN_ENV, USERNAME_ENV};
use crate::config::{base_url_for, normalize_host, Config, HostConfig};
use crate::interactive::{
    is_interactive, prompt_confirm_with_default, prompt_input, prompt_input_with_default,
    prompt_password,
};
use crate::output::{format_bool, print_field, TableOutput};

use super::GlobalOptions;

/// Manage stored credentials
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store credentials for a host
    Login(LoginArgs),

    /// Remove the stored secret and settings for a host
    Logout {
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show configured hosts and stored credentials
    Status,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username (an e-mail address on Atlassian Cloud)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read the password or API token from stdin
    #[arg(long)]
    pub with_token: bool,
}

#[derive(Debug, Serialize)]
struct HostStatus {
    host: String,
    url: String,
    user: Option<String>,
    secret_stored: bool,
    verify_ssl: bool,
    default: bool,
}

impl TableOutput for HostStatus {
    fn print_table(&self, color: bool) {
        let host_display = if self.default {
            format!("{} (default)", self.host)
        } else {
            self.host.clone()
        };
        let host_display = if color {
            style(host_display).cyan().bold().to_string()
        } else {
            host_display
        };

        println!("{}", host_display);
        print_field("  URL", &self.url, color);
        print_field("  User", self.user.as_deref().unwrap_or("-"), color);
        print_field("  Secret stored", &format_bool(self.secret_stored, color), color);
        print_field("  Verify TLS", &format_bool(self.verify_ssl, color), color);
    }
}

impl AuthCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global),
            AuthSubcommand::Logout { yes } => logout(*yes, global),
            AuthSubcommand::Status => status(global),
        }
    }
}

fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let interactive = is_interactive();
    let output = global.output();

    let raw_host = match &global.host {
        Some(host) => host.clone(),
        None if interactive => prompt_input("Atlassian base URL (e.g. https://wiki.example.com)")?,
        None => bail!("--host is required when not running in a terminal"),
    };
    let host = normalize_host(&raw_host);
    if host.is_empty() {
        bail!("Host must not be empty");
    }

    let mut config = Config::load()?;
    let existing_user = config.host_config(&host).and_then(|h| h.user.clone());

    let username = match (&args.username, existing_user) {
        (Some(username), _) => username.clone(),
        (None, Some(existing)) if !interactive => existing,
        (None, existing) if interactive => match existing {
            Some(existing) => prompt_input_with_default("Username", &existing)?,
            None => prompt_input("Username")?,
        },
        (None, _) => bail!("--username is required when not running in a terminal"),
    };

    let secret = if args.with_token {
        read_secret_from_stdin()?
    } else if interactive {
        prompt_password("Password or API token")?
    } else {
        bail!("Use --with-token to read the secret from stdin when not running in a terminal");
    };
    if secret.is_empty() {
        bail!("The secret must not be empty");
    }

    KeyringStore::new().store(&host, &secret)?;

    let url = config
        .host_config(&host)
        .map(|h| h.url.clone())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| base_url_for(&raw_host));
    config.upsert_host(
        &host,
        HostConfig {
            url,
            user: Some(username.clone()),
            verify_ssl: !global.insecure,
        },
    );
    if config.core.default_host.is_none() {
        config.core.default_host = Some(host.clone());
    }
    config.save()?;

    if global.insecure {
        output.write_warning(&format!("TLS certificate verification is disabled for {host}"));
    }
    output.write_success(&format!("Logged in to {host} as {username}"));
    Ok(())
}

fn logout(yes: bool, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let host = config
        .resolve_host(global.host.as_deref())
        .ok_or_else(|| anyhow!("No host selected. Use --host to choose one"))?;

    if !yes
        && is_interactive()
        && !prompt_confirm_with_default(&format!("Remove the stored secret and settings for {host}?"), true)?
    {
        return Ok(());
    }

    KeyringStore::new().delete(&host)?;
    config.remove_host(&host);
    config.save()?;
    global.output().write_success(&format!("Logged out of {host}"));
    Ok(())
}

fn status(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let output = global.output();
    let store = KeyringStore::new();

    if Credentials::from_env().is_some() {
        output.write_info(&format!(
            "Credentials from {USERNAME_ENV} and {TOKEN_ENV} override the stored ones"
        ));
    }

    let default = config.resolve_host(None);
    let mut hosts: Vec<HostStatus> = config
        .hosts
        .iter()
        .map(|(host, host_config)| HostStatus {
            host: host.clone(),
            url: host_config.base_url(host),
            user: host_config.user.clone(),
            secret_stored: store.has_secret(host),
            verify_ssl: host_config.verify_ssl,
            default: default.as_deref() == Some(host.as_str()),
        })
        .collect();
    hosts.sort_by(|a, b| a.host.cmp(&b.host));

    if hosts.is_empty() && !output.is_json() {
        output.write_info("No hosts configured. Run 'atl auth login' to add one.");
        return Ok(());
    }

    output.write_list(&hosts)
}

/// Reads the first line of stdin, without its line terminator.
fn read_secret_from_stdin() -> Result<String> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read secret from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
