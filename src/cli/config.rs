//
//  atlassian-api
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Core keys are addressed by name. Host keys are addressed either with the
//! global `--host` option or as `hosts.<host>.<key>`:
//!
//! ```bash
//! atl config set default_host wiki.example.com
//! atl config set verify_ssl false --host wiki.example.com
//! atl config get hosts.wiki.example.com.user
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;
use serde::Serialize;

use crate::config::{Config, HOST_KEYS};
use crate::output::TableOutput;

use super::GlobalOptions;

/// Manage CLI configuration
#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,

        /// Configuration value
        value: String,
    },

    /// Unset a configuration value
    Unset {
        /// Configuration key
        key: String,
    },

    /// List all configuration values
    #[command(visible_alias = "ls")]
    List,

    /// Show configuration file path
    Path,
}

/// Where a configuration key lives.
#[derive(Debug, PartialEq, Eq)]
enum KeyTarget<'a> {
    Core(&'a str),
    Host { host: String, key: &'a str },
}

impl<'a> KeyTarget<'a> {
    fn parse(key: &'a str, host: Option<&str>) -> Self {
        if let Some(rest) = key.strip_prefix("hosts.") {
            if let Some((host, key)) = rest.rsplit_once('.') {
                if HOST_KEYS.contains(&key) {
                    return Self::Host {
                        host: host.to_string(),
                        key,
                    };
                }
            }
        }
        match host {
            Some(host) => Self::Host {
                host: host.to_string(),
                key,
            },
            None => Self::Core(key),
        }
    }
}

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: String,
    value: String,
}

impl TableOutput for ConfigEntry {
    fn print_table(&self, color: bool) {
        if color {
            println!("{} = {}", style(&self.key).cyan(), self.value);
        } else {
            println!("{} = {}", self.key, self.value);
        }
    }
}

impl ConfigCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get { key } => get(key, global),
            ConfigSubcommand::Set { key, value } => set(key, value, global),
            ConfigSubcommand::Unset { key } => unset(key, global),
            ConfigSubcommand::List => list(global),
            ConfigSubcommand::Path => path(global),
        }
    }
}

fn get(key: &str, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let value = match KeyTarget::parse(key, global.host.as_deref()) {
        KeyTarget::Core(key) => config.get(key),
        KeyTarget::Host { host, key } => config.get_host_value(&host, key),
    };

    if global.json {
        let result = serde_json::json!({ "key": key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if let Some(v) = value {
        println!("{}", v);
    }
    Ok(())
}

fn set(key: &str, value: &str, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    match KeyTarget::parse(key, global.host.as_deref()) {
        KeyTarget::Core(key) => config.set(key, value)?,
        KeyTarget::Host { host, key } => config.set_host_value(&host, key, value)?,
    }
    config.save()?;

    if global.json {
        let result = serde_json::json!({ "success": true, "key": key, "value": value });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{} Set {} = {}", style("✓").green(), style(key).cyan(), value);
    }
    Ok(())
}

fn unset(key: &str, global: &GlobalOptions) -> Result<()> {
    let mut config = Config::load()?;
    let removed = match KeyTarget::parse(key, global.host.as_deref()) {
        KeyTarget::Core(key) => config.unset(key)?,
        KeyTarget::Host { host, key } => config.unset_host_value(&host, key)?,
    };
    config.save()?;

    if global.json {
        let result = serde_json::json!({ "success": true, "key": key, "removed": removed });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if removed {
        println!("{} Unset {}", style("✓").green(), style(key).cyan());
    } else {
        println!("{} was not set", style(key).cyan());
    }
    Ok(())
}

fn list(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let entries: Vec<ConfigEntry> = config
        .entries()
        .into_iter()
        .map(|(key, value)| ConfigEntry { key, value })
        .collect();

    let output = global.output();
    if entries.is_empty() && !output.is_json() {
        output.write_info("No configuration values set");
        return Ok(());
    }
    output.write_list(&entries)
}

fn path(global: &GlobalOptions) -> Result<()> {
    let config_path = Config::config_path()?;

    if global.json {
        let result = serde_json::json!({
            "path": config_path.display().to_string(),
            "exists": config_path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", config_path.display());
    }
    Ok(())
}
