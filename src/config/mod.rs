//
//  atlassian-api
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Loading, saving and editing the `atl` configuration file.
//!
//! ## Configuration File Location
//!
//! `config.toml` in the platform configuration directory, unless the
//! `ATL_CONFIG` environment variable names another file:
//!
//! - **Linux**: `~/.config/atl/config.toml`
//! - **macOS**: `~/Library/Application Support/atl/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\atl\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! default_host = "wiki.example.com"
//!
//! [hosts."wiki.example.com"]
//! url = "https://wiki.example.com"
//! user = "jdoe"
//! verify_ssl = true
//! ```
//!
//! Secrets are never written here; see [`crate::auth::KeyringStore`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_api::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("default_host", "wiki.example.com")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O
//! - [`hosts`]: Host name normalization and base URL derivation

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "ATL_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CORE_KEYS: &[&str] = &["default_host"];

/// Keys accepted by [`Config::get_host_value`] and [`Config::set_host_value`].
pub const HOST_KEYS: &[&str] = &["url", "user", "verify_ssl"];

/// The complete configuration state.
///
/// Serialized to and from TOML. Secrets are kept out of this struct; they
/// live in the OS keyring.
///
/// # Fields
///
/// * `core` - Settings not tied to a host
/// * `hosts` - Map of normalized host name to [`HostConfig`]
///
/// # Examples
///
/// ## Creating a Default Configuration
///
/// ```rust
/// use atlassian_api::config::Config;
///
/// let config = Config::default();
/// assert!(config.hosts.is_empty());
/// assert_eq!(config.resolve_host(None), None);
/// ```
///
/// ## Loading from Disk
///
/// ```rust,no_run
/// use atlassian_api::config::Config;
///
/// let config = Config::load()?;
/// if let Some(host) = config.resolve_host(None) {
///     println!("Using {host}");
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Notes
///
/// - Every field has a serde default, so a partial file loads cleanly
/// - The file is created on first save
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Settings that apply whichever host is selected.
    #[serde(default)]
    pub core: CoreConfig,

    /// Per-host settings keyed by normalized host.
    ///
    /// Keys are bare host names with any context path kept, e.g.
    /// `wiki.example.com` or `example.com/wiki`.
    #[serde(default)]
    pub hosts: HashMap<String, HostConfig>,
}

/// Settings not tied to a host.
///
/// # Fields
///
/// * `default_host` - Host used when neither `--host` nor `ATL_HOST` is given
///
/// # Examples
///
/// ```rust
/// use atlassian_api::config::CoreConfig;
///
/// assert!(CoreConfig::default().default_host.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CoreConfig {
    /// Host used when `--host` is not given.
    ///
    /// Stored normalized, see [`normalize_host`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_host: Option<String>,
}

/// Serde default for [`HostConfig::verify_ssl`].
///
/// # Returns
///
/// `true`: certificates are verified unless a host opts out.
fn default_verify_ssl() -> bool {
    true
}

/// Settings for one Atlassian instance.
///
/// # Fields
///
/// * `url` - Base URL used for requests
/// * `user` - Username for basic auth
/// * `verify_ssl` - Whether TLS certificates are checked
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `url` | empty (derived from the host name, see [`HostConfig::base_url`]) |
/// | `user` | `None` |
/// | `verify_ssl` | `true` |
///
/// # Examples
///
/// ```rust
/// use atlassian_api::config::HostConfig;
///
/// let host = HostConfig::default();
/// assert!(host.verify_ssl);
/// assert_eq!(host.base_url("wiki.example.com"), "https://wiki.example.com");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// Base URL, including any context path (`https://example.com/wiki`).
    #[serde(default)]
    pub url: String,

    /// Basic-auth username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Whether server certificates are verified.
    #[serde(default = "default_verify_ssl")]
    pub verify_ssl: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user: None,
            verify_ssl: true,
        }
    }
}

impl Config {
    /// Loads the configuration from [`Config::config_path`].
    ///
    /// # Returns
    ///
    /// The parsed configuration, or the default configuration when the file
    /// does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined, the file cannot
    /// be read, or its contents are not valid TOML for this schema.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use atlassian_api::config::Config;
    ///
    /// let config = Config::load()?;
    /// println!("{} host(s) configured", config.hosts.len());
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads the configuration from `path`.
    ///
    /// # Parameters
    ///
    /// * `path` - The TOML file to read
    ///
    /// # Returns
    ///
    /// The parsed configuration, or the default when `path` does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error naming `path` if the contents cannot be parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Saves the configuration to [`Config::config_path`].
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be determined or the file cannot
    /// be written.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use atlassian_api::config::Config;
    ///
    /// let mut config = Config::load()?;
    /// config.set("default_host", "wiki.example.com")?;
    /// config.save()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Parameters
    ///
    /// * `path` - Destination file, overwritten if present
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Returns the configuration file path.
    ///
    /// # Returns
    ///
    /// The value of `ATL_CONFIG` when set and non-empty, otherwise
    /// `config.toml` in the platform configuration directory for `atl`.
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "atl")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Looks up the settings for a host.
    ///
    /// # Parameters
    ///
    /// * `host` - A host in any form [`normalize_host`] accepts, including
    ///   a full URL
    ///
    /// # Returns
    ///
    /// The host's settings, or `None` if the host is not configured.
    pub fn host_config(&self, host: &str) -> Option<&HostConfig> {
        self.hosts.get(&normalize_host(host))
    }

    /// Picks the host to talk to.
    ///
    /// # Parameters
    ///
    /// * `explicit` - The `--host` value, if any
    ///
    /// # Returns
    ///
    /// In order of precedence:
    ///
    /// 1. `explicit`, normalized, when non-empty
    /// 2. `core.default_host`
    /// 3. The only configured host, when exactly one exists
    ///
    /// `None` when none of these apply.
    ///
    /// # Example
    ///
    /// ```rust
    /// use atlassian_api::config::{Config, HostConfig};
    ///
    /// let mut config = Config::default();
    /// config.upsert_host("https://wiki.example.com", HostConfig::default());
    /// assert_eq!(config.resolve_host(None).as_deref(), Some("wiki.example.com"));
    /// assert_eq!(
    ///     config.resolve_host(Some("other.example.com")).as_deref(),
    ///     Some("other.example.com")
    /// );
    /// ```
    pub fn resolve_host(&self, explicit: Option<&str>) -> Option<String> {
        if let Some(host) = explicit.filter(|h| !h.is_empty()) {
            return Some(normalize_host(host));
        }
        if let Some(host) = &self.core.default_host {
            return Some(normalize_host(host));
        }
        if self.hosts.len() == 1 {
            return self.hosts.keys().next().cloned();
        }
        None
    }

    /// Adds or replaces the settings for a host.
    ///
    /// # Parameters
    ///
    /// * `host` - The host, normalized before use as a key
    /// * `config` - The settings to store
    ///
    /// # Returns
    ///
    /// The normalized key the settings were stored under.
    pub fn upsert_host(&mut self, host: &str, config: HostConfig) -> String {
        let key = normalize_host(host);
        self.hosts.insert(key.clone(), config);
        key
    }

    /// Forgets a host.
    ///
    /// # Parameters
    ///
    /// * `host` - The host, in any form [`normalize_host`] accepts
    ///
    /// # Returns
    ///
    /// The removed settings, or `None` if the host was not configured.
    ///
    /// # Notes
    ///
    /// `core.default_host` is cleared when it names the removed host.
    pub fn remove_host(&mut self, host: &str) -> Option<HostConfig> {
        let key = normalize_host(host);
        if self.core.default_host.as_deref().map(normalize_host).as_deref() == Some(key.as_str()) {
            self.core.default_host = None;
        }
        self.hosts.remove(&key)
    }

    /// Reads a core setting.
    ///
    /// # Parameters
    ///
    /// * `key` - One of [`CORE_KEYS`]
    ///
    /// # Returns
    ///
    /// The value, or `None` for unset or unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_host" => self.core.default_host.clone(),
            _ => None,
        }
    }

    /// Writes a core setting.
    ///
    /// # Parameters
    ///
    /// * `key` - One of [`CORE_KEYS`]
    /// * `value` - The new value. Host names are normalized.
    ///
    /// # Errors
    ///
    /// Fails for keys not listed in [`CORE_KEYS`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_host" => self.core.default_host = Some(normalize_host(value)),
            _ => bail!("Unknown configuration key '{key}' (known keys: {})", CORE_KEYS.join(", ")),
        }
        Ok(())
    }

    /// Clears a core setting.
    ///
    /// # Returns
    ///
    /// `true` if a value was removed, `false` if it was not set.
    ///
    /// # Errors
    ///
    /// Fails for keys not listed in [`CORE_KEYS`].
    pub fn unset(&mut self, key: &str) -> Result<bool> {
        match key {
            "default_host" => Ok(self.core.default_host.take().is_some()),
            _ => bail!("Unknown configuration key '{key}' (known keys: {})", CORE_KEYS.join(", ")),
        }
    }

    /// Reads a host setting.
    ///
    /// # Parameters
    ///
    /// * `host` - The host, in any form [`normalize_host`] accepts
    /// * `key` - One of [`HOST_KEYS`]
    ///
    /// # Returns
    ///
    /// The value as a string, or `None` when the host, key or value is
    /// missing. An empty `url` counts as missing.
    pub fn get_host_value(&self, host: &str, key: &str) -> Option<String> {
        let host = self.host_config(host)?;
        match key {
            "url" => Some(host.url.clone()).filter(|u| !u.is_empty()),
            "user" => host.user.clone(),
            "verify_ssl" => Some(host.verify_ssl.to_string()),
            _ => None,
        }
    }

    /// Writes a host setting, creating the host entry if needed.
    ///
    /// # Errors
    ///
    /// Fails for keys not listed in [`HOST_KEYS`] and for a `verify_ssl`
    /// value that is not `true` or `false`.
    pub fn set_host_value(&mut self, host: &str, key: &str, value: &str) -> Result<()> {
        let entry = self.hosts.entry(normalize_host(host)).or_default();
        match key {
            "url" => entry.url = value.trim_end_matches('/').to_string(),
            "user" => entry.user = Some(value.to_string()),
            "verify_ssl" => {
                entry.verify_ssl = value
                    .parse()
                    .with_context(|| format!("verify_ssl must be 'true' or 'false', got '{value}'"))?
            }
            _ => bail!("Unknown host key '{key}' (known keys: {})", HOST_KEYS.join(", ")),
        }
        Ok(())
    }

    /// Clears a host setting.
    ///
    /// # Returns
    ///
    /// `true` if a value was changed. `verify_ssl` is reset to `true`, so
    /// clearing it only reports a change when it was `false`.
    ///
    /// # Errors
    ///
    /// Fails for keys not listed in [`HOST_KEYS`].
    pub fn unset_host_value(&mut self, host: &str, key: &str) -> Result<bool> {
        let Some(entry) = self.hosts.get_mut(&normalize_host(host)) else {
            return Ok(false);
        };
        match key {
            "url" => Ok(!std::mem::take(&mut entry.url).is_empty()),
            "user" => Ok(entry.user.take().is_some()),
            "verify_ssl" => Ok(!std::mem::replace(&mut entry.verify_ssl, true)),
            _ => bail!("Unknown host key '{key}' (known keys: {})", HOST_KEYS.join(", ")),
        }
    }

    /// Lists every set value.
    ///
    /// # Returns
    ///
    /// `(key, value)` pairs: core settings first, then host settings as
    /// `hosts.<host>.<key>` with hosts sorted by name.
    ///
    /// # Example
    ///
    /// ```rust
    /// use atlassian_api::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.set_host_value("wiki.example.com", "user", "jdoe")?;
    /// assert!(config
    ///     .entries()
    ///     .contains(&("hosts.wiki.example.com.user".to_string(), "jdoe".to_string())));
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = CORE_KEYS
            .iter()
            .filter_map(|key| self.get(key).map(|value| (key.to_string(), value)))
            .collect();

        let mut hosts: Vec<&String> = self.hosts.keys().collect();
        hosts.sort();
        for host in hosts {
            for key in HOST_KEYS {
                if let Some(value) = self.get_host_value(host, key) {
                    entries.push((format!("hosts.{host}.{key}"), value));
                }
            }
        }
        entries
    }
}
