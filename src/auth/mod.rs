//
//  atlassian-api
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Basic credentials (username plus password or API token) and where they
//! come from.
//!
//! ## Resolution Order
//!
//! 1. `ATL_USERNAME` and `ATL_TOKEN` environment variables, when both are set
//! 2. The host's `user` from the configuration file and the secret stored in
//!    the keyring under the host key
//!
//! ## Module Structure
//!
//! - [`keyring`]: Secret storage in the system keyring
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_api::auth::{Credentials, KeyringStore};
//! use atlassian_api::config::Config;
//!
//! let config = Config::load()?;
//! let credentials = Credentials::resolve("wiki.example.com", &config, &KeyringStore::new())?;
//! println!("Authenticating as {}", credentials.username);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod keyring;

pub use keyring::*;

use std::fmt;

use anyhow::{anyhow, Result};

use crate::config::Config;

/// Environment variable holding the username.
pub const USERNAME_ENV: &str = "ATL_USERNAME";

/// Environment variable holding the password or API token.
pub const TOKEN_ENV: &str = "ATL_TOKEN";

/// Basic-auth credentials for one host.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The login name (an e-mail address on Atlassian Cloud).
    pub username: String,
    /// The password or API token.
    pub secret: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"********")
            .finish()
    }
}

impl Credentials {
    /// Creates credentials from a username and secret.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Reads credentials from `ATL_USERNAME` and `ATL_TOKEN`.
    ///
    /// Returns `None` unless both are set and non-empty.
    pub fn from_env() -> Option<Self> {
        Self::from_values(
            std::env::var(USERNAME_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        )
    }

    fn from_values(username: Option<String>, secret: Option<String>) -> Option<Self> {
        let username = username.filter(|u| !u.is_empty())?;
        let secret = secret.filter(|s| !s.is_empty())?;
        Some(Self::new(username, secret))
    }

    /// Resolves the credentials for `host`.
    ///
    /// # Errors
    ///
    /// Fails when neither the environment nor the configuration and keyring
    /// provide both a username and a secret.
    pub fn resolve(host: &str, config: &Config, store: &KeyringStore) -> Result<Self> {
        if let Some(credentials) = Self::from_env() {
            tracing::debug!(host, "Using credentials from environment");
            return Ok(credentials);
        }

        let username = config
            .host_config(host)
            .and_then(|h| h.user.clone())
            .ok_or_else(|| anyhow!("No username configured for {host}. Run 'atl auth login' first"))?;
        let secret = store
            .get(&crate::config::normalize_host(host))?
            .ok_or_else(|| anyhow!("No secret stored for {host}. Run 'atl auth login' first"))?;

        Ok(Self::new(username, secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", Credentials::new("jdoe", "hunter2"));
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_from_values_requires_both() {
        assert_eq!(
            Credentials::from_values(Some("jdoe".into()), Some("t".into())),
            Some(Credentials::new("jdoe", "t"))
        );
        assert_eq!(Credentials::from_values(Some("jdoe".into()), None), None);
        assert_eq!(Credentials::from_values(Some(String::new()), Some("t".into())), None);
    }
}
