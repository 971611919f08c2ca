//
//  atlassian-api
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secret Storage
//!
//! Secrets (passwords or API tokens) are kept in the platform keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! ## Storage Model
//!
//! | Keyring field | Value |
//! |---------------|-------|
//! | Service | `atlassian-api` |
//! | Account | The normalized host (`wiki.example.com`) |
//! | Password | The secret |
//!
//! The username lives in the configuration file, never in the keyring.
//!
//! ## Example
//!
//! ```rust,no_run
//! use atlassian_api::auth::KeyringStore;
//!
//! fn rotate(host: &str, token: &str) -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.delete(host)?;
//!     store.store(host, token)?;
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use keyring::Entry;

/// The service name every secret is stored under.
pub const SERVICE_NAME: &str = "atlassian-api";

/// Secret storage in the system keyring.
pub struct KeyringStore {
    /// The service name identifying this application in the keyring.
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    /// Creates a store using [`SERVICE_NAME`].
    ///
    /// No keyring access happens until a method is called.
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Creates a store under a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// The service name entries are stored under.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Stores the secret for `host`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Fails if the keyring is unavailable or access was denied.
    pub fn store(&self, host: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        entry
            .set_password(secret)
            .with_context(|| format!("Failed to store secret for {host} in the keyring"))?;
        Ok(())
    }

    /// Retrieves the secret for `host`.
    ///
    /// Returns `Ok(None)` when no entry exists.
    pub fn get(&self, host: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, host)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read secret for {host}")),
        }
    }

    /// Deletes the secret for `host`.
    ///
    /// Deleting a missing entry succeeds.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        match entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to delete secret for {host}")),
        }
    }

    /// Returns `true` if a secret is stored for `host`.
    ///
    /// Keyring errors are reported as "not stored".
    pub fn has_secret(&self, host: &str) -> bool {
        matches!(self.get(host), Ok(Some(_)))
    }
}
