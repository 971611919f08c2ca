//
//  atlassian-api
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Atlassian API Library
//!
//! A client library and command-line interface for the REST APIs of
//! Atlassian server products, centered on Confluence.
//!
//! ## Overview
//!
//! The library is layered:
//!
//! - a transport ([`api::AtlassianClient`]) that sends authenticated JSON
//!   requests against a base URL and classifies the responses,
//! - a pagination helper ([`api::common::collect_pages`]) that walks
//!   offset/limit listings,
//! - a Confluence client ([`api::confluence::Confluence`]) with page lookup,
//!   create, update, update-or-create, search, space and restriction
//!   operations.
//!
//! The `atl` binary wraps these in a CLI.
//!
//! ## Module Structure
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`api`]: Transport, pagination and the Confluence client
//! - [`auth`]: Credentials and keychain storage
//! - [`config`]: Configuration file management
//! - [`output`]: Output formatting (Table, JSON)
//! - [`interactive`]: Interactive prompts
//! - [`util`]: Utility functions
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use atlassian_api::api::confluence::Confluence;
//! use atlassian_api::api::{AtlassianClient, Connection};
//!
//! let connection = Connection::new("https://wiki.example.com", "jdoe", "secret")?;
//! let confluence = Confluence::new(AtlassianClient::new(connection)?);
//!
//! let outcome = confluence.update_or_create("123456", "Release notes", "<p>v2</p>")?;
//! println!("{}", outcome.as_str());
//! # Ok::<(), atlassian_api::api::ApiError>(())
//! ```

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// REST transport, pagination and product clients.
pub mod api;

/// Credential resolution and secure storage via the system keychain.
pub mod auth;

/// Configuration file management.
///
/// Manages the CLI's configuration stored in platform-specific locations:
/// - Linux: `~/.config/atl/config.toml`
/// - macOS: `~/Library/Application Support/atl/config.toml`
/// - Windows: `%APPDATA%\atl\config.toml`
pub mod config;

/// Output formatting for table and JSON modes.
pub mod output;

/// Interactive terminal prompts.
pub mod interactive;

/// Utility functions and helpers.
///
/// Time formatting, truncation, body input and browser integration.
pub mod util;

/// Re-export of the main CLI struct for convenient access.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use atlassian_api::Cli;
///
/// let cli = Cli::parse();
/// ```
pub use cli::Cli;

/// Re-export of the configuration struct.
pub use config::Config;

/// Application name constant.
///
/// The name of the CLI binary, used for display purposes and completions.
pub const APP_NAME: &str = "atl";

/// Application version constant, taken from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use atlassian_api::VERSION;
///
/// println!("atl version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes allowing scripts to detect the outcome of a
/// command.
///
/// # Example
///
/// ```rust,no_run
/// use atlassian_api::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    ///
    /// An unspecified error occurred during execution.
    /// Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments. Reported by clap itself.
    pub const USAGE: i32 = 2;

    /// Authentication required or failed.
    ///
    /// The server answered 401 or 403. Run `atl auth login` to store
    /// credentials.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    ///
    /// The server answered 404: the page or space does not exist or the user
    /// may not see it.
    pub const NOT_FOUND: i32 = 8;
}
