//
//  atlassian-api
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP transport for Atlassian REST APIs and the
//! product clients built on top of it.
//!
//! ## Architecture
//!
//! The layers compose in one direction: product clients call the transport.
//!
//! - [`client`]: Transport client ([`AtlassianClient`]) and connection parameters
//! - [`request`]: Request, query string and header construction
//! - [`response`]: Response classification (body, no content, error)
//! - [`observer`]: Structured request/response events
//! - [`common`]: Shared error type and the pagination protocol
//! - [`confluence`]: Confluence content and space client
//!
//! ## Usage
//!
//! ```rust,no_run
//! use atlassian_api::api::{AtlassianClient, Connection};
//! use atlassian_api::api::confluence::Confluence;
//!
//! let connection = Connection::new("https://wiki.example.com", "jdoe", "s3cret")?;
//! let confluence = Confluence::new(AtlassianClient::new(connection)?);
//!
//! for page in confluence.search("space = DOCS and type = page", None, Some(50)) {
//!     println!("{} {}", page.id, page.title);
//! }
//! # Ok::<(), atlassian_api::api::ApiError>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`ApiError`]. Nothing is retried:
//!
//! - `Transport`: connection refused, timeout, TLS failure
//! - `Http`: non-2xx status, with the server's message and error body
//! - `MalformedResponse`: a read succeeded but its body is not the expected JSON
//! - `AmbiguousTitle`: a title lookup that needed one match found several

pub mod client;
pub mod common;
pub mod confluence;
pub mod observer;
pub mod request;
pub mod response;

pub use client::{AtlassianClient, Connection};
pub use common::ApiError;
