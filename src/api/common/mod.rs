//
//  atlassian-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for Atlassian REST Clients
//!
//! This module provides the types shared by every product client built on the
//! transport layer: the unified error type, server error message extraction,
//! and the pagination protocol (re-exported from [`pagination`]).
//!
//! # Example
//!
//! ```rust
//! use atlassian_api::api::common::ApiError;
//!
//! fn describe(result: Result<(), ApiError>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(e) if e.is_not_found() => "missing".to_string(),
//!         Err(e) => format!("failed: {e}"),
//!     }
//! }
//!
//! assert_eq!(describe(Ok(())), "ok");
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::api::confluence::Content;

mod pagination;

pub use pagination::*;

/// Unified error type for all Atlassian API operations.
///
/// The variants follow the failure taxonomy of the transport layer:
///
/// | Variant | Raised when |
/// |---------|-------------|
/// | `Transport` | Connection refused, timeout, TLS failure |
/// | `Http` | The server answered with a non-success status |
/// | `MalformedResponse` | A successful response that must carry JSON could not be decoded |
/// | `UnexpectedResponse` | A successful response is missing data the caller needs |
/// | `AmbiguousTitle` | A title lookup expected one match and found several |
/// | `InvalidUrl` | The configured base URL cannot be parsed |
/// | `Serialize` | A request body could not be turned into JSON |
///
/// Nothing in this crate retries; every variant reaches the immediate caller.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A network-level failure. Not retried.
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server returned a status other than 2xx.
    ///
    /// `message` is the human readable message extracted from the error body
    /// (or the raw body when no known format matched), `body` the parsed JSON
    /// error payload when the body was valid JSON.
    #[error("HTTP request failed with status {status}: {message}")]
    Http {
        /// The HTTP status code.
        status: u16,
        /// The extracted server message.
        message: String,
        /// The structured error payload, if any.
        body: Option<Value>,
    },

    /// A successful response whose body could not be decoded.
    #[error("Malformed success response (status {status}): {source}")]
    MalformedResponse {
        /// The HTTP status code of the response.
        status: u16,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// A successful response that did not contain the expected data.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// A title lookup matched more than one resource.
    ///
    /// All matches are carried so the caller can decide which one it meant.
    #[error("Ambiguous title '{title}' in space '{space}': {} matches", .matches.len())]
    AmbiguousTitle {
        /// The space the lookup ran in.
        space: String,
        /// The title that was looked up.
        title: String,
        /// Every resource the server returned.
        matches: Vec<Content>,
    },

    /// The configured base URL is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request body could not be serialized to JSON.
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    /// Returns the HTTP status code for [`ApiError::Http`] and
    /// [`ApiError::MalformedResponse`] errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::MalformedResponse { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the server answered 404.
    ///
    /// The transport layer never turns a 404 into an absent value itself;
    /// existence checks built on top use this to do so deliberately.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// Returns `true` if the server rejected the credentials (401 or 403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }
}

/// Extracts a human readable message from an Atlassian error body.
///
/// Each product reports errors a little differently:
///
/// - Confluence: `{"statusCode": 404, "message": "..."}`
/// - Jira: `{"errorMessages": ["..."], "errors": {}}`
/// - Stash / Bitbucket Server: `{"errors": [{"message": "..."}]}`
/// - Cloud-style: `{"error": {"message": "..."}}`
///
/// Returns `None` when the body is not JSON or matches none of these shapes.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;

    if let Some(message) = json.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    if let Some(message) = json
        .get("errorMessages")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    if let Some(message) = json
        .get("errors")
        .and_then(Value::as_array)
        .and_then(|arr| arr.first())
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
    {
        return Some(message.to_string());
    }

    json.get("error")
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_confluence_message() {
        let body = r#"{"statusCode":404,"message":"No space with key : NOPE"}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("No space with key : NOPE")
        );
    }

    #[test]
    fn test_extract_jira_message() {
        let body = r#"{"errorMessages":["Issue does not exist"],"errors":{}}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Issue does not exist")
        );
    }

    #[test]
    fn test_extract_stash_message() {
        let body = r#"{"errors":[{"context":null,"message":"Project FOO does not exist."}]}"#;
        assert_eq!(
            extract_error_message(body).as_deref(),
            Some("Project FOO does not exist.")
        );
    }

    #[test]
    fn test_extract_non_json() {
        assert_eq!(extract_error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(extract_error_message(""), None);
    }

    #[test]
    fn test_not_found_classification() {
        let err = ApiError::Http {
            status: 404,
            message: "gone".to_string(),
            body: None,
        };
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_auth_failure());
    }
}
