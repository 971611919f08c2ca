//
//  atlassian-api
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Response Classification
//!
//! The transport returns a [`RawResponse`] for every successful (2xx) call.
//! How its body is interpreted depends on what the caller expected:
//!
//! | Status | [`RawResponse::json`] (reads) | [`RawResponse::json_or_no_content`] (writes) |
//! |--------|-------------------------------|----------------------------------------------|
//! | 204 | `NoContent`, body never parsed | `NoContent`, body never parsed |
//! | 2xx, valid JSON | `Json(value)` | `Json(value)` |
//! | 2xx, empty or invalid body | `Err(MalformedResponse)` | `NoContent` |
//!
//! Non-2xx responses never become a `RawResponse`; see
//! [`RawResponse::into_error`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::common::{extract_error_message, ApiError};

/// A classified response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body parsed as JSON.
    Json(Value),
    /// The server sent no (usable) content.
    NoContent,
}

impl Payload {
    /// Returns the JSON value, or `None` for [`Payload::NoContent`].
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::NoContent => None,
        }
    }

    /// Returns `true` for [`Payload::NoContent`].
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Status code and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    status: u16,
    body: String,
}

impl RawResponse {
    /// Wraps a status code and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// The raw response body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        StatusCode::from_u16(self.status).is_ok_and(|s| s.is_success())
    }

    /// Returns `true` for `204 No Content`.
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT.as_u16()
    }

    /// Classifies the body of a response that is expected to carry JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedResponse`] if the status is not 204 and the
    /// body is not valid JSON.
    pub fn json(&self) -> Result<Payload, ApiError> {
        if self.is_no_content() {
            return Ok(Payload::NoContent);
        }
        serde_json::from_str(&self.body)
            .map(Payload::Json)
            .map_err(|source| ApiError::MalformedResponse {
                status: self.status,
                source,
            })
    }

    /// Classifies the body of a write response, treating an empty or
    /// non-JSON body as no content.
    pub fn json_or_no_content(&self) -> Payload {
        if self.is_no_content() {
            return Payload::NoContent;
        }
        match serde_json::from_str(&self.body) {
            Ok(value) => Payload::Json(value),
            Err(_) => {
                tracing::debug!(status = self.status, "Received response with no content");
                Payload::NoContent
            }
        }
    }

    /// Converts a non-success response into [`ApiError::Http`].
    pub fn into_error(self) -> ApiError {
        let message = extract_error_message(&self.body).unwrap_or_else(|| {
            if self.body.trim().is_empty() {
                StatusCode::from_u16(self.status)
                    .ok()
                    .and_then(|s| s.canonical_reason())
                    .unwrap_or("Unknown status")
                    .to_string()
            } else {
                self.body.clone()
            }
        });
        let body = serde_json::from_str(&self.body).ok();

        ApiError::Http {
            status: self.status,
            message,
            body,
        }
    }
}

/// Deserializes a classified payload into `T`.
///
/// `NoContent` becomes `Ok(None)`. A JSON value of the wrong shape is a
/// [`ApiError::MalformedResponse`].
pub fn decode<T: DeserializeOwned>(status: u16, payload: Payload) -> Result<Option<T>, ApiError> {
    match payload {
        Payload::NoContent => Ok(None),
        Payload::Json(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|source| ApiError::MalformedResponse { status, source }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_content_is_never_parsed() {
        let response = RawResponse::new(204, "this is not json");
        assert_eq!(response.json().unwrap(), Payload::NoContent);
        assert_eq!(response.json_or_no_content(), Payload::NoContent);
    }

    #[test]
    fn test_read_with_invalid_body_is_malformed() {
        let response = RawResponse::new(200, "");
        assert!(matches!(
            response.json(),
            Err(ApiError::MalformedResponse { status: 200, .. })
        ));
    }

    #[test]
    fn test_write_with_empty_body_is_no_content() {
        let response = RawResponse::new(200, "");
        assert!(response.json_or_no_content().is_no_content());
    }

    #[test]
    fn test_into_error_extracts_message() {
        let response = RawResponse::new(404, r#"{"statusCode":404,"message":"Not here"}"#);
        match response.into_error() {
            ApiError::Http {
                status,
                message,
                body,
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Not here");
                assert!(body.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_into_error_with_empty_body_uses_reason() {
        match RawResponse::new(503, "").into_error() {
            ApiError::Http { message, body, .. } => {
                assert_eq!(message, "Service Unavailable");
                assert!(body.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_decode_shape_mismatch() {
        let payload = Payload::Json(serde_json::json!({"id": 1}));
        let result: Result<Option<Vec<String>>, _> = decode(200, payload);
        assert!(matches!(result, Err(ApiError::MalformedResponse { .. })));
    }
}
