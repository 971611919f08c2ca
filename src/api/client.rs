//
//  atlassian-api
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Atlassian REST APIs
//!
//! This module provides the transport client shared by every product client.
//! It owns the connection parameters, builds request URLs, performs the
//! blocking HTTP call, and classifies the response.
//!
//! ## Features
//!
//! - Basic authentication on every request
//! - Fixed per-call timeout ([`REQUEST_TIMEOUT`])
//! - Optional TLS verification bypass for self-signed on-premise instances
//! - JSON serialization/deserialization
//! - Structured request/response events through a [`RequestObserver`]
//! - Custom User-Agent header

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::common::ApiError;
use super::observer::{Outcome, RequestEvent, RequestObserver, ResponseEvent, TracingObserver};
use super::request::{build_url, Query, Request};
use super::response::{decode, RawResponse};

/// Upper bound on the duration of a single call.
///
/// An expired timeout surfaces as [`ApiError::Transport`]; it is the only
/// way to cancel an in-flight call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection parameters for one Atlassian instance.
///
/// A `Connection` is immutable once handed to an [`AtlassianClient`]: the
/// base URL and credentials are fixed for the lifetime of the client.
///
/// # Example
///
/// ```rust
/// use atlassian_api::api::Connection;
///
/// let connection = Connection::new("https://wiki.example.com", "jdoe", "s3cret")?
///     .with_verify_tls(false);
/// assert_eq!(connection.base_url().as_str(), "https://wiki.example.com/");
/// assert!(!connection.verify_tls());
/// # Ok::<(), atlassian_api::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct Connection {
    base_url: Url,
    username: String,
    secret: String,
    verify_tls: bool,
}

impl Connection {
    /// Creates a connection with TLS verification enabled.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if `base_url` cannot be parsed.
    pub fn new(
        base_url: &str,
        username: impl Into<String>,
        secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            username: username.into(),
            secret: secret.into(),
            verify_tls: true,
        })
    }

    /// Sets whether server certificates are verified.
    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// The base URL every request path is joined to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The basic-auth username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether server certificates are verified.
    pub fn verify_tls(&self) -> bool {
        self.verify_tls
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("secret", &"********")
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

/// The transport client for Atlassian REST APIs.
///
/// All calls are blocking and sequential. The client holds no mutable state,
/// so one instance may be shared by reference; callers wanting parallelism
/// should run independent clients from independent threads.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use atlassian_api::api::{AtlassianClient, Connection};
/// use atlassian_api::api::request::Query;
/// use serde_json::Value;
///
/// let connection = Connection::new("https://wiki.example.com", "jdoe", "s3cret")?;
/// let client = AtlassianClient::new(connection)?;
///
/// let space: Option<Value> = client.get("/rest/api/space/DOCS", Query::new())?;
/// # Ok::<(), atlassian_api::api::ApiError>(())
/// ```
pub struct AtlassianClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL and credentials
    connection: Connection,
    /// Receives request/response events
    observer: Arc<dyn RequestObserver>,
}

impl AtlassianClient {
    /// Creates a client for the given connection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client could not be built
    /// (for example when no TLS backend is available).
    pub fn new(connection: Connection) -> Result<Self, ApiError> {
        let http = Client::builder()
            .user_agent(format!("atl/{}", crate::VERSION))
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(!connection.verify_tls())
            .build()?;

        Ok(Self {
            http,
            connection,
            observer: Arc::new(TracingObserver),
        })
    }

    /// Replaces the observer receiving request/response events.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// The connection this client was built with.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.connection.base_url().as_str().trim_end_matches('/')
    }

    /// Builds the relative path of a generic REST resource.
    ///
    /// ```rust
    /// use atlassian_api::api::AtlassianClient;
    ///
    /// assert_eq!(AtlassianClient::resource_url("project", "2"), "rest/api/2/project");
    /// assert_eq!(AtlassianClient::resource_url_latest("serverInfo"), "rest/api/latest/serverInfo");
    /// ```
    pub fn resource_url(resource: &str, version: &str) -> String {
        ["rest", "api", version, resource].join("/")
    }

    /// [`resource_url`](Self::resource_url) with version `latest`.
    pub fn resource_url_latest(resource: &str) -> String {
        Self::resource_url(resource, "latest")
    }

    /// The full URL a request would be sent to.
    pub fn url_for(&self, request: &Request) -> String {
        build_url(self.connection.base_url(), request.path(), request.query_ref())
    }

    /// Sends a request and returns the raw successful response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] on network failures and timeouts
    /// - [`ApiError::Http`] for any non-2xx status; the response body is
    ///   reported to the observer before the error is returned
    pub fn request(&self, request: &Request) -> Result<RawResponse, ApiError> {
        let url = self.url_for(request);

        self.observer.on_request(&RequestEvent {
            method: request.method(),
            url: &url,
            username: self.connection.username(),
            headers: request.headers(),
            body: request.body(),
        });

        let mut builder = self
            .http
            .request(request.method().clone(), &url)
            .headers(request.headers().clone())
            .basic_auth(self.connection.username(), Some(&self.connection.secret));

        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let raw = RawResponse::new(status, response.text()?);

        let outcome = if !raw.is_success() {
            Outcome::Failed
        } else if raw.is_no_content() {
            Outcome::NoContent
        } else {
            Outcome::Body
        };

        self.observer.on_response(&ResponseEvent {
            method: request.method(),
            url: &url,
            status,
            outcome,
            body: raw.body(),
        });

        if outcome == Outcome::Failed {
            return Err(raw.into_error());
        }
        Ok(raw)
    }

    /// Sends a request and decodes the body into `T`.
    ///
    /// Reads (`GET` and other non-mutating methods) require a JSON body unless
    /// the status is 204. Writes (`POST`, `PUT`, `DELETE`) treat an empty or
    /// non-JSON body as no content.
    pub fn send<T: DeserializeOwned>(&self, request: &Request) -> Result<Option<T>, ApiError> {
        let raw = self.request(request)?;
        let payload = if request.is_mutating() {
            raw.json_or_no_content()
        } else {
            raw.json()?
        };
        decode(raw.status(), payload)
    }

    /// Makes an HTTP GET request.
    ///
    /// Returns `Ok(None)` for `204 No Content`.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`request`](Self::request), returns
    /// [`ApiError::MalformedResponse`] if a successful response body is not
    /// valid JSON or does not match `T`.
    pub fn get<T: DeserializeOwned>(&self, path: &str, query: Query) -> Result<Option<T>, ApiError> {
        self.send(&Request::get(path).query(query))
    }

    /// Makes an HTTP POST request with a JSON body.
    ///
    /// Returns `Ok(None)` if the server sent no content or a body that is not
    /// JSON.
    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Serialize)?;
        self.send(&Request::post(path).json(body))
    }

    /// Makes an HTTP PUT request with a JSON body.
    ///
    /// Returns `Ok(None)` if the server sent no content or a body that is not
    /// JSON.
    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        let body = serde_json::to_value(body).map_err(ApiError::Serialize)?;
        self.send(&Request::put(path).json(body))
    }

    /// Makes an HTTP DELETE request.
    ///
    /// The response body is ignored: some servers answer 200 with an empty
    /// body, which is a successful delete.
    pub fn delete(&self, path: &str, query: Query) -> Result<(), ApiError> {
        self.request(&Request::delete(path).query(query))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_debug_redacts_secret() {
        let connection = Connection::new("https://wiki.example.com", "jdoe", "hunter2").unwrap();
        let debug = format!("{connection:?}");
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_connection_rejects_invalid_url() {
        assert!(matches!(
            Connection::new("not a url", "u", "p"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_for_joins_base_and_query() {
        let connection = Connection::new("https://example.com/wiki/", "u", "p").unwrap();
        let client = AtlassianClient::new(connection).unwrap();
        let request = Request::get("/rest/api/content").query(Query::new().param("limit", 5));
        assert_eq!(
            client.url_for(&request),
            "https://example.com/wiki/rest/api/content?limit=5"
        );
        assert_eq!(client.base_url(), "https://example.com/wiki");
    }
}
