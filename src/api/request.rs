//
//  atlassian-api
//  api/request.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Types
//!
//! A [`Request`] is a logical call to an Atlassian REST endpoint: a method, a
//! path relative to the connection's base URL, an optional JSON body, a
//! [`Query`], and headers. Requests are built fresh for every call and never
//! shared, which includes their headers.
//!
//! ## Query strings
//!
//! A [`Query`] holds two kinds of entries:
//!
//! - **params**: key/value pairs, form-urlencoded when the URL is built. Keys
//!   are unique; setting a key again replaces its value in place.
//! - **flags**: raw tokens appended verbatim after the params, joined by `&`.
//!   Flags are *not* encoded. Callers pass them already escaped, which lets
//!   them express things like repeated keys or pre-built CQL fragments.
//!
//! ```rust
//! use atlassian_api::api::request::{build_url, Query};
//! use url::Url;
//!
//! let base = Url::parse("https://wiki.example.com").unwrap();
//! let query = Query::new()
//!     .param("spaceKey", "DOCS")
//!     .param("title", "Release notes")
//!     .flag("expand=body.storage");
//!
//! assert_eq!(
//!     build_url(&base, "/rest/api/content", &query),
//!     "https://wiki.example.com/rest/api/content?spaceKey=DOCS&title=Release+notes&expand=body.storage"
//! );
//! ```

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Returns the default JSON headers.
///
/// A new map is built on every call so that no request can leak header
/// changes into another.
pub fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Query parameters and raw flag tokens for a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
    flags: Vec<String>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value for the same key.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    /// Sets a parameter only when `value` is `Some`.
    pub fn param_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Appends a raw, pre-escaped flag token.
    pub fn flag(mut self, token: impl Into<String>) -> Self {
        self.flags.push(token.into());
        self
    }

    /// The parameters in insertion order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// The raw flag tokens in insertion order.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }

    /// Returns `true` if there are neither params nor flags.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty() && self.flags.is_empty()
    }

    /// Renders the query string without the leading `?`.
    ///
    /// Returns `None` for an empty query.
    pub fn to_query_string(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.params.iter())
            .finish();

        if !self.flags.is_empty() {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&self.flags.join("&"));
        }

        Some(query)
    }
}

/// Joins the base URL and a path, then appends the query string.
///
/// Exactly one `/` separates the base and the path, so a base URL with a
/// context path (`https://host/wiki`) keeps it.
pub fn build_url(base: &Url, path: &str, query: &Query) -> String {
    let mut url = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    if let Some(query) = query.to_query_string() {
        url.push('?');
        url.push_str(&query);
    }

    url
}

/// A logical request against the connection's base URL.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    body: Option<Value>,
    query: Query,
    headers: HeaderMap,
}

impl Request {
    /// Creates a request with the default JSON headers.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Query::new(),
            headers: json_headers(),
        }
    }

    /// Shorthand for a `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a `PUT` request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the query.
    pub fn query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Adds or replaces a header on this request only.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The JSON body, if any.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The query parameters and flags.
    pub fn query_ref(&self) -> &Query {
        &self.query
    }

    /// The request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns `true` for methods whose empty responses are a normal outcome.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self.method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://wiki.example.com/").unwrap()
    }

    #[test]
    fn test_build_url_without_query() {
        let url = build_url(&base(), "rest/api/space/DOCS", &Query::new());
        assert_eq!(url, "https://wiki.example.com/rest/api/space/DOCS");
    }

    #[test]
    fn test_build_url_keeps_context_path() {
        let base = Url::parse("https://example.com/wiki").unwrap();
        let url = build_url(&base, "/rest/api/content", &Query::new());
        assert_eq!(url, "https://example.com/wiki/rest/api/content");
    }

    #[test]
    fn test_params_are_encoded() {
        let query = Query::new().param("cql", "type=page and space=DOCS");
        assert_eq!(
            query.to_query_string().as_deref(),
            Some("cql=type%3Dpage+and+space%3DDOCS")
        );
    }

    #[test]
    fn test_flags_bypass_encoding() {
        let query = Query::new().flag("expand=a,b").flag("x=%20");
        assert_eq!(query.to_query_string().as_deref(), Some("expand=a,b&x=%20"));
    }

    #[test]
    fn test_params_then_flags() {
        let query = Query::new().param("start", 0).flag("raw=1");
        let url = build_url(&base(), "/p", &query);
        assert_eq!(url, "https://wiki.example.com/p?start=0&raw=1");
    }

    #[test]
    fn test_param_replaces_existing_key() {
        let query = Query::new()
            .param("limit", 10)
            .param("start", 0)
            .param("limit", 25);
        assert_eq!(
            query.params(),
            &[
                ("limit".to_string(), "25".to_string()),
                ("start".to_string(), "0".to_string())
            ]
        );
    }

    #[test]
    fn test_param_opt_skips_none() {
        let query = Query::new().param_opt::<u32>("limit", None);
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), None);
    }

    #[test]
    fn test_headers_are_fresh_per_request() {
        let custom = Request::get("/a").header(
            HeaderName::from_static("x-atlassian-token"),
            HeaderValue::from_static("no-check"),
        );
        let plain = Request::get("/b");
        assert!(custom.headers().contains_key("x-atlassian-token"));
        assert!(!plain.headers().contains_key("x-atlassian-token"));
        assert_eq!(plain.headers().get(ACCEPT).unwrap(), "application/json");
    }

    #[test]
    fn test_write_methods_are_mutating() {
        assert!(Request::post("/a").is_mutating());
        assert!(Request::new(Method::PATCH, "/a").is_mutating());
        assert!(Request::delete("/a").is_mutating());
        assert!(!Request::get("/a").is_mutating());
        assert!(!Request::new(Method::HEAD, "/a").is_mutating());
    }
}
