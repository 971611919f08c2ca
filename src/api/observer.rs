//
//  atlassian-api
//  api/observer.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Observers
//!
//! The transport client reports what it does through a [`RequestObserver`]
//! configured on the client, rather than through process-wide logger state.
//! Two events are emitted per call:
//!
//! - [`RequestEvent`] before the request is sent,
//! - [`ResponseEvent`] once the response has been classified.
//!
//! [`TracingObserver`] (the default) forwards both to `tracing` under the
//! `atlassian_api::http` target and, at `trace` level, prints the equivalent
//! `curl` command with the secret masked.

use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, trace};

/// How a response was classified by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx with a body to be parsed.
    Body,
    /// 204 No Content.
    NoContent,
    /// Non-success status. Never retried.
    Failed,
}

impl Outcome {
    /// Short lowercase label used in log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::NoContent => "no_content",
            Self::Failed => "failed",
        }
    }
}

/// Emitted before a request is sent.
#[derive(Debug, Clone, Copy)]
pub struct RequestEvent<'a> {
    /// The HTTP method.
    pub method: &'a Method,
    /// The fully built URL, query string included.
    pub url: &'a str,
    /// The basic-auth username.
    pub username: &'a str,
    /// The request headers.
    pub headers: &'a HeaderMap,
    /// The JSON body, if any.
    pub body: Option<&'a Value>,
}

/// Emitted after a response has been classified.
#[derive(Debug, Clone, Copy)]
pub struct ResponseEvent<'a> {
    /// The HTTP method of the request.
    pub method: &'a Method,
    /// The URL that was requested.
    pub url: &'a str,
    /// The response status code.
    pub status: u16,
    /// The classification.
    pub outcome: Outcome,
    /// The raw response body.
    pub body: &'a str,
}

/// Receives structured events from the transport client.
pub trait RequestObserver: Send + Sync {
    /// Called before the request is sent.
    fn on_request(&self, event: &RequestEvent<'_>);

    /// Called after the response has been classified.
    fn on_response(&self, event: &ResponseEvent<'_>);
}

/// Forwards transport events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl RequestObserver for TracingObserver {
    fn on_request(&self, event: &RequestEvent<'_>) {
        debug!(
            target: "atlassian_api::http",
            method = %event.method,
            url = event.url,
            "request issued"
        );
        trace!(target: "atlassian_api::http", "{}", curl_command(event));
    }

    fn on_response(&self, event: &ResponseEvent<'_>) {
        match event.outcome {
            Outcome::Body => debug!(
                target: "atlassian_api::http",
                method = %event.method,
                url = event.url,
                status = event.status,
                outcome = event.outcome.as_str(),
                "response classified"
            ),
            Outcome::NoContent => debug!(
                target: "atlassian_api::http",
                method = %event.method,
                url = event.url,
                status = event.status,
                outcome = event.outcome.as_str(),
                "Received \"204 No Content\" response"
            ),
            Outcome::Failed => info!(
                target: "atlassian_api::http",
                method = %event.method,
                url = event.url,
                status = event.status,
                outcome = event.outcome.as_str(),
                retried = false,
                body = event.body,
                "request failed"
            ),
        }
    }
}

/// Renders the `curl` command equivalent to a request, with the secret masked.
pub fn curl_command(event: &RequestEvent<'_>) -> String {
    let mut command = format!(
        "curl --silent -X {} -u '{}':'********'",
        event.method, event.username
    );

    for (name, value) in event.headers {
        command.push_str(&format!(
            " -H '{}: {}'",
            name,
            value.to_str().unwrap_or("<binary>")
        ));
    }

    if let Some(body) = event.body {
        command.push_str(&format!(" --data '{}'", body));
    }

    command.push_str(&format!(" '{}'", event.url));
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::json_headers;

    #[test]
    fn test_curl_command_masks_secret() {
        let headers = json_headers();
        let body = serde_json::json!({"title": "Roadmap"});
        let event = RequestEvent {
            method: &Method::POST,
            url: "https://wiki.example.com/rest/api/content/",
            username: "jdoe",
            headers: &headers,
            body: Some(&body),
        };

        let command = curl_command(&event);
        assert!(command.starts_with("curl --silent -X POST -u 'jdoe':'********'"));
        assert!(command.contains("-H 'content-type: application/json'"));
        assert!(command.contains(r#"--data '{"title":"Roadmap"}'"#));
        assert!(command.ends_with("'https://wiki.example.com/rest/api/content/'"));
    }

    #[test]
    fn test_curl_command_without_body() {
        let headers = HeaderMap::new();
        let event = RequestEvent {
            method: &Method::GET,
            url: "https://wiki.example.com/rest/api/space/DOCS",
            username: "jdoe",
            headers: &headers,
            body: None,
        };
        assert_eq!(
            curl_command(&event),
            "curl --silent -X GET -u 'jdoe':'********' 'https://wiki.example.com/rest/api/space/DOCS'"
        );
    }
}
