//
//  atlassian-api
//  cli/api.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Direct API access command
//!
//! Sends a request to any REST endpoint of the selected host, using the
//! stored credentials. Useful for endpoints no other command covers.
//!
//! ## Examples
//!
//! ```bash
//! # Get a page with its body
//! atl api rest/api/content/123456 -q expand=body.storage
//!
//! # Create a page with POST
//! atl api -X POST rest/api/content -F type=page -F title="Notes" \
//!     -F space.key=DOCS -F body.storage.value="<p>Hi</p>" -F body.storage.representation=storage
//!
//! # Walk every page of a listing
//! atl api rest/api/space --paginate --limit 500
//!
//! # Pass a pre-encoded query token verbatim
//! atl api rest/api/content --flag 'spaceKey=DOCS' --flag 'trigger'
//! ```

use std::fs;
use std::io::Read;

use anyhow::{bail, Context, Result};
use clap::Args;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::{Map, Value};

use crate::api::common::{collect_pages, AnyPage};
use crate::api::request::{Query, Request};
use crate::api::AtlassianClient;
use crate::output::write_json;

use super::GlobalOptions;

/// Make direct API requests
#[derive(Args, Debug)]
pub struct ApiCommand {
    /// API path relative to the base URL (e.g. rest/api/content/123)
    pub endpoint: String,

    /// HTTP method (GET, POST, PUT, PATCH, DELETE)
    #[arg(long, short = 'X', default_value = "GET")]
    pub method: String,

    /// Query parameter as key=value (can be specified multiple times)
    #[arg(long, short = 'q', action = clap::ArgAction::Append)]
    pub query: Vec<String>,

    /// Raw query token appended without encoding (can be specified multiple times)
    #[arg(long, action = clap::ArgAction::Append)]
    pub flag: Vec<String>,

    /// Request headers as 'Name: Value' (can be specified multiple times)
    #[arg(long, short = 'H', action = clap::ArgAction::Append)]
    pub header: Vec<String>,

    /// Request body fields as JSON (key=value, can be nested with dots)
    #[arg(long, short = 'F', action = clap::ArgAction::Append)]
    pub field: Vec<String>,

    /// Raw field values (not JSON-encoded, strings only)
    #[arg(long, action = clap::ArgAction::Append)]
    pub raw_field: Vec<String>,

    /// Read request body from file (- for stdin)
    #[arg(long, short = 'f', conflicts_with_all = ["field", "raw_field"])]
    pub input: Option<String>,

    /// Follow pagination and print every item as one JSON array
    #[arg(long)]
    pub paginate: bool,

    /// Stop paginating after this many items
    #[arg(long, requires = "paginate")]
    pub limit: Option<u32>,

    /// Items requested per page while paginating
    #[arg(long, default_value = "100")]
    pub page_size: u32,

    /// Suppress output
    #[arg(long)]
    pub silent: bool,
}

impl ApiCommand {
    pub fn run(&self, global: &GlobalOptions) -> Result<()> {
        let method = self.parse_method()?;
        let (path, query) = self.build_query()?;
        let body = self.build_body()?;

        let mut request = Request::new(method, path).query(query);
        for (name, value) in self.parse_headers()? {
            request = request.header(name, value);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let client = global.client()?;
        let result = if self.paginate {
            Some(Value::Array(self.execute_paginated(&client, &request)?))
        } else {
            client.send::<Value>(&request)?
        };

        if self.silent {
            return Ok(());
        }
        match result {
            Some(value) => write_json(&value),
            None => Ok(()),
        }
    }

    /// Walks every page. A failure on the first page is an error; later
    /// failures end the walk with the items collected so far.
    fn execute_paginated(&self, client: &AtlassianClient, request: &Request) -> Result<Vec<Value>> {
        let mut first_page_error = None;
        let items = collect_pages(self.limit, self.page_size, |start, limit| {
            let query = request
                .query_ref()
                .clone()
                .param("start", start)
                .param("limit", limit);
            match client.send::<AnyPage<Value>>(&request.clone().query(query)) {
                Err(e) if start == 0 => {
                    first_page_error = Some(e);
                    Ok(None)
                }
                page => page,
            }
        });

        match first_page_error {
            Some(e) => Err(anyhow::Error::new(e).context("Response is not a paginated listing")),
            None => Ok(items),
        }
    }

    fn parse_method(&self) -> Result<Method> {
        match self.method.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "HEAD" => Ok(Method::HEAD),
            _ => bail!("Unsupported HTTP method: {}", self.method),
        }
    }

    /// Splits any query string off the endpoint and merges it with `-q` and
    /// `--flag`. `-q` wins over the endpoint for the same key.
    fn build_query(&self) -> Result<(String, Query)> {
        let (path, inline) = match self.endpoint.split_once('?') {
            Some((path, inline)) => (path, Some(inline)),
            None => (self.endpoint.as_str(), None),
        };

        let mut query = Query::new();
        if let Some(inline) = inline {
            for (key, value) in url::form_urlencoded::parse(inline.as_bytes()) {
                query = query.param(key, value);
            }
        }
        for param in &self.query {
            let (key, value) = split_pair(param, '=')?;
            query = query.param(key, value);
        }
        for flag in &self.flag {
            query = query.flag(flag.as_str());
        }
        Ok((path.to_string(), query))
    }

    fn build_body(&self) -> Result<Option<Value>> {
        if let Some(input) = &self.input {
            let content = if input == "-" {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read request body from stdin")?;
                buffer
            } else {
                fs::read_to_string(input).with_context(|| format!("Failed to read {input}"))?
            };

            let value: Value = serde_json::from_str(&content).context("Request body is not valid JSON")?;
            return Ok(Some(value));
        }

        if self.field.is_empty() && self.raw_field.is_empty() {
            return Ok(None);
        }

        let mut body = Map::new();
        for field in &self.field {
            let (key, value) = split_pair(field, '=')?;
            set_nested_value(&mut body, key, parse_field_value(value));
        }
        for field in &self.raw_field {
            let (key, value) = split_pair(field, '=')?;
            set_nested_value(&mut body, key, Value::String(value.to_string()));
        }
        Ok(Some(Value::Object(body)))
    }

    fn parse_headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        self.header
            .iter()
            .map(|header| {
                let (name, value) = split_pair(header, ':')?;
                Ok((
                    HeaderName::from_bytes(name.trim().as_bytes())
                        .with_context(|| format!("Invalid header name in '{header}'"))?,
                    HeaderValue::from_str(value.trim())
                        .with_context(|| format!("Invalid header value in '{header}'"))?,
                ))
            })
            .collect()
    }
}

fn split_pair(input: &str, separator: char) -> Result<(&str, &str)> {
    match input.split_once(separator) {
        Some((key, value)) if !key.trim().is_empty() => Ok((key, value)),
        _ => bail!("Invalid format: '{input}'. Expected key{separator}value"),
    }
}

/// Interprets a `-F` value as JSON where it looks like JSON.
fn parse_field_value(value: &str) -> Value {
    match value {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => {
            if let Ok(n) = value.parse::<i64>() {
                return Value::Number(n.into());
            }
            if let Some(n) = value.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                return Value::Number(n);
            }
            if value.starts_with('[') || value.starts_with('{') {
                if let Ok(parsed) = serde_json::from_str(value) {
                    return parsed;
                }
            }
            Value::String(value.to_string())
        }
    }
}

fn set_nested_value(obj: &mut Map<String, Value>, key: &str, value: Value) {
    match key.split_once('.') {
        None => {
            obj.insert(key.to_string(), value);
        }
        Some((first, rest)) => {
            let entry = obj
                .entry(first.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            if let Value::Object(nested) = entry {
                set_nested_value(nested, rest, value);
            }
        }
    }
}
