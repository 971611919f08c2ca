//
//  atlassian-api
//  tests/update_or_create.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use std::sync::Arc;

use atlassian_api::api::confluence::{Confluence, Upsert};
use atlassian_api::api::{ApiError, AtlassianClient, Connection};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

const PARENT_ID: &str = "1000";
const PAGE_ID: &str = "2000";
const TITLE: &str = "Release notes";

fn confluence_for(server: &ServerGuard) -> Confluence {
    let connection = Connection::new(&server.url(), "jdoe", "s3cret").unwrap();
    Confluence::new(AtlassianClient::new(connection).unwrap())
}

/// The parent page lookup that resolves the space.
fn parent_mock(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", format!("/rest/api/content/{PARENT_ID}").as_str())
        .match_query(Matcher::UrlEncoded("expand".into(), "space,body.storage".into()))
        .with_status(200)
        .with_body(
            json!({"id": PARENT_ID, "type": "page", "title": "Releases", "space": {"key": "DOCS"}})
                .to_string(),
        )
        .create()
}

fn title_lookup_mock(server: &mut ServerGuard, results: serde_json::Value) -> Mock {
    let size = results.as_array().map_or(0, Vec::len);
    server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("spaceKey".into(), "DOCS".into()),
            Matcher::UrlEncoded("title".into(), TITLE.into()),
            Matcher::UrlEncoded("status".into(), "current".into()),
            Matcher::UrlEncoded("expand".into(), "body.storage".into()),
        ]))
        .with_status(200)
        .with_body(json!({"results": results, "start": 0, "limit": 25, "size": size, "_links": {}}).to_string())
        .create()
}

fn existing_page(body: &str) -> serde_json::Value {
    json!({
        "id": PAGE_ID,
        "type": "page",
        "title": TITLE,
        "body": {"storage": {"value": body, "representation": "storage"}},
        "_links": {"tinyui": "/x/AbCd", "webui": "/display/DOCS/Release+notes"}
    })
}

fn history_mock(server: &mut ServerGuard, number: u64) -> Mock {
    server
        .mock("GET", format!("/rest/api/content/{PAGE_ID}/history").as_str())
        .with_status(200)
        .with_body(json!({"lastUpdated": {"number": number}, "latest": true}).to_string())
        .create()
}

#[test]
fn changed_body_is_written_with_next_version() {
    let mut server = Server::new();
    let parent = parent_mock(&mut server);
    let lookup = title_lookup_mock(&mut server, json!([existing_page("<p>v1</p>")]));
    let history = history_mock(&mut server, 3);
    let put = server
        .mock("PUT", format!("/rest/api/content/{PAGE_ID}").as_str())
        .match_body(Matcher::PartialJson(json!({
            "id": PAGE_ID,
            "type": "page",
            "title": TITLE,
            "version": {"number": 4},
            "body": {"storage": {"value": "<p>v2</p>", "representation": "storage"}},
            "ancestors": [{"type": "page", "id": PARENT_ID}]
        })))
        .with_status(200)
        .with_body(
            json!({"id": PAGE_ID, "type": "page", "title": TITLE, "version": {"number": 4}}).to_string(),
        )
        .expect(1)
        .create();

    let outcome = confluence_for(&server)
        .update_or_create(PARENT_ID, TITLE, "<p>v2</p>")
        .unwrap();

    parent.assert();
    lookup.assert();
    history.assert();
    put.assert();
    assert!(matches!(outcome, Upsert::Updated(Some(ref c)) if c.version_number() == Some(4)));
}

#[test]
fn identical_body_issues_no_write() {
    let mut server = Server::new();
    parent_mock(&mut server);
    title_lookup_mock(&mut server, json!([existing_page("Acci&oacute;n")]));
    let put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create();
    let post = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create();

    let outcome = confluence_for(&server)
        .update_or_create(PARENT_ID, TITLE, "Acción")
        .unwrap();

    put.assert();
    post.assert();
    assert_eq!(outcome.as_str(), "unchanged");
    assert!(!outcome.is_written());
}

#[test]
fn missing_page_is_created_under_parent() {
    let mut server = Server::new();
    parent_mock(&mut server);
    title_lookup_mock(&mut server, json!([]));
    let post = server
        .mock("POST", "/rest/api/content/")
        .match_body(Matcher::PartialJson(json!({
            "type": "page",
            "title": TITLE,
            "space": {"key": "DOCS"},
            "ancestors": [{"type": "page", "id": PARENT_ID}],
            "body": {"storage": {"value": "<p>v1</p>", "representation": "storage"}}
        })))
        .with_status(200)
        .with_body(existing_page("<p>v1</p>").to_string())
        .expect(1)
        .create();
    let put = server.mock("PUT", Matcher::Any).expect(0).create();

    let outcome = confluence_for(&server)
        .update_or_create(PARENT_ID, TITLE, "<p>v1</p>")
        .unwrap();

    post.assert();
    put.assert();
    match outcome {
        Upsert::Created(Some(content)) => assert_eq!(content.id, PAGE_ID),
        other => panic!("expected a created page, got {other:?}"),
    }
}

#[test]
fn duplicate_titles_are_reported_without_writing() {
    let mut server = Server::new();
    parent_mock(&mut server);
    let mut second = existing_page("<p>other</p>");
    second["id"] = json!("2001");
    title_lookup_mock(&mut server, json!([existing_page("<p>v1</p>"), second]));
    let put = server.mock("PUT", Matcher::Any).expect(0).create();
    let post = server.mock("POST", Matcher::Any).expect(0).create();

    let err = confluence_for(&server)
        .update_or_create(PARENT_ID, TITLE, "<p>v2</p>")
        .unwrap_err();

    put.assert();
    post.assert();
    match err {
        ApiError::AmbiguousTitle { space, title, matches } => {
            assert_eq!(space, "DOCS");
            assert_eq!(title, TITLE);
            assert_eq!(matches.len(), 2);
        }
        other => panic!("expected AmbiguousTitle, got {other:?}"),
    }
}

#[test]
fn custom_comparator_decides_equality() {
    let mut server = Server::new();
    parent_mock(&mut server);
    title_lookup_mock(&mut server, json!([existing_page("<p>v1</p>\n")]));
    let put = server.mock("PUT", Matcher::Any).expect(0).create();

    let trimmed = |current: &str, desired: &str| current.trim() == desired.trim();
    let outcome = confluence_for(&server)
        .with_comparator(Arc::new(trimmed))
        .update_or_create(PARENT_ID, TITLE, "<p>v1</p>")
        .unwrap();

    put.assert();
    assert!(matches!(outcome, Upsert::Unchanged(_)));
}

#[test]
fn page_exists_treats_not_found_as_absent() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::UrlEncoded("spaceKey".into(), "GONE".into()))
        .with_status(404)
        .with_body(r#"{"message": "No space with key : GONE"}"#)
        .create();
    title_lookup_mock(&mut server, json!([existing_page("<p>v1</p>")]));

    let confluence = confluence_for(&server);
    assert!(!confluence.page_exists("GONE", TITLE).unwrap());
    assert!(confluence.page_exists("DOCS", TITLE).unwrap());
}

#[test]
fn page_exists_propagates_other_errors() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let err = confluence_for(&server).page_exists("DOCS", TITLE).unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[test]
fn update_page_moves_page_when_parent_given() {
    let mut server = Server::new();
    server
        .mock("GET", format!("/rest/api/content/{PAGE_ID}").as_str())
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(existing_page("<p>v1</p>").to_string())
        .create();
    history_mock(&mut server, 7);
    let put = server
        .mock("PUT", format!("/rest/api/content/{PAGE_ID}").as_str())
        .match_body(Matcher::PartialJson(json!({
            "version": {"number": 8},
            "ancestors": [{"type": "page", "id": "3000"}]
        })))
        .with_status(204)
        .expect(1)
        .create();

    let outcome = confluence_for(&server)
        .update_page(Some("3000"), PAGE_ID, TITLE, "<p>v2</p>", "page")
        .unwrap();

    put.assert();
    assert_eq!(outcome, Upsert::Updated(None));
}
