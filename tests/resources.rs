//
//  atlassian-api
//  tests/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use atlassian_api::api::confluence::{Confluence, RestrictionOperation};
use atlassian_api::api::{ApiError, AtlassianClient, Connection};
use mockito::{Matcher, Mock, Server, ServerGuard};
use serde_json::json;

fn confluence_for(server: &ServerGuard) -> Confluence {
    let connection = Connection::new(&server.url(), "jdoe", "s3cret").unwrap();
    Confluence::new(AtlassianClient::new(connection).unwrap())
}

fn title_lookup_mock(server: &mut ServerGuard, results: serde_json::Value) -> Mock {
    let size = results.as_array().map_or(0, Vec::len);
    server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("spaceKey".into(), "DOCS".into()),
            Matcher::UrlEncoded("title".into(), "Roadmap".into()),
            Matcher::UrlEncoded("status".into(), "current".into()),
            Matcher::UrlEncoded("expand".into(), "body.storage".into()),
        ]))
        .with_status(200)
        .with_body(json!({"results": results, "start": 0, "limit": 25, "size": size}).to_string())
        .expect(1)
        .create()
}

fn page(id: &str) -> serde_json::Value {
    json!({"id": id, "type": "page", "title": "Roadmap"})
}

#[test]
fn get_space_passes_expand() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/space/DOCS")
        .match_query(Matcher::UrlEncoded("expand".into(), "homepage,description.plain".into()))
        .with_status(200)
        .with_body(r#"{"id": 98305, "key": "DOCS", "name": "Documentation", "type": "global"}"#)
        .expect(1)
        .create();

    let space = confluence_for(&server)
        .get_space("DOCS", Some("homepage,description.plain"))
        .unwrap();

    mock.assert();
    assert_eq!(space.key, "DOCS");
    assert_eq!(space.name, "Documentation");
}

#[test]
fn get_space_content_sends_offsets() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/space/DOCS/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("expand".into(), "version".into()),
            Matcher::UrlEncoded("start".into(), "25".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "page": {"results": [page("1"), page("2")], "start": 25, "limit": 10, "size": 2},
                "blogpost": {"results": [{"id": "3", "type": "blogpost", "title": "News"}], "start": 25, "limit": 10, "size": 1}
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let content = confluence_for(&server)
        .get_space_content("DOCS", Some("version"), Some(25), Some(10))
        .unwrap();

    mock.assert();
    let ids: Vec<&str> = content.items().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn get_page_id_resolves_a_single_match() {
    let mut server = Server::new();
    let lookup = title_lookup_mock(&mut server, json!([page("42")]));

    let id = confluence_for(&server).get_page_id("DOCS", "Roadmap").unwrap();

    lookup.assert();
    assert_eq!(id.as_deref(), Some("42"));
}

#[test]
fn get_page_id_is_none_without_match() {
    let mut server = Server::new();
    title_lookup_mock(&mut server, json!([]));

    assert_eq!(confluence_for(&server).get_page_id("DOCS", "Roadmap").unwrap(), None);
}

#[test]
fn get_page_id_rejects_duplicate_titles() {
    let mut server = Server::new();
    title_lookup_mock(&mut server, json!([page("42"), page("43")]));

    let err = confluence_for(&server).get_page_id("DOCS", "Roadmap").unwrap_err();

    match err {
        ApiError::AmbiguousTitle { space, title, matches } => {
            assert_eq!(space, "DOCS");
            assert_eq!(title, "Roadmap");
            let ids: Vec<&str> = matches.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids, vec!["42", "43"]);
        }
        other => panic!("expected AmbiguousTitle, got {other:?}"),
    }
}

#[test]
fn get_page_title_reads_the_page_by_id() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/content/42")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("status".into(), "current".into()),
            Matcher::UrlEncoded("expand".into(), "body.storage".into()),
        ]))
        .with_status(200)
        .with_body(page("42").to_string())
        .expect(1)
        .create();

    let title = confluence_for(&server).get_page_title("42").unwrap();

    mock.assert();
    assert_eq!(title, "Roadmap");
}

#[test]
fn get_page_restrictions_decodes_both_operations() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/content/9/restriction/byOperation")
        .match_query(Matcher::UrlEncoded(
            "expand".into(),
            "restrictions.user,restrictions.group".into(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "read": {
                    "operation": "read",
                    "restrictions": {
                        "user": {"results": [{"type": "known", "username": "jdoe"}], "size": 1},
                        "group": {"results": [], "size": 0}
                    }
                },
                "update": {
                    "operation": "update",
                    "restrictions": {
                        "user": {"results": [], "size": 0},
                        "group": {"results": [{"type": "group", "name": "admins"}], "size": 1}
                    }
                }
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let restrictions = confluence_for(&server)
        .get_page_restrictions("9", Some("restrictions.user,restrictions.group"))
        .unwrap();

    mock.assert();
    let read = restrictions.get(RestrictionOperation::Read).unwrap();
    assert_eq!(read.user_names(), vec!["jdoe"]);
    assert!(read.group_names().is_empty());
    let update = restrictions.get(RestrictionOperation::Update).unwrap();
    assert_eq!(update.group_names(), vec!["admins"]);
}

#[test]
fn add_page_restrictions_posts_groups_and_users() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/rest/experimental/content/9/restriction")
        .match_body(Matcher::Json(json!([{
            "operation": "update",
            "restrictions": {
                "group": [{"type": "group", "name": "admins"}],
                "user": [{"type": "known", "username": "j doe"}]
            }
        }])))
        .with_status(200)
        .with_body("")
        .expect(1)
        .create();

    let response = confluence_for(&server)
        .add_page_restrictions(
            "9",
            RestrictionOperation::Update,
            &["admins".to_string()],
            &["j doe".to_string()],
        )
        .unwrap();

    mock.assert();
    assert_eq!(response, None);
}

#[test]
fn delete_page_restrictions_removes_each_subject() {
    let mut server = Server::new();
    let group = server
        .mock("DELETE", "/rest/experimental/content/9/restriction/byOperation/update/group/admins")
        .with_status(200)
        .with_body("")
        .expect(1)
        .create();
    let user = server
        .mock("DELETE", "/rest/experimental/content/9/restriction/byOperation/update/user")
        .match_query(Matcher::UrlEncoded("userName".into(), "j doe".into()))
        .with_status(200)
        .with_body("")
        .expect(1)
        .create();

    confluence_for(&server)
        .delete_page_restrictions(
            "9",
            RestrictionOperation::Update,
            &["admins".to_string()],
            &["j doe".to_string()],
        )
        .unwrap();

    group.assert();
    user.assert();
}

#[test]
fn delete_page_restrictions_stops_at_first_failure() {
    let mut server = Server::new();
    let group = server
        .mock("DELETE", "/rest/experimental/content/9/restriction/byOperation/read/group/admins")
        .with_status(500)
        .with_body(r#"{"message": "Could not remove group"}"#)
        .expect(1)
        .create();
    let user = server
        .mock("DELETE", "/rest/experimental/content/9/restriction/byOperation/read/user")
        .match_query(Matcher::Any)
        .with_status(200)
        .expect(0)
        .create();

    let err = confluence_for(&server)
        .delete_page_restrictions(
            "9",
            RestrictionOperation::Read,
            &["admins".to_string()],
            &["jdoe".to_string()],
        )
        .unwrap_err();

    group.assert();
    user.assert();
    assert_eq!(err.status(), Some(500));
}
