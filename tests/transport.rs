//
//  atlassian-api
//  tests/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use atlassian_api::api::request::{Query, Request};
use atlassian_api::api::{ApiError, AtlassianClient, Connection};
use mockito::{Matcher, Server};
use reqwest::Method;
use serde_json::{json, Value};

fn client_for(base_url: &str) -> AtlassianClient {
    let connection = Connection::new(base_url, "jdoe", "s3cret").unwrap();
    AtlassianClient::new(connection).unwrap()
}

#[test]
fn get_sends_basic_auth_and_decodes_json() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/content/42")
        .match_header("authorization", "Basic amRvZTpzM2NyZXQ=")
        .match_header("accept", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "42", "title": "Roadmap"}"#)
        .create();

    let client = client_for(&server.url());
    let value: Option<Value> = client.get("rest/api/content/42", Query::new()).unwrap();

    mock.assert();
    assert_eq!(value, Some(json!({"id": "42", "title": "Roadmap"})));
}

#[test]
fn base_url_context_path_is_kept() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/wiki/rest/api/space/DOCS")
        .with_status(200)
        .with_body(r#"{"key": "DOCS"}"#)
        .create();

    let client = client_for(&format!("{}/wiki/", server.url()));
    let value: Option<Value> = client.get("/rest/api/space/DOCS", Query::new()).unwrap();

    mock.assert();
    assert_eq!(value, Some(json!({"key": "DOCS"})));
}

#[test]
fn no_content_yields_none() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content/42/label")
        .with_status(204)
        .create();

    let client = client_for(&server.url());
    let value: Option<Value> = client.get("rest/api/content/42/label", Query::new()).unwrap();
    assert_eq!(value, None);
}

#[test]
fn not_found_is_an_http_error_with_message() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content/404")
        .with_status(404)
        .with_body(r#"{"statusCode": 404, "message": "No content found with id 404"}"#)
        .create();

    let client = client_for(&server.url());
    let err = client
        .get::<Value>("rest/api/content/404", Query::new())
        .unwrap_err();

    assert!(err.is_not_found());
    match err {
        ApiError::Http { status, message, body } => {
            assert_eq!(status, 404);
            assert_eq!(message, "No content found with id 404");
            assert_eq!(body.unwrap()["statusCode"], 404);
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn unauthorized_is_an_auth_failure() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/space")
        .with_status(401)
        .create();

    let client = client_for(&server.url());
    let err = client.get::<Value>("rest/api/space", Query::new()).unwrap_err();
    assert!(err.is_auth_failure());
    assert_eq!(err.status(), Some(401));
}

#[test]
fn malformed_read_body_is_an_error() {
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content/42")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let client = client_for(&server.url());
    let err = client.get::<Value>("rest/api/content/42", Query::new()).unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponse { status: 200, .. }));
}

#[test]
fn empty_write_responses_are_no_content() {
    let mut server = Server::new();
    let post = server
        .mock("POST", "/rest/api/content/")
        .match_body(Matcher::PartialJson(json!({"title": "Notes"})))
        .with_status(200)
        .with_body("")
        .create();
    let put = server
        .mock("PUT", "/rest/api/content/42")
        .with_status(200)
        .with_body("OK")
        .create();

    let client = client_for(&server.url());
    let created: Option<Value> = client
        .post("rest/api/content/", &json!({"title": "Notes"}))
        .unwrap();
    let updated: Option<Value> = client
        .put("rest/api/content/42", &json!({"title": "Notes"}))
        .unwrap();

    post.assert();
    put.assert();
    assert_eq!(created, None);
    assert_eq!(updated, None);
}

#[test]
fn empty_patch_response_is_no_content() {
    let mut server = Server::new();
    let mock = server
        .mock("PATCH", "/rest/api/content/42/property/editor")
        .with_status(200)
        .with_body("")
        .create();

    let client = client_for(&server.url());
    let request = Request::new(Method::PATCH, "rest/api/content/42/property/editor")
        .json(json!({"value": "v2"}));
    let value: Option<Value> = client.send(&request).unwrap();

    mock.assert();
    assert_eq!(value, None);
}

#[test]
fn delete_with_empty_body_succeeds() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", "/rest/experimental/content/42/restriction/byOperation/read/user")
        .match_query(Matcher::UrlEncoded("userName".into(), "j doe".into()))
        .with_status(200)
        .create();

    let client = client_for(&server.url());
    client
        .delete(
            "rest/experimental/content/42/restriction/byOperation/read/user",
            Query::new().param("userName", "j doe"),
        )
        .unwrap();
    mock.assert();
}

#[test]
fn raw_flags_reach_the_server_unencoded() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("spaceKey".into(), "DOCS".into()),
            Matcher::Regex("(^|&)trigger($|&)".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"results": []}"#)
        .create();

    let client = client_for(&server.url());
    let request = Request::get("rest/api/content").query(Query::new().param("spaceKey", "DOCS").flag("trigger"));
    let value: Option<Value> = client.send(&request).unwrap();

    mock.assert();
    assert_eq!(value, Some(json!({"results": []})));
}

#[test]
fn connection_refused_is_a_transport_error() {
    let client = client_for("http://127.0.0.1:9");
    let err = client.get::<Value>("rest/api/space", Query::new()).unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
