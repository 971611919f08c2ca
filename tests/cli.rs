//
//  atlassian-api
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use tempfile::TempDir;

/// An `atl` command isolated from the user's config and environment.
fn atl(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("atl").unwrap();
    cmd.env("ATL_CONFIG", config_dir.path().join("config.toml"))
        .env("NO_COLOR", "1")
        .env_remove("ATL_HOST")
        .env_remove("ATL_USERNAME")
        .env_remove("ATL_TOKEN")
        .env_remove("ATL_DEBUG");
    cmd
}

fn atl_against(config_dir: &TempDir, server_url: &str) -> Command {
    let mut cmd = atl(config_dir);
    cmd.env("ATL_HOST", server_url)
        .env("ATL_USERNAME", "jdoe")
        .env("ATL_TOKEN", "s3cret");
    cmd
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    atl(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("page"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("api"));
}

#[test]
fn version_prints_package_version() {
    let dir = TempDir::new().unwrap();
    atl(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("atl version ").and(predicate::str::contains(env!("CARGO_PKG_VERSION"))));
}

#[test]
fn config_set_get_and_list() {
    let dir = TempDir::new().unwrap();
    atl(&dir)
        .args(["config", "set", "default_host", "https://Wiki.Example.com/"])
        .assert()
        .success();
    atl(&dir)
        .args(["config", "set", "hosts.wiki.example.com.user", "jdoe"])
        .assert()
        .success();

    atl(&dir)
        .args(["config", "get", "default_host"])
        .assert()
        .success()
        .stdout("wiki.example.com\n");
    atl(&dir)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hosts.wiki.example.com.user = jdoe"));
}

#[test]
fn config_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    atl(&dir)
        .args(["config", "set", "editor", "vim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key 'editor'"));
}

#[test]
fn commands_need_a_host() {
    let dir = TempDir::new().unwrap();
    atl(&dir)
        .args(["search", "type = page"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No host selected"));
}

#[test]
fn api_prints_response_json() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/space/DOCS")
        .match_query(Matcher::UrlEncoded("expand".into(), "homepage".into()))
        .match_header("authorization", "Basic amRvZTpzM2NyZXQ=")
        .with_status(200)
        .with_body(r#"{"key": "DOCS", "name": "Documentation"}"#)
        .create();

    atl_against(&dir, &server.url())
        .args(["api", "rest/api/space/DOCS", "-q", "expand=homepage"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key": "DOCS""#));
    mock.assert();
}

#[test]
fn api_paginate_rejects_a_non_list_response() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/space/DOCS")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"key": "DOCS", "name": "Docs"}"#)
        .create();

    atl_against(&dir, &server.url())
        .args(["api", "rest/api/space/DOCS", "--paginate"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not a paginated listing"));
}

#[test]
fn api_paginate_collects_results() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/rest/api/space")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("start".into(), "0".into()),
            Matcher::UrlEncoded("limit".into(), "100".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"results": [{"key": "DOCS"}, {"key": "OPS"}], "start": 0, "limit": 100, "size": 2, "_links": {}}"#)
        .expect(1)
        .create();

    atl_against(&dir, &server.url())
        .args(["api", "rest/api/space", "--paginate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""key": "OPS""#));
    mock.assert();
}

#[test]
fn not_found_maps_to_exit_code() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content/404")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"message": "No content found with id: ContentId{id=404}"}"#)
        .create();

    atl_against(&dir, &server.url())
        .args(["page", "view", "404"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("No content found"));
}

#[test]
fn page_view_json_includes_url() {
    let dir = TempDir::new().unwrap();
    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content/42")
        .match_query(Matcher::UrlEncoded("expand".into(), "space,version,body.storage".into()))
        .with_status(200)
        .with_body(
            r#"{"id": "42", "type": "page", "title": "Roadmap", "space": {"key": "DOCS"},
                "version": {"number": 3}, "_links": {"webui": "/display/DOCS/Roadmap"}}"#,
        )
        .create();

    let url = server.url();
    atl_against(&dir, &url)
        .args(["page", "view", "42", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "Roadmap""#))
        .stdout(predicate::str::contains(format!(r#""url": "{url}/display/DOCS/Roadmap""#)));
}

#[test]
fn page_upsert_reads_body_file() {
    let dir = TempDir::new().unwrap();
    let body_path = dir.path().join("body.xml");
    std::fs::write(&body_path, "<p>hello</p>").unwrap();

    let mut server = Server::new();
    server
        .mock("GET", "/rest/api/content/1000")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"id": "1000", "title": "Parent", "space": {"key": "DOCS"}}"#)
        .create();
    server
        .mock("GET", "/rest/api/content")
        .match_query(Matcher::UrlEncoded("title".into(), "Hello".into()))
        .with_status(200)
        .with_body(r#"{"results": [], "start": 0, "limit": 25, "size": 0}"#)
        .create();
    let post = server
        .mock("POST", "/rest/api/content/")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "title": "Hello",
            "body": {"storage": {"value": "<p>hello</p>"}}
        })))
        .with_status(200)
        .with_body(r#"{"id": "2000", "title": "Hello", "version": {"number": 1}}"#)
        .expect(1)
        .create();

    atl_against(&dir, &server.url())
        .args(["page", "upsert", "--parent", "1000", "--title", "Hello", "--body-file"])
        .arg(&body_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created page Hello (2000)"));
    post.assert();
}
