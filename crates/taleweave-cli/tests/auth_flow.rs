//! Integration tests for login, register, and logout.


use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, temp_home, write_config, write_token};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_persists_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    write_config(home.path(), &mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_partial_json(json!({
            "email": "reader@example.com",
            "password": "hunter2",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-abc",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args([
            "login",
            "--email",
            "reader@example.com",
            "--password",
            "hunter2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as reader@example.com"));

    let token = fs::read_to_string(home.path().join("token.json")).unwrap();
    assert!(token.contains("tok-abc"));
}

#[tokio::test]
async fn test_register_sends_name_and_persists_token() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    write_config(home.path(), &mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_partial_json(json!({
            "email": "new@example.com",
            "password": "hunter2",
            "name": "New Reader",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-new",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args([
            "register",
            "--email",
            "new@example.com",
            "--name",
            "New Reader",
            "--password",
            "hunter2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created"));

    let token = fs::read_to_string(home.path().join("token.json")).unwrap();
    assert!(token.contains("tok-new"));
}

#[tokio::test]
async fn test_login_failure_reports_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    write_config(home.path(), &mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args([
            "login",
            "--email",
            "reader@example.com",
            "--password",
            "wrong",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login failed"));

    assert!(!home.path().join("token.json").exists());
}

#[test]
fn test_logout_removes_token() {
    let home = temp_home();
    write_token(home.path());

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed out."));

    assert!(!home.path().join("token.json").exists());

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in."));
}
