//! Integration tests for one-shot generation against a mock backend.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{can_bind_localhost, temp_home, write_config, write_token};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_generate_prints_cleaned_story() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    write_config(home.path(), &mock_server.uri());
    write_token(home.path());

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "topic": "Dragons",
            "length": "medium",
            "with_audio": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "story": "<think>outline</think>The Brave Dragon\n\nOnce upon a time.\nThe End. trailing notes",
            "audio_url": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args(["generate", "--topic", "Dragons"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The Brave Dragon"))
        .stdout(predicate::str::contains("Once upon a time."))
        .stdout(predicate::str::contains("The End."))
        // Everything after the end marker is dropped, think blocks too.
        .stdout(predicate::str::contains("trailing notes").not())
        .stdout(predicate::str::contains("outline").not());
}

#[tokio::test]
async fn test_generate_universal_culture_sends_null() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    write_config(home.path(), &mock_server.uri());
    write_token(home.path());

    Mock::given(method("POST"))
        .and(path("/generate"))
        .and(body_partial_json(json!({
            "culture": null,
            "language": "English",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "story": "A tale.\nThe End.",
            "audio_url": null,
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Kazakh submits "English"; universal submits a null culture.
    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args([
            "generate",
            "--topic",
            "Dragons",
            "--culture",
            "universal",
            "--language",
            "Kazakh",
        ])
        .assert()
        .success();
}

#[tokio::test]
async fn test_generate_failure_reports_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;
    write_config(home.path(), &mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/generate"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})),
        )
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args(["generate", "--topic", "Dragons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("generation failed"));
}

#[test]
fn test_generate_rejects_unknown_length() {
    let home = temp_home();

    cargo_bin_cmd!("taleweave")
        .env("TALEWEAVE_HOME", home.path())
        .args(["generate", "--topic", "Dragons", "--length", "epic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown length 'epic'"));
}
