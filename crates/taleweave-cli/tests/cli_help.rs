use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("taleweave")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("stories"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_help_shows_deep_link_flag() {
    cargo_bin_cmd!("taleweave")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--tale"))
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_stories_help_shows_subcommands() {
    cargo_bin_cmd!("taleweave")
        .args(["stories", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_generate_help_shows_flags() {
    cargo_bin_cmd!("taleweave")
        .args(["generate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--topic"))
        .stdout(predicate::str::contains("--culture"))
        .stdout(predicate::str::contains("--with-audio"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("taleweave")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
