//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SETTINGS_VARS: [&str; 5] = [
    "FM_ACTIONS_TOKEN",
    "FM_ACTIONS_ORG_ID",
    "FM_ACTIONS_APPLICATION_NAME",
    "FM_ACTIONS_API_URL",
    "FM_ACTIONS_USE_ORG_AS_APP",
];

/// Binary isolated from the developer's home settings, `.env` and outputs dir.
fn fm_actions(home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fm-actions"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("CLOUDBEES_OUTPUTS")
        .env_remove("RUST_LOG");
    for var in SETTINGS_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn auth_args(api_url: &str) -> Vec<String> {
    ["--token", "test-token", "--org-id", "org-1", "--api-url", api_url]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fm-actions"));
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Feature Management"))
        .stdout(predicate::str::contains("list-environments"))
        .stdout(predicate::str::contains("list-flags"))
        .stdout(predicate::str::contains("create-flag"))
        .stdout(predicate::str::contains("get-flag-config"))
        .stdout(predicate::str::contains("set-flag-config"))
        .stdout(predicate::str::contains("delete-flag"));
}

#[test]
fn test_command_help() {
    let home = TempDir::new().expect("home");
    for command in [
        "list-environments",
        "list-flags",
        "create-flag",
        "get-flag-config",
        "set-flag-config",
        "delete-flag",
    ] {
        fm_actions(&home)
            .args([command, "--help"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"))
            .stdout(predicate::str::contains("--token"));
    }
}

#[test]
fn test_missing_token_fails() {
    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .args(["list-environments", "--org-id", "org-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("token is required"));
}

#[test]
fn test_missing_org_id_fails() {
    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .args(["list-environments", "--token", "t"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("org-id is required"));
}

#[test]
fn test_missing_flag_name_fails() {
    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .args([
            "get-flag-config",
            "--token",
            "t",
            "--org-id",
            "o",
            "--application-name",
            "a",
            "--environment-name",
            "e",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--flag-name"));
}

#[test]
fn test_missing_application_name_fails() {
    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .args(["list-flags", "--token", "t", "--org-id", "o"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("application-name is required"));
}

#[test]
fn test_delete_without_confirm_makes_no_request() {
    let mut server = mockito::Server::new();
    let any = server.mock("GET", mockito::Matcher::Any).expect(0).create();

    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .args(["delete-flag", "--flag-name", "old", "--application-name", "web"])
        .args(auth_args(&server.url()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use --confirm to proceed or --dry-run to preview"));
    any.assert();
}

#[test]
fn test_set_flag_config_without_changes_makes_no_request() {
    let mut server = mockito::Server::new();
    let any = server.mock("GET", mockito::Matcher::Any).expect(0).create();

    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .args([
            "set-flag-config",
            "--flag-name",
            "checkout",
            "--environment-name",
            "production",
            "--application-name",
            "web",
        ])
        .args(auth_args(&server.url()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no configuration changes specified"));
    any.assert();
}

#[test]
fn test_list_environments_writes_outputs() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/organizations/org-1/environments")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(
            r#"{"environments":[{"id":"e1","name":"production"},{"id":"e2","name":"qa","isDisabled":true}]}"#,
        )
        .create();

    let home = TempDir::new().expect("home");
    let outputs = TempDir::new().expect("outputs");
    fm_actions(&home)
        .env("CLOUDBEES_OUTPUTS", outputs.path())
        .arg("list-environments")
        .args(auth_args(&server.url()))
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 environments:"))
        .stdout(predicate::str::contains("- qa (ID: e2, Status: disabled)"));

    mock.assert();
    let count = fs::read_to_string(outputs.path().join("environment-count")).expect("count");
    assert_eq!(count, "2");
    let listed = fs::read_to_string(outputs.path().join("environments")).expect("environments");
    assert!(listed.contains("\"name\":\"production\""));
}

#[test]
fn test_missing_outputs_dir_warns() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v2/organizations/org-1/environments")
        .with_status(200)
        .with_body(r#"{"environments":[]}"#)
        .create();

    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .arg("list-environments")
        .args(auth_args(&server.url()))
        .assert()
        .success()
        .stdout(predicate::str::contains("No environments found"))
        .stderr(predicate::str::contains("CLOUDBEES_OUTPUTS environment variable not set"));
}

#[test]
fn test_api_error_reports_status_and_body() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v2/organizations/org-1/environments")
        .with_status(401)
        .with_body("invalid token")
        .create();

    let home = TempDir::new().expect("home");
    fm_actions(&home)
        .arg("list-environments")
        .args(auth_args(&server.url()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("status 401"))
        .stderr(predicate::str::contains("invalid token"));
}

#[test]
fn test_set_flag_config_dry_run_skips_put() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v1/organizations/org-1/services")
        .match_query(mockito::Matcher::Any)
        .with_body(r#"{"service":[{"id":"app-1","name":"web"}]}"#)
        .create();
    server
        .mock("GET", "/v2/applications/app-1/flags/by-name/checkout")
        .with_body(r#"{"flag":{"id":"f1","name":"checkout"}}"#)
        .create();
    server
        .mock("GET", "/v2/organizations/org-1/environments")
        .with_body(r#"{"environments":[{"id":"e1","name":"production"}]}"#)
        .create();
    let put = server.mock("PUT", mockito::Matcher::Any).expect(0).create();

    let home = TempDir::new().expect("home");
    let outputs = TempDir::new().expect("outputs");
    fm_actions(&home)
        .env("CLOUDBEES_OUTPUTS", outputs.path())
        .args([
            "set-flag-config",
            "-f",
            "checkout",
            "-e",
            "production",
            "--application-name",
            "web",
            "--enabled",
            "false",
            "--dry-run",
        ])
        .args(auth_args(&server.url()))
        .assert()
        .success()
        .stdout(predicate::str::contains("DRY RUN: Would update flag 'checkout'"));

    put.assert();
    assert!(!outputs.path().join("success").exists());
}

#[test]
fn test_legacy_mode_lists_flags_under_org_id() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/v1/organizations/org-1/services")
        .match_query(mockito::Matcher::UrlEncoded("typeFilter".into(), "APPLICATION_FILTER".into()))
        .with_body(r#"{"service":[{"id":"app-1","name":"web"}]}"#)
        .create();
    let flags = server
        .mock("GET", "/v2/applications/org-1/flags")
        .with_body(r#"{"flags":[{"id":"f1","name":"checkout","flagType":"Boolean"}]}"#)
        .create();

    let home = TempDir::new().expect("home");
    let outputs = TempDir::new().expect("outputs");
    fm_actions(&home)
        .env("CLOUDBEES_OUTPUTS", outputs.path())
        .args(["list-flags", "--application-name", "web", "--use-org-as-app"])
        .args(auth_args(&server.url()))
        .assert()
        .success();

    flags.assert();
    assert_eq!(fs::read_to_string(outputs.path().join("flag-count")).expect("count"), "1");
}

#[test]
fn test_settings_file_supplies_credentials() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/v2/organizations/org-from-file/environments")
        .match_header("authorization", "Bearer file-token")
        .with_body(r#"{"environments":[]}"#)
        .create();

    let home = TempDir::new().expect("home");
    fs::write(
        home.path().join(".fm-actions.yaml"),
        format!("token: file-token\norg_id: org-from-file\napi_url: {}\n", server.url()),
    )
    .expect("write settings");

    fm_actions(&home).arg("list-environments").assert().success();
    mock.assert();
}
