//! CLI tests against a mock mnubo API.
//!
//! Each test starts a wiremock server and runs the built `mnubo` binary
//! against it through the `MNUBO_*` environment variables.

use std::process::{Command, Output};

use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Run the CLI binary with arguments against `host`.
async fn run_cli(args: &[&str], host: Option<String>) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();

    tokio::task::spawn_blocking(move || {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_mnubo"));
        cmd.args(&args);
        cmd.env_remove("RUST_LOG");
        match host {
            Some(host) => {
                cmd.env("MNUBO_HOST", host);
                cmd.env("MNUBO_CLIENT_ID", "cli-client");
                cmd.env("MNUBO_CLIENT_SECRET", "cli-secret");
            }
            None => {
                cmd.env_remove("MNUBO_HOST");
                cmd.env_remove("MNUBO_CLIENT_ID");
                cmd.env_remove("MNUBO_CLIENT_SECRET");
            }
        }
        cmd.output().expect("Failed to execute CLI")
    })
    .await
    .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

async fn mock_api() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "cli-token",
            "expires_in": 3600
        })))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_credentials_fail() {
    let output = run_cli(&["get", "owners"], None).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("client_id cannot be null or empty"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_token_json() {
    let server = mock_api().await;

    let output = run_cli(&["token", "--json"], Some(server.uri())).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let info: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(info["expires_in"], 3600);
    assert!(!stdout(&output).contains("cli-token"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_prints_json_body() {
    let server = mock_api().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/owners/alice"))
        .and(query_param("fields", "username"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"username": "alice"})))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(
        &["get", "owners/alice", "--param", "fields=username"],
        Some(server.uri()),
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let body: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(body["username"], "alice");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_without_compression() {
    let server = mock_api().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/events"))
        .and(body_json(json!({"x": 1})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(
        &["post", "events", "--body", r#"{"x": 1}"#, "--no-compression"],
        Some(server.uri()),
    )
    .await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_body_is_rejected_locally() {
    let server = mock_api().await;

    let output = run_cli(&["put", "owners/alice", "--body", "{oops"], Some(server.uri())).await;

    assert!(!output.status.success());
    assert!(stderr(&output).contains("not valid JSON"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_conflict_reports_body() {
    let server = mock_api().await;

    Mock::given(method("PUT"))
        .and(path("/api/v3/owners/alice"))
        .respond_with(ResponseTemplate::new(409).set_body_string("Owner already exists"))
        .mount(&server)
        .await;

    let output = run_cli(&["put", "owners/alice"], Some(server.uri())).await;

    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("PUT owners/alice failed"));
    assert!(err.contains("Owner already exists"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_success() {
    let server = mock_api().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v3/objects/dev-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_cli(&["delete", "objects/dev-1"], Some(server.uri())).await;
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Deleted objects/dev-1"));
}
