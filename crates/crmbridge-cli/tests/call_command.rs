//! `call` command behavior against a mock vendor

use crmbridge_cli::commands::CallCommand;
use crmbridge_cli::CliError;
use crmbridge_config::ConfigError;
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::io::Write;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn missing_startup_credential_fails_before_any_request() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.any_request();
            then.status(200).body("{}");
        })
        .await;

    let env = env(&[("CLOSE_BASE_URL", server.url("/api/v1").as_str())]);
    let err = CallCommand::invoke("close", "listLeads", json!({}), None, 30, &env)
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Config(ConfigError::MissingCredential { .. })));
    assert_eq!(
        err.to_string(),
        "Missing credential for close: environment variable CLOSE_API_KEY is not set"
    );
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn call_returns_vendor_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/tickets/42")
                .header("authorization", "Basic ZmQta2V5Olg=");
            then.status(200).body(r#"{"id":42,"subject":"Printer on fire"}"#);
        })
        .await;

    let env = env(&[
        ("FRESHDESK_API_KEY", "fd-key"),
        ("FRESHDESK_BASE_URL", server.url("/api/v2").as_str()),
    ]);
    let envelope = CallCommand::invoke("freshdesk", "getTicket", json!({"ticketId": 42}), None, 30, &env)
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(!envelope.is_error());
    assert_eq!(
        envelope.text_content(),
        "{\n  \"id\": 42,\n  \"subject\": \"Printer on fire\"\n}"
    );
}

#[tokio::test]
async fn unknown_tool_is_an_error() {
    let env = env(&[("PIPEDRIVE_API_TOKEN", "t")]);
    let err = CallCommand::invoke("pipedrive", "launchRocket", json!({}), None, 30, &env)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Registry error: Unknown tool: launchRocket");
}

#[tokio::test]
async fn catalog_file_replaces_builtin() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/things").query_param("q", "widgets");
            then.status(500).body("upstream exploded");
        })
        .await;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        r#"
vendor: pipedrive
base_url: {}
auth:
  type: none
credential:
  type: none
tools:
  - name: findThings
    description: Find things
    method: GET
    path: /things
    params:
      - name: q
        type: string
        in: query
        required: true
"#,
        server.url("/v1")
    )
    .unwrap();

    let envelope = CallCommand::invoke(
        "pipedrive",
        "findThings",
        json!({"q": "widgets"}),
        Some(file.path()),
        30,
        &HashMap::<String, String>::new(),
    )
    .await
    .unwrap();

    mock.assert_async().await;
    assert!(envelope.is_error());
    assert_eq!(envelope.text_content(), "API Error (500): upstream exploded");
}
