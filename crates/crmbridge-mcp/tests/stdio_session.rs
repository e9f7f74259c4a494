//! Full JSON-RPC sessions through `serve` with in-memory pipes

use async_trait::async_trait;
use crmbridge_core::{Envelope, InputSchema, ParamSpec, ParamType, ValidatedInput};
use crmbridge_mcp::jsonrpc::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use crmbridge_mcp::server::serve;
use crmbridge_mcp::{GovernanceConfig, McpServer, ServerInfo};
use crmbridge_registry::{RegistryResult, ToolAnnotations, ToolDescriptor, ToolHandler, ToolRegistry};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

struct GetDeal;

#[async_trait]
impl ToolHandler for GetDeal {
    async fn call(&self, input: ValidatedInput) -> RegistryResult<Envelope> {
        let id = input.get("id").cloned().unwrap_or(Value::Null);
        Ok(Envelope::json(&json!({"id": id, "title": "Big deal"})))
    }
}

fn registry() -> Arc<ToolRegistry> {
    let schema = InputSchema::new(
        vec![ParamSpec::new("id", ParamType::Integer).required().describe("Deal ID")],
        vec![],
    )
    .unwrap();
    let mut registry = ToolRegistry::new();
    registry
        .register(
            ToolDescriptor::new("getDeal", "Get a deal", schema, Arc::new(GetDeal))
                .with_title("Get deal")
                .with_annotations(ToolAnnotations {
                    read_only_hint: true,
                    idempotent_hint: true,
                    open_world_hint: true,
                    ..Default::default()
                }),
        )
        .unwrap();
    Arc::new(registry)
}

/// Feed `input` through a server and collect responses keyed by order of id
async fn session(input: &str, governance: GovernanceConfig) -> Vec<Value> {
    let server = Arc::new(McpServer::new(
        registry(),
        governance,
        ServerInfo::new("crmbridge-test").with_instructions("test tools"),
    ));
    let (writer, mut output) = tokio::io::duplex(64 * 1024);

    serve(server, input.as_bytes(), writer).await.unwrap();

    let mut text = String::new();
    output.read_to_string(&mut text).await.unwrap();
    let mut responses: Vec<Value> =
        text.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    responses.sort_by_key(|r| r["id"].as_i64().unwrap_or(-1));
    responses
}

#[tokio::test]
async fn initialize_list_and_call() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"inspector","version":"1.0"}}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"getDeal","arguments":{"id":42}}}"#,
        "",
        r#"{"jsonrpc":"2.0","id":4,"method":"ping"}"#,
    ]
    .join("\n");

    let responses = session(&input, GovernanceConfig::default()).await;
    assert_eq!(responses.len(), 4);

    let init = &responses[0]["result"];
    assert_eq!(init["protocolVersion"], json!("2025-03-26"));
    assert_eq!(init["serverInfo"]["name"], json!("crmbridge-test"));
    assert_eq!(init["instructions"], json!("test tools"));
    assert!(init["capabilities"]["tools"].is_object());

    let tool = &responses[1]["result"]["tools"][0];
    assert_eq!(tool["name"], json!("getDeal"));
    assert_eq!(tool["title"], json!("Get deal"));
    assert_eq!(tool["inputSchema"]["required"], json!(["id"]));
    assert_eq!(tool["annotations"]["readOnlyHint"], json!(true));

    let call = &responses[2]["result"];
    assert_eq!(call["isError"], json!(false));
    assert_eq!(
        call["content"][0],
        json!({"type": "text", "text": "{\n  \"id\": 42,\n  \"title\": \"Big deal\"\n}"})
    );

    assert_eq!(responses[3]["result"], json!({}));
}

#[tokio::test]
async fn tool_level_failures_are_envelopes() {
    let input = [
        r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"getDeal","arguments":{}}}"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"nope"}}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"getDeal","arguments":{"id":1}}}"#,
    ]
    .join("\n");

    let responses = session(&input, GovernanceConfig::new(vec![], vec!["get*".into()])).await;

    let denied = &responses[0]["result"];
    assert_eq!(denied["isError"], json!(true));
    assert_eq!(denied["content"][0]["text"], json!("Tool 'getDeal' is not allowed"));

    let unknown = &responses[1]["result"];
    assert_eq!(unknown["isError"], json!(true));
    assert_eq!(unknown["content"][0]["text"], json!("Unknown tool: nope"));

    assert_eq!(responses[2]["result"]["isError"], json!(true));
}

#[tokio::test]
async fn validation_failure_names_the_field() {
    let input =
        r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"getDeal","arguments":{}}}"#;

    let responses = session(input, GovernanceConfig::default()).await;

    let result = &responses[0]["result"];
    assert_eq!(result["isError"], json!(true));
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Invalid arguments for tool 'getDeal': id"), "{}", text);
}

#[tokio::test]
async fn protocol_errors() {
    let input = [
        "{not json",
        r#"[{"jsonrpc":"2.0","id":1,"method":"ping"}]"#,
        r#"{"jsonrpc":"2.0","id":2,"method":"resources/list"}"#,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call"}"#,
        r#"{"jsonrpc":"1.0","id":4,"method":"ping"}"#,
        r#"{"jsonrpc":"2.0","id":5}"#,
    ]
    .join("\n");

    let responses = session(&input, GovernanceConfig::default()).await;
    assert_eq!(responses.len(), 6);

    // id-less errors sort first
    let mut anonymous: Vec<i64> = responses[..2]
        .iter()
        .map(|r| {
            assert_eq!(r["id"], Value::Null);
            r["error"]["code"].as_i64().unwrap()
        })
        .collect();
    anonymous.sort();
    assert_eq!(anonymous, vec![PARSE_ERROR as i64, INVALID_REQUEST as i64]);

    assert_eq!(responses[2]["error"]["code"], json!(METHOD_NOT_FOUND));
    assert_eq!(responses[3]["error"]["code"], json!(INVALID_PARAMS));
    assert_eq!(responses[4]["error"]["code"], json!(INVALID_REQUEST));
    assert_eq!(responses[5]["error"]["code"], json!(INVALID_REQUEST));
    assert_eq!(responses[5]["id"], json!(5));
}
