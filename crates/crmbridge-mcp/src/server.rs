//! MCP server over newline-delimited JSON-RPC

use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::{
    jsonrpc::{
        error_response, success_response, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
        RequestId, JSONRPC_VERSION,
    },
    mcp::{
        negotiate_protocol_version, Implementation, InitializeRequest, InitializeResponse,
        ServerCapabilities, Tool, ToolsCallRequest, ToolsCapability, ToolsListRequest,
        ToolsListResponse, METHOD_INITIALIZE, METHOD_PING, METHOD_TOOLS_CALL, METHOD_TOOLS_LIST,
    },
    GovernanceConfig, McpError, McpResult,
};
use crmbridge_core::Envelope;
use crmbridge_registry::{InvocationContext, ToolRegistry};

/// Identity reported in the `initialize` reply
#[derive(Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub title: Option<String>,
    pub instructions: Option<String>,
}

impl ServerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), title: None, instructions: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// MCP Server
pub struct McpServer {
    registry: Arc<ToolRegistry>,
    governance: GovernanceConfig,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(registry: Arc<ToolRegistry>, governance: GovernanceConfig, info: ServerInfo) -> Self {
        Self { registry, governance, info }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Process one line of input.
    ///
    /// Returns `None` for notifications; every other message gets a response,
    /// including malformed ones.
    pub async fn process_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to parse JSON-RPC message: {}", e);
                return Some(error_response(
                    None,
                    JsonRpcError::parse_error().with_data(json!({"message": e.to_string()})),
                ));
            }
        };

        if value.is_array() {
            warn!("Batch requests are not supported");
            return Some(error_response(
                None,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Batch requests are not supported"})),
            ));
        }

        if matches!(value.get("id"), Some(Value::Null)) {
            return Some(error_response(
                None,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Request id must be a string or number"})),
            ));
        }
        let raw_id = value.get("id").and_then(|id| serde_json::from_value(id.clone()).ok());
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(error_response(
                    raw_id,
                    JsonRpcError::invalid_request().with_data(json!({"message": e.to_string()})),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(error_response(
                request.id,
                JsonRpcError::invalid_request()
                    .with_data(json!({"message": "Invalid JSON-RPC version"})),
            ));
        }

        if request.is_notification() {
            debug!(method = %request.method, "Received notification, ignoring");
            return None;
        }

        debug!("Processing method: {}", request.method);

        let outcome = match request.method.as_str() {
            METHOD_INITIALIZE => self.handle_initialize(&request),
            METHOD_PING => Ok(json!({})),
            METHOD_TOOLS_LIST => self.handle_tools_list(&request),
            METHOD_TOOLS_CALL => self.handle_tools_call(&request).await,
            _ => {
                return Some(error_response(
                    request.id,
                    JsonRpcError::method_not_found().with_data(json!({"method": request.method})),
                ));
            }
        };

        Some(match outcome {
            Ok(result) => success_response(request.id, result),
            Err(e) => {
                warn!(method = %request.method, error = %e, "request failed");
                error_response(request.id, e.to_jsonrpc_error())
            }
        })
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        let params = request
            .params
            .as_ref()
            .ok_or_else(|| McpError::InvalidParams("Missing params for initialize".to_string()))?;

        let init_request: InitializeRequest = serde_json::from_value(params.clone())
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        if let Some(client) = &init_request.client_info {
            info!(client = %client.name, version = %client.version, "client connected");
        }

        let response = InitializeResponse {
            protocol_version: negotiate_protocol_version(init_request.protocol_version.as_deref())
                .to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: Some(false) }),
            },
            server_info: Implementation {
                name: self.info.name.clone(),
                title: self.info.title.clone(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: self.info.instructions.clone(),
        };

        Ok(serde_json::to_value(response)?)
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        let _params: ToolsListRequest = match &request.params {
            Some(params) => serde_json::from_value(params.clone())
                .map_err(|e| McpError::InvalidParams(e.to_string()))?,
            None => ToolsListRequest::default(),
        };

        let tools: Vec<Tool> = self
            .registry
            .tools()
            .filter(|descriptor| self.governance.is_tool_allowed(&descriptor.name))
            .map(Tool::from)
            .collect();

        debug!(count = tools.len(), "listing tools");
        Ok(serde_json::to_value(ToolsListResponse { tools, next_cursor: None })?)
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> McpResult<Value> {
        let params = request
            .params
            .as_ref()
            .ok_or_else(|| McpError::InvalidParams("Missing params for tools/call".to_string()))?;

        let call_request: ToolsCallRequest = serde_json::from_value(params.clone())
            .map_err(|e| McpError::InvalidParams(e.to_string()))?;

        let envelope = if self.governance.is_tool_allowed(&call_request.name) {
            let arguments = call_request.arguments.unwrap_or_else(|| json!({}));
            let context = match &request.id {
                Some(RequestId::String(id)) => InvocationContext::with_id(id.clone()),
                Some(RequestId::Number(id)) => InvocationContext::with_id(id.to_string()),
                None => InvocationContext::new(),
            };
            match self.registry.invoke_with_context(&call_request.name, arguments, context).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!(tool = %call_request.name, error = %e, "tool call rejected");
                    Envelope::error(e.to_string())
                }
            }
        } else {
            warn!("Tool '{}' denied by governance policy", call_request.name);
            Envelope::error(format!("Tool '{}' is not allowed", call_request.name))
        };

        Ok(serde_json::to_value(envelope)?)
    }
}

/// Serve MCP over stdin/stdout until stdin closes
pub async fn serve_stdio(server: Arc<McpServer>) -> McpResult<()> {
    info!(tools = server.registry().len(), "Starting MCP server (stdio mode)");
    serve(server, tokio::io::stdin(), tokio::io::stdout()).await?;
    info!("MCP server stopped");
    Ok(())
}

/// Serve MCP over an arbitrary line-oriented reader/writer pair.
///
/// Each message is handled on its own task; a single writer task owns the
/// output so response lines never interleave. Returns once the reader hits
/// EOF and every in-flight message has been answered.
pub async fn serve<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> McpResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();

    let writer_task = tokio::spawn(async move {
        let mut writer = writer;
        while let Some(response) = rx.recv().await {
            let mut line = serde_json::to_string(&response)?;
            line.push('\n');
            writer.write_all(line.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok::<(), McpError>(())
    });

    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }

        let server = Arc::clone(&server);
        let tx = tx.clone();
        tokio::spawn(async move {
            if let Some(response) = server.process_message(&line).await {
                if tx.send(response).is_err() {
                    warn!("output closed, dropping response");
                }
            }
        });
    }

    drop(tx);
    writer_task.await.map_err(|e| McpError::Internal(e.to_string()))?
}
