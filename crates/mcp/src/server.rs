//! MCP server implementation.
//!
//! Reads JSON-RPC requests from a transport and dispatches them to the tool
//! catalog or the note resources. Remote failures inside a tool call are
//! folded into an error-flagged tool result; only protocol problems become
//! JSON-RPC errors.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use notebridge_client::NotesApi;
use notebridge_tool_runtime::{note_tools, RegistryError, ToolError, ToolRegistry, ToolResult};

use crate::error::McpError;
use crate::resources::NoteResources;
use crate::transport::McpTransport;
use crate::types::*;

/// MCP server that bridges the note catalog to an MCP host.
pub struct McpServer {
    registry: ToolRegistry,
    resources: NoteResources,
    server_name: String,
    server_version: String,
    initialized: bool,
}

impl McpServer {
    /// Create a server from an explicit tool catalog and resource provider.
    pub fn new(registry: ToolRegistry, resources: NoteResources) -> Self {
        Self {
            registry,
            resources,
            server_name: "notebridge".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            initialized: false,
        }
    }

    /// Create a server exposing the full note catalog backed by `api`.
    pub fn for_api(api: Arc<dyn NotesApi>) -> Result<Self, RegistryError> {
        let registry = note_tools(api.clone())?;
        Ok(Self::new(registry, NoteResources::new(api)))
    }

    /// Set the server name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.server_name = name.into();
        self
    }

    /// Run the server loop, reading from and writing to the transport.
    ///
    /// Processes one message at a time until the transport is closed.
    pub async fn run<T: McpTransport>(&mut self, transport: &mut T) -> Result<(), McpError> {
        tracing::info!(server = %self.server_name, tools = self.registry.len(), "MCP server starting");

        while let Some(line) = transport.receive().await? {
            tracing::debug!(message = %line, "Received message");

            if let Some(response) = self.handle_message(&line).await {
                let json = serde_json::to_string(&response)?;
                tracing::debug!(response = %json, "Sending response");
                transport.send(&json).await?;
            }
        }

        tracing::info!("Transport closed, shutting down");
        Ok(())
    }

    /// Handle one raw message line. Notifications produce no response.
    pub async fn handle_message(&mut self, line: &str) -> Option<JsonRpcResponse> {
        // Requests carry an "id"; notifications do not.
        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse JSON");
                return Some(Self::parse_failure(McpError::JsonParse(e)));
            }
        };

        if raw.get("id").is_none() {
            if let Ok(notif) = serde_json::from_value::<JsonRpcNotification>(raw) {
                self.handle_notification(&notif);
            }
            return None;
        }

        // Keep the id so a malformed request can still be answered.
        let id = raw
            .get("id")
            .and_then(|id| serde_json::from_value::<RpcId>(id.clone()).ok())
            .unwrap_or(RpcId::Null);

        match serde_json::from_value::<JsonRpcRequest>(raw) {
            Ok(request) => Some(self.handle_request(&request).await),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed JSON-RPC request");
                let err = McpError::InvalidRequest(e.to_string());
                Some(JsonRpcResponse::failure(id, err.to_rpc_error()))
            }
        }
    }

    /// Handle a single JSON-RPC request and produce a response.
    pub async fn handle_request(&mut self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        let params = &request.params;

        match request.method.as_str() {
            "initialize" => respond(id, Ok(self.initialize())),
            "ping" => respond(id, Ok(serde_json::json!({}))),
            "resources/list" => respond(id, Ok(self.resources.list())),
            "resources/templates/list" => respond(id, Ok(self.resources.templates())),
            "resources/read" => respond(id, self.read_resource(params).await),
            "tools/list" => respond(id, Ok(self.list_tools())),
            "tools/call" => respond(id, self.call_tool(params).await),
            method => {
                tracing::warn!(method = %method, "Unknown method");
                respond::<Value>(id, Err(McpError::MethodNotFound(method.to_string())))
            }
        }
    }

    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        match notif.method.as_str() {
            "notifications/initialized" => {
                tracing::info!("Client confirmed initialization");
            }
            "notifications/cancelled" => {
                // Remote calls already issued run to completion.
                tracing::debug!("Client cancelled a request");
            }
            method => {
                tracing::debug!(method = %method, "Unknown notification, ignoring");
            }
        }
    }

    fn initialize(&mut self) -> InitializeResult {
        tracing::info!("Handling initialize");
        self.initialized = true;

        InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
                resources: Some(ResourcesCapability {
                    subscribe: false,
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: Some(self.server_version.clone()),
            },
        }
    }

    fn list_tools(&self) -> ListToolsResult {
        tracing::debug!("Handling tools/list");
        ListToolsResult {
            tools: self.registry.list().into_iter().map(ToolInfo::from).collect(),
        }
    }

    async fn read_resource(&self, params: &Option<Value>) -> Result<ReadResourceResult, McpError> {
        let params: ReadResourceParams = parse_params(params)?;
        tracing::debug!(uri = %params.uri, "Handling resources/read");
        self.resources.read(&params.uri).await
    }

    async fn call_tool(&self, params: &Option<Value>) -> Result<CallToolResult, McpError> {
        let call: CallToolParams = parse_params(params)?;
        tracing::debug!(tool = %call.name, "Handling tools/call");

        if !self.initialized {
            tracing::debug!(tool = %call.name, "tools/call before initialize");
        }

        let tool = self
            .registry
            .get(&call.name)
            .ok_or_else(|| McpError::ToolNotFound(call.name.clone()))?;

        match tool.execute(call.arguments).await {
            Ok(result) => Ok(result.into()),
            Err(ToolError::InvalidInput(msg)) => {
                Err(McpError::InvalidParams(format!("{}: {msg}", call.name)))
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, error = %e, "Tool call failed");
                Ok(ToolResult::error(e).into())
            }
        }
    }

    fn parse_failure(err: McpError) -> JsonRpcResponse {
        JsonRpcResponse::failure(RpcId::Null, err.to_rpc_error())
    }
}

/// Deserialize method params, treating absent params as an error.
fn parse_params<T: DeserializeOwned>(params: &Option<Value>) -> Result<T, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::InvalidParams("missing params".to_string()))?;
    serde_json::from_value(params.clone()).map_err(|e| McpError::InvalidParams(e.to_string()))
}

fn respond<T: Serialize>(id: RpcId, result: Result<T, McpError>) -> JsonRpcResponse {
    match result.and_then(|r| serde_json::to_value(r).map_err(McpError::from)) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::failure(id, e.to_rpc_error()),
    }
}
