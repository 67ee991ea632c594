//! MCP server implementation for shadcn/ui component lookup.
//!
//! This module implements the MCP server lifecycle:
//!
//! 1. **Initialisation**: Capability negotiation and version agreement
//! 2. **Operation**: Tool calls, resource reads and prompt rendering
//! 3. **Shutdown**: EOF on stdin, SIGINT or SIGTERM
//!
//! # Request Handling
//!
//! Lifecycle and listing requests that need no network are answered inline.
//! `tools/call`, `resources/list` and `resources/read` may wait on the
//! upstream site, so each runs on its own task and replies through the
//! transport's [`Outbox`] when done. A slow fetch only delays its own reply.

use std::collections::HashMap;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::mcp::protocol::{
    IncomingMessage, JsonRpcError, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    OutgoingMessage, RequestId, MCP_PROTOCOL_VERSION, SERVER_NAME,
};
use crate::mcp::transport::{self, LineReader, LineWriter, Outbox};
use crate::shadcn::address::{self, ComponentUri};
use crate::shadcn::prompts::PromptKind;
use crate::shadcn::{ComponentService, SectionSelection};

/// Server state in the MCP lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Waiting for initialize request.
    AwaitingInit,
    /// Initialize received, waiting for initialized notification.
    Initialising,
    /// Ready for normal operation.
    Running,
    /// Shutdown in progress.
    ShuttingDown,
}

/// Server capabilities advertised during initialisation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServerCapabilities {
    /// Tool-related capabilities.
    pub tools: ListCapability,
    /// Resource-related capabilities.
    pub resources: ResourceCapabilities,
    /// Prompt-related capabilities.
    pub prompts: ListCapability,
}

/// Capability for a list that may change during the session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListCapability {
    /// Whether the list can change during the session.
    #[serde(rename = "listChanged", skip_serializing_if = "is_false")]
    pub list_changed: bool,
}

/// Resource-specific capabilities.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCapabilities {
    /// Whether clients may subscribe to resource updates.
    #[serde(skip_serializing_if = "is_false")]
    pub subscribe: bool,
    /// Whether the resource list can change during the session.
    #[serde(skip_serializing_if = "is_false")]
    pub list_changed: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if requires a predicate fn(&T) -> bool, so we must take &bool here
const fn is_false(b: &bool) -> bool {
    !*b
}

/// Server information for initialisation response.
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerInfo {
    fn default() -> Self {
        Self {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Client information received during initialisation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    /// Client name.
    pub name: String,
    /// Client version.
    #[serde(default)]
    pub version: Option<String>,
}

/// Parameters for the initialize request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    /// Protocol version requested by client.
    pub protocol_version: String,
    /// Client capabilities.
    #[serde(default)]
    pub capabilities: Value,
    /// Client information.
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// A tool definition for tools/list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the tool's input parameters.
    pub input_schema: Value,
}

/// Parameters for tools/call request.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCallParams {
    /// Name of the tool to call.
    pub name: String,
    /// Arguments for the tool.
    #[serde(default)]
    pub arguments: Value,
}

/// Content item in a tool call response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

/// Result of a tool call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the tool call resulted in an error.
    #[serde(skip_serializing_if = "is_false")]
    pub is_error: bool,
}

impl ToolCallResult {
    /// Creates a successful text result.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Creates an error text result.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: message.into(),
            }],
            is_error: true,
        }
    }
}

/// Parameters for resources/read request.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceReadParams {
    /// Identifier of the resource to read.
    pub uri: String,
}

/// One item of a resources/read response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    /// Identifier that was read.
    pub uri: String,
    /// Content type of `text`.
    pub mime_type: &'static str,
    /// The rendered document.
    pub text: String,
}

/// An argument accepted by a prompt.
#[derive(Debug, Clone, Serialize)]
pub struct PromptArgument {
    /// Argument name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Whether the argument must be supplied.
    pub required: bool,
}

/// A prompt definition for prompts/list response.
#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    /// Unique prompt name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Accepted arguments.
    pub arguments: Vec<PromptArgument>,
}

/// Parameters for prompts/get request.
#[derive(Debug, Clone, Deserialize)]
pub struct PromptGetParams {
    /// Name of the prompt.
    pub name: String,
    /// Prompt arguments.
    #[serde(default)]
    pub arguments: HashMap<String, String>,
}

/// The MCP server for shadcn/ui component lookup.
pub struct McpServer<R = tokio::io::Stdin, W = tokio::io::Stdout> {
    service: ComponentService,
    reader: LineReader<R>,
    writer: LineWriter<W>,
}

impl McpServer {
    /// Creates a server speaking over stdin/stdout.
    #[must_use]
    pub fn new(service: ComponentService) -> Self {
        Self::with_io(service, LineReader::stdin(), LineWriter::stdout())
    }

    /// Runs the server until EOF or a termination signal.
    ///
    /// # Errors
    ///
    /// Returns an error if transport I/O fails.
    pub async fn run(self) -> io::Result<()> {
        tokio::select! {
            result = self.serve() => result,
            () = shutdown_signal() => Ok(()),
        }
    }
}

impl<R, W> McpServer<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    /// Creates a server over arbitrary byte streams.
    #[must_use]
    pub const fn with_io(
        service: ComponentService,
        reader: LineReader<R>,
        writer: LineWriter<W>,
    ) -> Self {
        Self {
            service,
            reader,
            writer,
        }
    }

    /// Serves requests until the input closes, then waits for in-flight
    /// replies to be written.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails.
    pub async fn serve(self) -> io::Result<()> {
        let Self {
            service,
            mut reader,
            writer,
        } = self;

        let (outbox, writer_task) = transport::spawn_writer(writer);
        let mut session = Session::new(service, outbox);

        while let Some(line) = reader.read_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            session.handle_line(&line);
        }

        session.shutdown();
        drop(session);
        writer_task.await.map_err(io::Error::other)?
    }
}

/// Completes when the process is asked to terminate.
#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let (Ok(mut sigint), Ok(mut sigterm)) = (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) else {
        tracing::warn!("Failed to install signal handlers; relying on EOF for shutdown");
        return std::future::pending().await;
    };

    tokio::select! {
        _ = sigint.recv() => tracing::info!("Received SIGINT, initiating graceful shutdown"),
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

/// Completes when the process is asked to terminate.
#[cfg(windows)]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received Ctrl+C, initiating graceful shutdown");
    } else {
        tracing::warn!("Failed to install Ctrl+C handler; relying on EOF for shutdown");
        std::future::pending::<()>().await;
    }
}

/// Per-connection protocol state.
pub struct Session {
    /// Current server state.
    state: ServerState,
    /// Negotiated protocol version (set after initialisation).
    protocol_version: Option<String>,
    /// Component lookups.
    service: ComponentService,
    /// Replies go here.
    outbox: Outbox,
}

impl Session {
    /// Creates a session that replies through `outbox`.
    #[must_use]
    pub const fn new(service: ComponentService, outbox: Outbox) -> Self {
        Self {
            state: ServerState::AwaitingInit,
            protocol_version: None,
            service,
            outbox,
        }
    }

    /// Returns the current server state.
    #[must_use]
    pub const fn state(&self) -> ServerState {
        self.state
    }

    /// Returns the negotiated protocol version, once initialised.
    #[must_use]
    pub fn protocol_version(&self) -> Option<&str> {
        self.protocol_version.as_deref()
    }

    /// Marks the session as finished. Replies still in flight are written.
    pub fn shutdown(&mut self) {
        if self.state != ServerState::ShuttingDown {
            tracing::info!("Input closed, finishing in-flight requests");
            self.state = ServerState::ShuttingDown;
        }
    }

    /// Handles a single line of input.
    pub fn handle_line(&mut self, line: &str) {
        use crate::mcp::protocol::parse_message;

        match parse_message(line) {
            Ok(msg) => {
                tracing::debug!(method = msg.method(), id = ?msg.id(), "Received message");
                match msg {
                    IncomingMessage::Request(req) => self.handle_request(req),
                    IncomingMessage::Notification(ref notif) => self.handle_notification(notif),
                }
            }
            Err(error) => send(&self.outbox, error),
        }
    }

    /// Handles an incoming request.
    fn handle_request(&mut self, req: JsonRpcRequest) {
        if self.state == ServerState::ShuttingDown {
            return send(
                &self.outbox,
                JsonRpcError::invalid_request_with(req.id, "Server shutting down"),
            );
        }

        let reply = match req.method.as_str() {
            "initialize" => self.handle_initialize(&req),
            "ping" => Ok(JsonRpcResponse::success(req.id.clone(), json!({}))),
            "tools/list" => self.handle_tools_list(&req),
            "tools/call" => return self.spawn_tools_call(&req),
            "resources/list" => return self.spawn_resources_list(&req),
            "resources/templates/list" => self.handle_resource_templates_list(&req),
            "resources/read" => return self.spawn_resources_read(&req),
            "prompts/list" => self.handle_prompts_list(&req),
            "prompts/get" => self.handle_prompts_get(&req),
            _ => Err(JsonRpcError::method_not_found(req.id.clone(), &req.method)),
        };

        send(&self.outbox, reply);
    }

    /// Handles an incoming notification.
    fn handle_notification(&mut self, notif: &JsonRpcNotification) {
        if notif.method == "notifications/initialized" && self.state == ServerState::Initialising {
            self.state = ServerState::Running;
            tracing::info!("Client initialised, session running");
        }
    }

    /// Handles the initialize request.
    fn handle_initialize(&mut self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        if self.state != ServerState::AwaitingInit {
            return Err(JsonRpcError::invalid_request_with(
                req.id.clone(),
                "Server already initialised",
            ));
        }

        let params: InitializeParams = req.parse_params("initialize")?;
        if let Some(client) = &params.client_info {
            tracing::info!(
                client = %client.name,
                client_version = client.version.as_deref().unwrap_or("unknown"),
                requested_version = %params.protocol_version,
                "Client connected"
            );
        }

        let negotiated_version = MCP_PROTOCOL_VERSION.to_string();

        self.protocol_version = Some(negotiated_version.clone());
        self.state = ServerState::Initialising;

        let result = json!({
            "protocolVersion": negotiated_version,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Ensures the server is in the Running state.
    fn require_running(&self, id: &RequestId) -> Result<(), JsonRpcError> {
        if self.state != ServerState::Running {
            return Err(JsonRpcError::invalid_request_with(
                id.clone(),
                "Server not initialised",
            ));
        }
        Ok(())
    }

    /// Runs `reply` on its own task.
    fn spawn_reply<F>(&self, reply: F)
    where
        F: std::future::Future<Output = Result<JsonRpcResponse, JsonRpcError>> + Send + 'static,
    {
        let outbox = self.outbox.clone();
        tokio::spawn(async move {
            send(&outbox, reply.await);
        });
    }

    /// Handles the tools/list request.
    fn handle_tools_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({
            "tools": get_tool_definitions(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the tools/call request.
    fn spawn_tools_call(&self, req: &JsonRpcRequest) {
        if let Err(error) = self.require_running(&req.id) {
            return send(&self.outbox, error);
        }
        let params: ToolCallParams = match req.parse_params("tool call") {
            Ok(params) => params,
            Err(error) => return send(&self.outbox, error),
        };

        let service = self.service.clone();
        let id = req.id.clone();
        self.spawn_reply(async move {
            let result = call_tool(&service, &params).await;
            let value = serde_json::to_value(&result).map_err(|e| {
                tracing::error!(error = %e, "Failed to serialise tool call result");
                JsonRpcError::internal_error(id.clone(), "Internal error: failed to serialise result")
            })?;
            Ok(JsonRpcResponse::success(id, value))
        });
    }

    /// Handles the resources/list request.
    fn spawn_resources_list(&self, req: &JsonRpcRequest) {
        if let Err(error) = self.require_running(&req.id) {
            return send(&self.outbox, error);
        }
        let service = self.service.clone();
        let id = req.id.clone();
        self.spawn_reply(async move {
            let resources = service.list_resources().await;
            Ok(JsonRpcResponse::success(id, json!({ "resources": resources })))
        });
    }

    /// Handles the resources/templates/list request.
    fn handle_resource_templates_list(
        &self,
        req: &JsonRpcRequest,
    ) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({
            "resourceTemplates": address::templates(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the resources/read request.
    ///
    /// Identifiers outside the address space are rejected before any fetch.
    fn spawn_resources_read(&self, req: &JsonRpcRequest) {
        if let Err(error) = self.require_running(&req.id) {
            return send(&self.outbox, error);
        }
        let uri = req
            .parse_params::<ResourceReadParams>("resources/read")
            .and_then(|params| {
                ComponentUri::parse(&params.uri)
                    .map_err(|e| JsonRpcError::invalid_params(req.id.clone(), e.to_string()))
            });
        let uri = match uri {
            Ok(uri) => uri,
            Err(error) => return send(&self.outbox, error),
        };

        let service = self.service.clone();
        let id = req.id.clone();
        self.spawn_reply(async move {
            let document = service.read_resource(&uri).await;
            let contents = ResourceContents {
                uri: uri.to_string(),
                mime_type: document.mime_type,
                text: document.text,
            };
            Ok(JsonRpcResponse::success(id, json!({ "contents": [contents] })))
        });
    }

    /// Handles the prompts/list request.
    fn handle_prompts_list(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let result = json!({
            "prompts": get_prompt_definitions(),
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }

    /// Handles the prompts/get request.
    fn handle_prompts_get(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, JsonRpcError> {
        self.require_running(&req.id)?;

        let params: PromptGetParams = req.parse_params("prompts/get")?;
        let kind: PromptKind = params
            .name
            .parse()
            .map_err(|e: String| JsonRpcError::invalid_params(req.id.clone(), e))?;
        let component = params.arguments.get("component").ok_or_else(|| {
            JsonRpcError::invalid_params(req.id.clone(), "Missing required argument: component")
        })?;

        let result = json!({
            "description": kind.description(),
            "messages": [{
                "role": "user",
                "content": {
                    "type": "text",
                    "text": kind.render(component),
                },
            }],
        });

        Ok(JsonRpcResponse::success(req.id.clone(), result))
    }
}

/// Queues a reply for the writer task.
fn send(outbox: &Outbox, message: impl Into<OutgoingMessage>) {
    let message = message.into();
    match transport::encode(&message) {
        Ok(line) => {
            // The writer only stops on a write error, which ends the server anyway
            if outbox.send(line).is_err() {
                tracing::warn!("Writer closed, dropping reply");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to serialise reply"),
    }
}

/// Dispatches a tool call.
async fn call_tool(service: &ComponentService, params: &ToolCallParams) -> ToolCallResult {
    match params.name.as_str() {
        "get-component-info" => call_get_component_info(service, &params.arguments).await,
        "list-components" => ToolCallResult::text(service.list_components_text().await),
        _ => ToolCallResult::error(format!("Unknown tool: {}", params.name)),
    }
}

/// Looks up one or all sections of a component.
async fn call_get_component_info(service: &ComponentService, arguments: &Value) -> ToolCallResult {
    let Some(component) = arguments.get("component").and_then(Value::as_str) else {
        return ToolCallResult::error("Missing required parameter: component");
    };
    let component = component.trim();
    if component.is_empty() {
        return ToolCallResult::error("Missing required parameter: component");
    }

    let selection =
        SectionSelection::from_argument(arguments.get("section").and_then(Value::as_str));

    ToolCallResult::text(service.component_info(component, selection).await)
}

/// Returns the list of available tools.
fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "get-component-info".to_string(),
            description: Some(
                "Get comprehensive information about any Shadcn/ui component: documentation \
                 summary, installation command, code examples and registry source. \
                 Use section to fetch a single part."
                    .to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "component": {
                        "type": "string",
                        "description": "Component slug (e.g., button, dialog, accordion, data-table)"
                    },
                    "section": {
                        "type": "string",
                        "enum": ["all", "documentation", "examples", "source", "installation"],
                        "description": "Which section of information to retrieve (default: all)"
                    }
                },
                "required": ["component"]
            }),
        },
        ToolDefinition {
            name: "list-components".to_string(),
            description: Some(
                "List all available Shadcn/ui components with their slugs and URLs.".to_string(),
            ),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Returns the list of available prompts.
fn get_prompt_definitions() -> Vec<PromptDefinition> {
    PromptKind::ALL
        .into_iter()
        .map(|kind| PromptDefinition {
            name: kind.name(),
            description: kind.description(),
            arguments: vec![PromptArgument {
                name: "component",
                description: "Component slug (e.g., button, dialog, accordion)",
                required: true,
            }],
        })
        .collect()
}
