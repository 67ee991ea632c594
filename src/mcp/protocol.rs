//! JSON-RPC 2.0 envelopes exchanged with MCP clients.
//!
//! Incoming lines decode into an [`IncomingMessage`]: a request when an `id`
//! is present, otherwise a notification. Everything the server writes back is
//! an [`OutgoingMessage`], either a result or an error object.
//!
//! MCP narrows JSON-RPC slightly: ids are strings or integers, never `null`.
//! Replies may leave in any order because clients pair them by `id`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The MCP protocol version this server speaks.
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "shadcn-ui-mcp";

const JSONRPC_VERSION: &str = "2.0";

/// Identifier pairing a request with its reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    /// Integer id.
    Number(i64),
    /// String id.
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

/// A call that expects a reply.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol marker, always `"2.0"` once parsed.
    pub jsonrpc: String,
    /// Reply correlation id.
    pub id: RequestId,
    /// Method name, e.g. `resources/read`.
    pub method: String,
    /// Method arguments, if any.
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Decodes the `params` member into `T`.
    ///
    /// `what` names the request in the error message.
    ///
    /// # Errors
    ///
    /// Returns an invalid params error when `params` is absent or does not
    /// match `T`.
    pub fn parse_params<T: DeserializeOwned>(&self, what: &str) -> Result<T, JsonRpcError> {
        let Some(params) = self.params.clone() else {
            return Err(JsonRpcError::invalid_params(
                self.id.clone(),
                format!("Missing {what} params"),
            ));
        };

        serde_json::from_value(params).map_err(|e| {
            JsonRpcError::invalid_params(self.id.clone(), format!("Invalid {what} params: {e}"))
        })
    }
}

/// A one-way message from the client. Never answered.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcNotification {
    /// Protocol marker.
    pub jsonrpc: String,
    /// Notification name, e.g. `notifications/initialized`.
    pub method: String,
    /// Notification payload, if any.
    #[serde(default)]
    pub params: Option<Value>,
}

/// A successful reply.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    /// Protocol marker.
    pub jsonrpc: &'static str,
    /// Id of the request being answered.
    pub id: RequestId,
    /// Method result.
    pub result: Value,
}

impl JsonRpcResponse {
    /// Wraps `result` as the reply to `id`.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Value is not const-compatible
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        }
    }
}

/// The JSON-RPC error codes this server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    /// The line was not a JSON object.
    ParseError = -32700,
    /// The object was not a well-formed request or notification, or the
    /// session state does not allow it.
    InvalidRequest = -32600,
    /// No handler for the method.
    MethodNotFound = -32601,
    /// Parameters missing, mistyped or outside the address space.
    InvalidParams = -32602,
    /// The server failed to build a reply.
    InternalError = -32603,
}

impl ErrorCode {
    /// Numeric value sent on the wire.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Message used when the caller supplies none.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::ParseError => "Parse error",
            Self::InvalidRequest => "Invalid Request",
            Self::MethodNotFound => "Method not found",
            Self::InvalidParams => "Invalid params",
            Self::InternalError => "Internal error",
        }
    }
}

/// The `error` member of an error reply.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorObject {
    /// Numeric code, see [`ErrorCode`].
    pub code: i32,
    /// Human-readable message.
    pub message: String,
}

/// An error reply.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    /// Protocol marker.
    pub jsonrpc: &'static str,
    /// Id of the failed request. Absent when it could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    /// Code and message.
    pub error: ErrorObject,
}

impl JsonRpcError {
    fn build(id: Option<RequestId>, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            error: ErrorObject {
                code: code.code(),
                message: message.into(),
            },
        }
    }

    /// The line could not be decoded; no id is known.
    #[must_use]
    pub fn parse_error() -> Self {
        Self::build(None, ErrorCode::ParseError, ErrorCode::ParseError.default_message())
    }

    /// The message is not a valid JSON-RPC 2.0 request.
    #[must_use]
    pub fn invalid_request(id: Option<RequestId>) -> Self {
        Self::build(
            id,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidRequest.default_message(),
        )
    }

    /// The request is well formed but not allowed right now.
    #[must_use]
    pub fn invalid_request_with(id: RequestId, message: impl Into<String>) -> Self {
        Self::build(Some(id), ErrorCode::InvalidRequest, message)
    }

    /// No handler exists for `method`.
    #[must_use]
    pub fn method_not_found(id: RequestId, method: &str) -> Self {
        Self::build(
            Some(id),
            ErrorCode::MethodNotFound,
            format!("Method not found: {method}"),
        )
    }

    /// The parameters were rejected.
    #[must_use]
    pub fn invalid_params(id: RequestId, message: impl Into<String>) -> Self {
        Self::build(Some(id), ErrorCode::InvalidParams, message)
    }

    /// The server could not produce a reply.
    #[must_use]
    pub fn internal_error(id: RequestId, message: impl Into<String>) -> Self {
        Self::build(Some(id), ErrorCode::InternalError, message)
    }
}

/// Anything the server writes to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutgoingMessage {
    /// A successful reply.
    Response(JsonRpcResponse),
    /// An error reply.
    Error(JsonRpcError),
}

impl From<JsonRpcResponse> for OutgoingMessage {
    fn from(response: JsonRpcResponse) -> Self {
        Self::Response(response)
    }
}

impl From<JsonRpcError> for OutgoingMessage {
    fn from(error: JsonRpcError) -> Self {
        Self::Error(error)
    }
}

impl From<Result<JsonRpcResponse, JsonRpcError>> for OutgoingMessage {
    fn from(reply: Result<JsonRpcResponse, JsonRpcError>) -> Self {
        reply.map_or_else(Self::Error, Self::Response)
    }
}

/// A decoded client message.
#[derive(Debug, Clone)]
pub enum IncomingMessage {
    /// Expects a reply.
    Request(JsonRpcRequest),
    /// Fire and forget.
    Notification(JsonRpcNotification),
}

impl IncomingMessage {
    /// Method name of either kind.
    #[must_use]
    pub fn method(&self) -> &str {
        match self {
            Self::Request(req) => &req.method,
            Self::Notification(notif) => &notif.method,
        }
    }

    /// Request id, or `None` for notifications.
    #[must_use]
    pub const fn id(&self) -> Option<&RequestId> {
        match self {
            Self::Request(req) => Some(&req.id),
            Self::Notification(_) => None,
        }
    }
}

/// Decodes one line from the client.
///
/// # Errors
///
/// Returns a parse error for anything that is not a JSON object, and an
/// invalid request error for objects that are not JSON-RPC 2.0 messages.
/// The request id is echoed back whenever it could be read.
pub fn parse_message(line: &str) -> Result<IncomingMessage, JsonRpcError> {
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(line) else {
        return Err(JsonRpcError::parse_error());
    };

    if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return Err(JsonRpcError::invalid_request(None));
    }

    if object.contains_key("id") {
        decode::<JsonRpcRequest>(object).and_then(|request| {
            if request.method.is_empty() {
                Err(JsonRpcError::invalid_request(Some(request.id)))
            } else {
                Ok(IncomingMessage::Request(request))
            }
        })
    } else {
        decode::<JsonRpcNotification>(object).map(IncomingMessage::Notification)
    }
}

fn decode<T: DeserializeOwned>(object: Map<String, Value>) -> Result<T, JsonRpcError> {
    serde_json::from_value(Value::Object(object)).map_err(|_| JsonRpcError::invalid_request(None))
}
