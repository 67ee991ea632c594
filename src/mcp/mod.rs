//! Model Context Protocol (MCP) server implementation.
//!
//! This module exposes shadcn/ui component lookups as MCP tools, resources
//! and prompts. The server communicates over stdio using newline-delimited
//! JSON-RPC 2.0 messages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          MCP Server                          │
//! │                                                              │
//! │   ┌────────────┐    ┌─────────────┐    ┌──────────────────┐  │
//! │   │ LineReader │───▶│   Session   │───▶│ ComponentService │  │
//! │   │  (stdin)   │    │ (lifecycle) │    │  (spawned tasks) │  │
//! │   └────────────┘    └─────────────┘    └──────────────────┘  │
//! │                            │                    │            │
//! │                            ▼                    ▼            │
//! │                    ┌─────────────────────────────────┐       │
//! │                    │   Outbox ──▶ writer task (stdout)│       │
//! │                    └─────────────────────────────────┘       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod protocol;
pub mod server;
pub mod transport;

pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use server::{McpServer, ServerState, Session};
pub use transport::{LineReader, LineWriter, Outbox};
