//! shadcn-ui-mcp: MCP server for shadcn/ui component information
//!
//! This library answers questions about shadcn/ui components by fetching the
//! public documentation site and component registry on demand.
//!
//! # Architecture
//!
//! Every component exposes four sections, each addressable as
//! `shadcn://component/{slug}/{section}`:
//!
//! - **documentation**: Description scraped from the component page
//! - **examples**: Code blocks from the same page
//! - **source**: The primary registry file
//! - **installation**: CLI command and manual steps
//!
//! Nothing is cached. An unreachable upstream degrades one section into a
//! "not found" message without failing the request.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading and validation
//! - [`error`] — Error types
//! - [`mcp`] — MCP protocol implementation
//! - [`shadcn`] — Fetching, extraction, addressing and rendering

pub mod config;
pub mod error;
pub mod mcp;
pub mod shadcn;
