//! crmbridge MCP (Model Context Protocol) server
//!
//! Exposes a [`crmbridge_registry::ToolRegistry`] as MCP tools over
//! newline-delimited JSON-RPC 2.0 on stdio.

pub mod error;
pub mod governance;
pub mod jsonrpc;
pub mod mcp;
pub mod server;

pub use error::{McpError, McpResult};
pub use governance::GovernanceConfig;
pub use server::{serve_stdio, McpServer, ServerInfo};
