//! Bridge module - client for external MCP tool servers
//!
//! A JSON-RPC request/response bridge exposing initialize, list, and call
//! operations, plus the GitHub operation catalogue.

pub mod client;
pub mod github;

pub use client::{BridgeTool, ToolBridge};
pub use github::{is_valid_operation, AVAILABLE_OPERATIONS};
