//! Tool bridge - JSON-RPC client for MCP servers
//!
//! Request/response bridge to an external tool-execution service. One
//! HTTP POST per invocation, no retries, no session state.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

use crate::core::{Result, TroupeError};

/// Protocol version sent in the initialize handshake
const PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC client for a single MCP server
pub struct ToolBridge {
    client: Client,
    base_url: String,
}

/// JSON-RPC request envelope
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: String,
    method: &'a str,
    params: serde_json::Value,
}

/// JSON-RPC response envelope; success means `error` is null
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    #[allow(dead_code)]
    jsonrpc: String,
    #[serde(default)]
    #[allow(dead_code)]
    id: String,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Outcome of one bridge exchange, transport failures included
#[derive(Debug)]
struct Exchange {
    result: Option<serde_json::Value>,
    error: Option<String>,
}

impl Exchange {
    fn success(&self) -> bool {
        self.error.is_none()
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
        }
    }
}

/// A tool advertised by the bridge server
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeTool {
    /// Tool name
    pub name: String,
    /// Human-readable description
    #[serde(default)]
    pub description: String,
    /// JSON Schema of the tool's input
    #[serde(rename = "inputSchema", default)]
    pub input_schema: Option<serde_json::Value>,
}

impl ToolBridge {
    /// Create a bridge for the given MCP server base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint all requests are posted to
    fn endpoint(&self) -> String {
        format!("{}/mcp", self.base_url)
    }

    /// Send one request, converting transport failures into a failed
    /// exchange rather than an error
    async fn send(&self, method: &str, params: serde_json::Value) -> Exchange {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: Uuid::new_v4().to_string(),
            method,
            params,
        };

        let response = match self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Exchange::failed(e.to_string()),
        };

        if !response.status().is_success() {
            return Exchange::failed(format!("HTTP {}", response.status()));
        }

        match response.json::<RpcResponse>().await {
            Ok(rpc) => Exchange {
                result: rpc.result,
                error: rpc.error,
            },
            Err(e) => Exchange::failed(format!("Invalid response format: {}", e)),
        }
    }

    /// Send the capabilities handshake
    ///
    /// Returns whether the server accepted it. The result is advisory;
    /// subsequent calls are not blocked by a failed or skipped handshake.
    pub async fn initialize(&self) -> bool {
        let params = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "clientInfo": {
                "name": "troupe",
                "version": env!("CARGO_PKG_VERSION")
            }
        });

        self.send("initialize", params).await.success()
    }

    /// List the tools the server exposes
    ///
    /// Never fails: any transport, protocol, or deserialization problem
    /// yields an empty list.
    pub async fn list_tools(&self) -> Vec<BridgeTool> {
        let exchange = self.send("tools/list", serde_json::json!({})).await;

        match (exchange.success(), exchange.result) {
            (true, Some(result)) => {
                serde_json::from_value(result).unwrap_or_default()
            }
            _ => Vec::new(),
        }
    }

    /// Call a named tool with structured arguments
    ///
    /// On success returns the raw result payload; a JSON string result is
    /// returned as the literal string. A server-reported error fails with
    /// `ToolCall` carrying that exact text.
    pub async fn call_tool(&self, name: &str, arguments: serde_json::Value) -> Result<String> {
        let params = serde_json::json!({
            "name": name,
            "arguments": arguments
        });

        let exchange = self.send("tools/call", params).await;

        if let Some(error) = exchange.error {
            return Err(TroupeError::ToolCall(error));
        }

        Ok(match exchange.result {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => "Tool executed successfully".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let bridge = ToolBridge::new("http://localhost:3000/");
        assert_eq!(bridge.endpoint(), "http://localhost:3000/mcp");
    }

    #[test]
    fn test_bridge_tool_deserialization() {
        let raw = r#"[
            {"name": "create_issue", "description": "Create an issue", "inputSchema": {"type": "object"}},
            {"name": "list_issues"}
        ]"#;
        let tools: Vec<BridgeTool> = serde_json::from_str(raw).unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "create_issue");
        assert!(tools[0].input_schema.is_some());
        assert!(tools[1].description.is_empty());
    }

    #[tokio::test]
    async fn test_list_tools_on_unreachable_server_is_empty() {
        // Nothing listens on this port
        let bridge = ToolBridge::new("http://127.0.0.1:1");
        assert!(bridge.list_tools().await.is_empty());
    }

    #[tokio::test]
    async fn test_call_tool_on_unreachable_server_fails() {
        let bridge = ToolBridge::new("http://127.0.0.1:1");
        let err = bridge
            .call_tool("create_issue", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, TroupeError::ToolCall(_)));
    }
}
