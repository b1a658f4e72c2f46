//! Tool registry - manages and dispatches tool calls
//!
//! Central hub mapping function names to schemas and local handlers.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::core::{Result, ToolDefinition, TroupeError};

/// Handler bound to a registered tool
///
/// Takes the structured JSON arguments and produces a textual result.
pub type ToolHandler =
    Arc<dyn Fn(serde_json::Value) -> BoxFuture<'static, Result<String>> + Send + Sync>;

struct RegisteredTool {
    definition: ToolDefinition,
    handler: ToolHandler,
}

/// Registry of locally-executable tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool with an async handler
    ///
    /// Re-registering a name replaces the previous entry.
    pub fn register(&mut self, definition: ToolDefinition, handler: ToolHandler) {
        let name = definition.name().to_string();
        self.tools.insert(
            name,
            RegisteredTool {
                definition,
                handler,
            },
        );
    }

    /// Register a tool with a synchronous handler
    pub fn register_fn<F>(&mut self, definition: ToolDefinition, f: F)
    where
        F: Fn(serde_json::Value) -> Result<String> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        self.register(
            definition,
            Arc::new(move |args| {
                let f = f.clone();
                Box::pin(async move { f(args) })
            }),
        );
    }

    /// Whether a tool is registered under the given name
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// All registered tool definitions
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition.clone()).collect()
    }

    /// Execute the tool registered under `name` with the given arguments
    ///
    /// An unregistered name fails with `ToolNotFound` without invoking
    /// any handler.
    pub async fn dispatch(&self, name: &str, arguments: serde_json::Value) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| TroupeError::ToolNotFound(name.to_string()))?;

        (tool.handler)(arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn echo_definition(name: &str) -> ToolDefinition {
        ToolDefinition::function(
            name,
            "Echo the input argument",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string", "description": "Text to echo"}
                },
                "required": ["input"]
            }),
        )
    }

    #[tokio::test]
    async fn test_dispatch_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register_fn(echo_definition("echo"), |args| {
            Ok(args["input"].as_str().unwrap_or("").to_string())
        });

        let result = registry
            .dispatch("echo", serde_json::json!({"input": "hello"}))
            .await
            .unwrap();
        assert_eq!(result, "hello");
    }

    #[tokio::test]
    async fn test_dispatch_unknown_name_never_invokes_handler() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let mut registry = ToolRegistry::new();
        registry.register_fn(echo_definition("echo"), |_| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        });

        let err = registry
            .dispatch("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, TroupeError::ToolNotFound(ref n) if n == "missing"));
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_propagates_as_dispatch_error() {
        let mut registry = ToolRegistry::new();
        registry.register_fn(echo_definition("broken"), |_| {
            Err(TroupeError::dispatch("handler blew up"))
        });

        let err = registry
            .dispatch("broken", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("handler blew up"));
    }

    #[test]
    fn test_definitions_listing() {
        let mut registry = ToolRegistry::new();
        registry.register_fn(echo_definition("a"), |_| Ok(String::new()));
        registry.register_fn(echo_definition("b"), |_| Ok(String::new()));

        let mut names: Vec<String> = registry
            .definitions()
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["a", "b"]);
        assert!(registry.contains("a"));
        assert!(!registry.contains("c"));
    }
}
