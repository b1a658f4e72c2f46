//! Shared types used across troupe modules
//!
//! Contains the conversation turn structure, tool-call records, and tool
//! schema definitions.

use serde::{Deserialize, Serialize};

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One exchange unit in a conversation
///
/// `content` is `None` only for pure tool-invocation turns, where
/// `tool_calls` carries the requested calls instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    /// Role of the turn sender
    pub role: Role,
    /// Text content, absent for pure tool-invocation turns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Name of the agent that produced this turn
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Tool calls carried by this turn, in request order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRecord>,
}

impl ChatTurn {
    /// Create a new system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            from: None,
            tool_calls: Vec::new(),
        }
    }

    /// Create a new user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            from: None,
            tool_calls: Vec::new(),
        }
    }

    /// Create a new assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            from: None,
            tool_calls: Vec::new(),
        }
    }

    /// Create an assistant turn that only carries tool calls
    pub fn tool_only(tool_calls: Vec<ToolCallRecord>) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            from: None,
            tool_calls,
        }
    }

    /// Tag the turn with the originating agent name
    pub fn from_agent(mut self, name: impl Into<String>) -> Self {
        self.from = Some(name.into());
        self
    }

    /// Attach tool calls to the turn
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCallRecord>) -> Self {
        self.tool_calls = tool_calls;
        self
    }

    /// Text content of the turn, empty for pure tool-invocation turns
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}

/// A tool call requested by the completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Name of the function to invoke
    pub name: String,
    /// Structured JSON arguments for the call
    pub arguments: serde_json::Value,
    /// Textual result, filled after dispatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl ToolCallRecord {
    /// Create an unresolved tool call
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            arguments,
            result: None,
        }
    }

    /// Fill in the dispatch result
    pub fn resolved(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// Whether the call has been executed
    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }

    /// Get a string argument by key
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.arguments
            .get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }
}

/// Definition of a tool that an agent may request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Type of tool (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function details
    pub function: FunctionDefinition,
}

/// Function schema within a tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDefinition {
    /// Name of the function
    pub name: String,
    /// Description of what the function does
    pub description: String,
    /// JSON Schema for the parameters
    pub parameters: serde_json::Value,
}

impl ToolDefinition {
    /// Create a new function tool definition
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    /// Name of the underlying function
    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_constructors() {
        let turn = ChatTurn::user("hello").from_agent("tester");
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.text(), "hello");
        assert_eq!(turn.from.as_deref(), Some("tester"));
        assert!(turn.tool_calls.is_empty());
    }

    #[test]
    fn test_tool_only_turn_has_no_content() {
        let call = ToolCallRecord::new("concat_string", serde_json::json!({"strings": ["a"]}));
        let turn = ChatTurn::tool_only(vec![call]);
        assert!(turn.content.is_none());
        assert_eq!(turn.text(), "");
        assert_eq!(turn.tool_calls.len(), 1);
        assert!(!turn.tool_calls[0].is_resolved());
    }

    #[test]
    fn test_record_resolution() {
        let call =
            ToolCallRecord::new("upper_case", serde_json::json!({"input": "hi"})).resolved("HI");
        assert!(call.is_resolved());
        assert_eq!(call.result.as_deref(), Some("HI"));
        assert_eq!(call.get_string("input").as_deref(), Some("hi"));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Assistant.to_string(), "assistant");
        assert_eq!(Role::System.to_string(), "system");
    }
}
