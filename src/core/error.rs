//! Custom error types for troupe
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for troupe operations
#[derive(Error, Debug)]
pub enum TroupeError {
    /// Configuration errors, the only class that may terminate the process
    #[error("Configuration error: {0}")]
    Config(String),

    /// Completion provider call failed
    #[error("Provider error: {0}")]
    Provider(String),

    /// Tool dispatch requested for a name nothing is registered under
    #[error("No tool registered under '{0}'")]
    ToolNotFound(String),

    /// A registered tool handler failed
    #[error("Tool dispatch error: {0}")]
    ToolDispatch(String),

    /// The tool bridge reported a server-side error for a call
    #[error("Tool call failed: {0}")]
    ToolCall(String),

    /// HTTP or serialization failure talking to the tool bridge
    #[error("Transport error: {0}")]
    Transport(String),

    /// Browser automation errors
    #[error("Browser error: {0}")]
    Browser(String),

    /// agent-browser not installed
    #[error("agent-browser not found. Install with: npm install -g agent-browser && agent-browser install")]
    AgentBrowserNotFound,

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for troupe operations
pub type Result<T> = std::result::Result<T, TroupeError>;

impl TroupeError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a tool dispatch error
    pub fn dispatch(msg: impl Into<String>) -> Self {
        Self::ToolDispatch(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a browser error
    pub fn browser(msg: impl Into<String>) -> Self {
        Self::Browser(msg.into())
    }

    /// Whether this error should abort the process rather than the turn
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_config_is_fatal() {
        assert!(TroupeError::config("missing key").is_fatal());
        assert!(!TroupeError::provider("boom").is_fatal());
        assert!(!TroupeError::ToolNotFound("nope".into()).is_fatal());
    }

    #[test]
    fn test_tool_not_found_message() {
        let err = TroupeError::ToolNotFound("create_issue".into());
        assert_eq!(err.to_string(), "No tool registered under 'create_issue'");
    }
}
