//! Completion provider trait for abstracting chat-completion backends
//!
//! Agents talk to hosted APIs only through this seam, which also makes
//! scripted providers trivial to write in tests.

use async_trait::async_trait;

use crate::core::{ChatTurn, Result, ToolCallRecord, ToolDefinition};

/// Response from a completion provider
#[derive(Debug, Clone)]
pub struct Completion {
    /// Text content of the reply, absent for pure tool-call replies
    pub content: Option<String>,
    /// Tool calls the model wants to make
    pub tool_calls: Vec<ToolCallRecord>,
    /// Model that generated the response
    pub model: String,
    /// Token usage information
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Options for a completion request
#[derive(Debug, Clone, Default)]
pub struct CompletionOptions {
    /// Temperature for sampling (0.0 - 2.0)
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

/// Trait for chat-completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Produce one completion for an ordered sequence of turns
    ///
    /// `tools` is the set of function schemas the model may request;
    /// pass an empty slice for plain chat.
    async fn complete(
        &self,
        turns: &[ChatTurn],
        tools: &[ToolDefinition],
        options: &CompletionOptions,
    ) -> Result<Completion>;

    /// Get the provider name
    fn name(&self) -> &str;
}

impl Completion {
    /// Text content of the completion, empty when only tool calls came back
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }
}
