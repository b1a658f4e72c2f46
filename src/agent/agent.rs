//! Provider-backed agent
//!
//! Wraps a name, a system prompt, and a completion-provider binding, with
//! optional local tool dispatch.

use std::sync::Arc;

use async_trait::async_trait;

use crate::agent::ChatAgent;
use crate::core::{ChatTurn, Result, ToolCallRecord, ToolDefinition, TroupeError};
use crate::provider::{CompletionOptions, CompletionProvider};
use crate::tools::ToolRegistry;

/// An agent that turns a history of turns into one reply turn
pub struct Agent {
    /// Name, unique within an orchestration run
    name: String,
    /// System prompt, immutable after construction
    system_prompt: String,
    /// Completion provider binding
    provider: Arc<dyn CompletionProvider>,
    /// Function schemas this agent may request
    tool_contracts: Vec<ToolDefinition>,
    /// Local handlers; absent agents return unresolved tool calls
    tools: Option<Arc<ToolRegistry>>,
    /// Sampling options forwarded to the provider
    options: CompletionOptions,
}

/// Builder for creating Agents
pub struct AgentBuilder {
    name: String,
    system_prompt: Option<String>,
    provider: Option<Arc<dyn CompletionProvider>>,
    tool_contracts: Vec<ToolDefinition>,
    tools: Option<Arc<ToolRegistry>>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl AgentBuilder {
    /// Create a new builder with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt: None,
            provider: None,
            tool_contracts: Vec::new(),
            tools: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the system prompt
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the completion provider
    pub fn provider(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Expose explicit tool contracts without local handlers
    ///
    /// Requested calls come back unresolved for the caller to execute.
    pub fn tool_contracts(mut self, contracts: Vec<ToolDefinition>) -> Self {
        self.tool_contracts = contracts;
        self
    }

    /// Attach a registry of local handlers
    ///
    /// The registry's definitions become the agent's tool contracts
    /// unless explicit contracts were set.
    pub fn tools(mut self, tools: Arc<ToolRegistry>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the completion length
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Build the Agent
    ///
    /// Fails with a configuration error when no provider was supplied;
    /// missing credentials surface here, at construction, not per call.
    pub fn build(self) -> Result<Agent> {
        let provider = self.provider.ok_or_else(|| {
            TroupeError::config(format!(
                "Agent '{}' requires a completion provider",
                self.name
            ))
        })?;

        let tool_contracts = if self.tool_contracts.is_empty() {
            self.tools
                .as_ref()
                .map(|t| t.definitions())
                .unwrap_or_default()
        } else {
            self.tool_contracts
        };

        Ok(Agent {
            name: self.name.clone(),
            system_prompt: self
                .system_prompt
                .unwrap_or_else(|| "You are a helpful AI assistant.".to_string()),
            provider,
            tool_contracts,
            tools: self.tools,
            options: CompletionOptions {
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            },
        })
    }
}

impl Agent {
    /// Create an agent with a name, system prompt, and provider
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            provider,
            tool_contracts: Vec::new(),
            tools: None,
            options: CompletionOptions::default(),
        }
    }

    /// Create a builder for more control
    pub fn builder(name: impl Into<String>) -> AgentBuilder {
        AgentBuilder::new(name)
    }

    /// The agent's system prompt
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Resolve every requested call through the local registry
    ///
    /// Dispatch failures are formatted into the textual result rather
    /// than propagated, so one bad call never aborts the turn.
    async fn resolve_tool_calls(
        &self,
        registry: &ToolRegistry,
        calls: Vec<ToolCallRecord>,
    ) -> Vec<ToolCallRecord> {
        let mut resolved = Vec::with_capacity(calls.len());

        for call in calls {
            let text = match registry.dispatch(&call.name, call.arguments.clone()).await {
                Ok(output) => output,
                Err(e) => format!("Error calling tool {}: {}", call.name, e),
            };
            resolved.push(call.resolved(text));
        }

        resolved
    }
}

#[async_trait]
impl ChatAgent for Agent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_reply(&self, history: &[ChatTurn]) -> Result<ChatTurn> {
        let mut turns = Vec::with_capacity(history.len() + 1);
        turns.push(ChatTurn::system(&self.system_prompt));
        turns.extend_from_slice(history);

        let completion = self
            .provider
            .complete(&turns, &self.tool_contracts, &self.options)
            .await?;

        if completion.tool_calls.is_empty() {
            return Ok(ChatTurn::assistant(completion.text()).from_agent(&self.name));
        }

        let tool_calls = match &self.tools {
            Some(registry) => {
                self.resolve_tool_calls(registry, completion.tool_calls)
                    .await
            }
            // No local handlers: the caller receives the unresolved calls
            None => completion.tool_calls,
        };

        // Resolved results become the visible content when the model
        // produced none of its own
        let content = match completion.content {
            Some(c) if !c.is_empty() => Some(c),
            _ => {
                let results: Vec<&str> = tool_calls
                    .iter()
                    .filter_map(|c| c.result.as_deref())
                    .collect();
                if results.is_empty() {
                    None
                } else {
                    Some(results.join("\n"))
                }
            }
        };

        let turn = match content {
            Some(c) => ChatTurn::assistant(c),
            None => ChatTurn::tool_only(Vec::new()),
        };

        Ok(turn.with_tool_calls(tool_calls).from_agent(&self.name))
    }
}
