//! OpenAI-compatible chat-completions client
//!
//! Async HTTP client for any endpoint speaking the OpenAI chat wire
//! format (OpenAI, Azure-hosted deployments, local gateways).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{ChatTurn, Config, Result, ToolCallRecord, ToolDefinition, TroupeError};
use crate::provider::traits::{Completion, CompletionOptions, CompletionProvider, TokenUsage};

/// Chat-completions API client
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    debug: bool,
}

/// Chat request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolDefinition]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Wire message format
#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
}

/// Wire tool call format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiToolCall {
    #[serde(default)]
    id: Option<String>,
    function: ApiFunction,
}

/// Function within a wire tool call; arguments arrive as a JSON string
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

/// Chat response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    model: String,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl OpenAiClient {
    /// Create a client from configuration
    ///
    /// Fails with a configuration error when no API key is present.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.provider.timeout_secs))
            .build()
            .map_err(|e| TroupeError::provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.provider.base_url.trim_end_matches('/').to_string(),
            api_key,
            model: config.provider.model.clone(),
            debug: config.agent.debug,
        })
    }

    /// Create a client with an explicit base URL, key, and model
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| TroupeError::provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            debug: false,
        })
    }

    /// The model-agnostic completions endpoint
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Convert an internal turn to the wire format
    fn to_api_message(turn: &ChatTurn) -> ApiMessage {
        ApiMessage {
            role: turn.role.to_string(),
            content: turn.content.clone(),
            tool_calls: if turn.tool_calls.is_empty() {
                None
            } else {
                Some(
                    turn.tool_calls
                        .iter()
                        .map(|tc| ApiToolCall {
                            id: None,
                            function: ApiFunction {
                                name: tc.name.clone(),
                                arguments: tc.arguments.to_string(),
                            },
                        })
                        .collect(),
                )
            },
        }
    }

    /// Map a wire response to a Completion
    fn to_completion(response: ChatResponse) -> Result<Completion> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| TroupeError::provider("Response contained no choices"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| {
                // The wire format carries arguments as a JSON string
                let arguments = serde_json::from_str(&tc.function.arguments)
                    .unwrap_or(serde_json::Value::String(tc.function.arguments.clone()));
                ToolCallRecord::new(tc.function.name, arguments)
            })
            .collect();

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(Completion {
            content: choice.message.content,
            tool_calls,
            model: response.model,
            usage,
        })
    }

    /// Debug print if enabled
    fn debug_print(&self, label: &str, content: &str) {
        if self.debug {
            if content.chars().count() > 500 {
                let shown: String = content.chars().take(500).collect();
                eprintln!("DEBUG {}: {}...", label, shown);
            } else {
                eprintln!("DEBUG {}: {}", label, content);
            }
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        tools: &[ToolDefinition],
        options: &CompletionOptions,
    ) -> Result<Completion> {
        let messages: Vec<ApiMessage> = turns.iter().map(Self::to_api_message).collect();

        let request = ChatRequest {
            model: &self.model,
            messages,
            tools: if tools.is_empty() { None } else { Some(tools) },
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let request_json = serde_json::to_string(&request)?;
        self.debug_print("Request", &request_json);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    TroupeError::provider(format!(
                        "Cannot connect to completion endpoint at {}",
                        self.base_url
                    ))
                } else {
                    TroupeError::from(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TroupeError::provider(format!(
                "Completion API error ({}): {}",
                status, error_text
            )));
        }

        let response_text = response.text().await?;
        self.debug_print("Response", &response_text);

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| TroupeError::provider(format!("Failed to parse response: {}", e)))?;

        Self::to_completion(chat_response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_conversion() {
        let turn = ChatTurn::user("Hello");
        let msg = OpenAiClient::to_api_message(&turn);
        assert_eq!(msg.role, "user");
        assert_eq!(msg.content.as_deref(), Some("Hello"));
        assert!(msg.tool_calls.is_none());
    }

    #[test]
    fn test_tool_call_arguments_parsed_from_string() {
        let raw = r#"{
            "model": "gpt-4o-mini",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "function": {"name": "upper_case", "arguments": "{\"input\": \"hi\"}"}
                    }]
                }
            }]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        let completion = OpenAiClient::to_completion(parsed).unwrap();

        assert!(completion.content.is_none());
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].name, "upper_case");
        assert_eq!(
            completion.tool_calls[0].arguments["input"],
            serde_json::json!("hi")
        );
    }

    #[test]
    fn test_empty_choices_is_provider_error() {
        let raw = r#"{"model": "gpt-4o-mini", "choices": []}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(OpenAiClient::to_completion(parsed).is_err());
    }
}
