//! Interactive chat REPL
//!
//! Single-agent conversation loop with local tools and bounded history.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::agent::{Agent, ChatAgent, History};
use crate::core::{ChatTurn, Config, Result};
use crate::provider::OpenAiClient;
use crate::tools::{register_text_tools, ToolRegistry};

/// Sentinel tokens that end an interactive session, case-insensitive
const EXIT_TOKENS: &[&str] = &["quit", "exit", "bye"];

/// Whether the input ends the session
pub fn is_exit_token(input: &str) -> bool {
    let token = input.trim().to_lowercase();
    EXIT_TOKENS.contains(&token.as_str())
}

/// Interactive chat session
pub struct Repl {
    agent: Agent,
    history: History,
}

impl Repl {
    /// Create a REPL from configuration
    ///
    /// Fails with a configuration error when the API key is absent.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = Arc::new(OpenAiClient::from_config(config)?);

        let mut registry = ToolRegistry::new();
        register_text_tools(&mut registry);

        let agent = Agent::builder("Assistant")
            .system_prompt(
                "You are a helpful AI assistant. Use the available tools when they fit the request.",
            )
            .provider(provider)
            .tools(Arc::new(registry))
            .temperature(config.provider.temperature)
            .build()?;

        Ok(Self {
            agent,
            history: History::new(config.agent.max_history),
        })
    }

    /// Process one message, threading the bounded history
    pub async fn process(&mut self, input: &str) -> Result<String> {
        self.history.push(ChatTurn::user(input));

        let reply = self.agent.generate_reply(&self.history.snapshot()).await?;
        let text = reply.text().to_string();
        self.history.push(reply);

        Ok(text)
    }

    /// Run the interactive loop until an exit sentinel or EOF
    ///
    /// Provider errors are printed and the loop continues; only the
    /// caller-level configuration check ends the process.
    pub async fn run(&mut self) -> Result<()> {
        println!("Chat with the assistant. Type 'quit', 'exit', or 'bye' to leave.\n");

        let stdin = io::stdin();
        let mut stdout = io::stdout();

        loop {
            print!("You: ");
            stdout.flush()?;

            let mut input = String::new();
            match stdin.lock().read_line(&mut input) {
                Ok(0) => {
                    println!("\nGoodbye!");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    eprintln!("Error reading input: {}", e);
                    continue;
                }
            }

            let input = input.trim();
            if input.is_empty() {
                continue;
            }

            if is_exit_token(input) {
                println!("Goodbye!");
                break;
            }

            match self.process(input).await {
                Ok(response) => println!("\nAssistant: {}\n", response),
                Err(e) => eprintln!("\nError: {}\n", e),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_tokens_case_insensitive() {
        assert!(is_exit_token("quit"));
        assert!(is_exit_token("EXIT"));
        assert!(is_exit_token("  Bye  "));
        assert!(!is_exit_token("goodbye"));
        assert!(!is_exit_token(""));
    }
}
