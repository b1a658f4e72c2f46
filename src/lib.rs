//! Troupe - Multi-Agent Orchestration Toolkit
//!
//! A small toolkit for composing LLM-backed agents into multi-agent
//! workflows: sequential pipelines, round-robin group chats, local tool
//! calling, web browsing, and a JSON-RPC bridge to MCP tool servers.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **Provider**: Completion provider abstraction with an OpenAI-compatible client
//! - **Agent**: Chat agents, history, and the two orchestrators
//! - **Tools**: Tool registry, text tools, and the browser session
//! - **Bridge**: JSON-RPC client for external MCP tool servers
//! - **CLI**: Interactive menu, chat REPL, and demo scenarios
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use troupe::agent::Agent;
//! use troupe::core::Config;
//! use troupe::provider::OpenAiClient;
//!
//! #[tokio::main]
//! async fn main() -> troupe::Result<()> {
//!     let config = Config::load();
//!     let provider = Arc::new(OpenAiClient::from_config(&config)?);
//!
//!     let agent = Agent::new("Assistant", "You are a helpful AI assistant.", provider);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod bridge;
pub mod cli;
pub mod core;
pub mod provider;
pub mod tools;

// Re-export commonly used items
pub use agent::{Agent, ChatAgent, Pipeline, RoundRobin};
pub use bridge::ToolBridge;
pub use cli::Repl;
pub use core::{ChatTurn, Config, Result, TroupeError};
pub use tools::ToolRegistry;
