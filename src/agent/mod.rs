//! Agent module - agents, history, and orchestration
//!
//! Contains the chat agent abstraction, the provider-backed agent, the
//! browsing agent, conversation history, and the two orchestrators.

pub mod agent;
pub mod browser;
pub mod history;
pub mod pipeline;
pub mod round_robin;

use async_trait::async_trait;

use crate::core::{ChatTurn, Result};

pub use agent::{Agent, AgentBuilder};
pub use browser::BrowserAgent;
pub use history::History;
pub use pipeline::{HistoryMode, Pipeline};
pub use round_robin::{RotationState, RoundRobin};

/// A named participant in an orchestration run
///
/// Implementations produce exactly one reply turn per call and never
/// mutate the caller-supplied history; the caller appends the reply
/// itself.
#[async_trait]
pub trait ChatAgent: Send + Sync {
    /// Name of the agent, unique within an orchestration run
    fn name(&self) -> &str;

    /// Produce one reply turn for the given history
    async fn generate_reply(&self, history: &[ChatTurn]) -> Result<ChatTurn>;
}
