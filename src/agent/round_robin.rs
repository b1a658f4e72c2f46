//! Round-robin orchestrator
//!
//! Rotates through a group of agents, feeding each reply's content to the
//! next agent. The rotation cursor is a value threaded through the loop,
//! so concurrent runs over the same group never interfere.

use std::sync::Arc;

use crate::agent::ChatAgent;
use crate::core::{ChatTurn, Result};

/// Predicate over the latest reply that ends a run early
pub type TerminationPredicate = Box<dyn Fn(&ChatTurn) -> bool + Send + Sync>;

/// Rotation position, advanced modulo the group size after every turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RotationState {
    /// Index of the agent to dispatch next
    pub cursor: usize,
    /// Turns taken so far in this run
    pub turns_taken: usize,
}

impl RotationState {
    /// Advance to the next agent
    pub fn advance(self, group_size: usize) -> Self {
        Self {
            cursor: (self.cursor + 1) % group_size,
            turns_taken: self.turns_taken + 1,
        }
    }
}

/// A rotating group chat over a fixed list of agents
pub struct RoundRobin {
    agents: Vec<Arc<dyn ChatAgent>>,
    max_turns: usize,
    until: Option<TerminationPredicate>,
}

impl RoundRobin {
    /// Create a group that runs exactly one full rotation
    pub fn new(agents: Vec<Arc<dyn ChatAgent>>) -> Self {
        let max_turns = agents.len();
        Self {
            agents,
            max_turns,
            until: None,
        }
    }

    /// Set an explicit turn budget
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// End the run early once the predicate matches the latest reply
    pub fn until(mut self, predicate: TerminationPredicate) -> Self {
        self.until = Some(predicate);
        self
    }

    /// Number of participating agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the group has no agents
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Run the rotation from a seed message
    ///
    /// Each agent receives the previous reply's content as its sole input
    /// turn. Returns the `"Agent {n}: {content}"` lines joined with
    /// `---` separators, in execution order. An empty group produces an
    /// empty transcript.
    pub async fn run(&self, seed: &str) -> Result<String> {
        if self.agents.is_empty() {
            return Ok(String::new());
        }

        let mut state = RotationState::default();
        let mut current = seed.to_string();
        let mut lines = Vec::new();

        while state.turns_taken < self.max_turns {
            let agent = &self.agents[state.cursor];
            let reply = agent.generate_reply(&[ChatTurn::user(&current)]).await?;
            let content = reply.text().to_string();

            lines.push(format!("Agent {}: {}", state.cursor + 1, content));
            state = state.advance(self.agents.len());
            current = content;

            if let Some(predicate) = &self.until {
                if predicate(&reply) {
                    break;
                }
            }
        }

        Ok(lines.join("\n---\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic agent that appends its tag to the incoming message
    struct EchoAgent {
        name: String,
        tag: String,
    }

    impl EchoAgent {
        fn new(name: &str, tag: &str) -> Arc<dyn ChatAgent> {
            Arc::new(Self {
                name: name.to_string(),
                tag: tag.to_string(),
            })
        }
    }

    #[async_trait]
    impl ChatAgent for EchoAgent {
        fn name(&self) -> &str {
            &self.name
        }

        async fn generate_reply(&self, history: &[ChatTurn]) -> Result<ChatTurn> {
            let input = history.last().map(|t| t.text()).unwrap_or("");
            Ok(ChatTurn::assistant(format!("{}-{}", input, self.tag)).from_agent(&self.name))
        }
    }

    #[test]
    fn test_rotation_state_wraps() {
        let state = RotationState::default();
        let state = state.advance(3);
        assert_eq!(state.cursor, 1);
        let state = state.advance(3).advance(3);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.turns_taken, 3);
    }

    #[tokio::test]
    async fn test_two_agent_transcript() {
        let group = RoundRobin::new(vec![EchoAgent::new("first", "1"), EchoAgent::new("second", "2")]);

        let transcript = group.run("hello").await.unwrap();
        assert_eq!(transcript, "Agent 1: hello-1\n---\nAgent 2: hello-1-2");
    }

    #[tokio::test]
    async fn test_one_full_rotation_by_default() {
        let group = RoundRobin::new(vec![
            EchoAgent::new("a", "x"),
            EchoAgent::new("b", "y"),
            EchoAgent::new("c", "z"),
        ]);

        let transcript = group.run("go").await.unwrap();
        let turns: Vec<&str> = transcript.split("\n---\n").collect();
        assert_eq!(turns.len(), group.len());
    }

    #[tokio::test]
    async fn test_explicit_turn_budget_wraps_the_group() {
        let group = RoundRobin::new(vec![EchoAgent::new("a", "x"), EchoAgent::new("b", "y")])
            .with_max_turns(5);

        let transcript = group.run("go").await.unwrap();
        let turns: Vec<&str> = transcript.split("\n---\n").collect();
        assert_eq!(turns.len(), 5);
        // Fifth turn is agent 1 again
        assert!(turns[4].starts_with("Agent 1: "));
    }

    #[tokio::test]
    async fn test_termination_predicate_ends_early() {
        let group = RoundRobin::new(vec![EchoAgent::new("a", "x"), EchoAgent::new("b", "y")])
            .with_max_turns(10)
            .until(Box::new(|turn| turn.text().ends_with("x-y")));

        let transcript = group.run("go").await.unwrap();
        let turns: Vec<&str> = transcript.split("\n---\n").collect();
        assert_eq!(turns.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_group_is_empty_transcript() {
        let group = RoundRobin::new(Vec::new());
        assert_eq!(group.run("hello").await.unwrap(), "");
    }
}
