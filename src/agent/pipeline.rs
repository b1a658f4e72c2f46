//! Pipeline orchestrator
//!
//! Runs a fixed, non-cyclic sequence of specialist agents, each stage
//! feeding the next. Stages execute strictly one after another; a failed
//! stage skips the rest and propagates its error.

use std::sync::Arc;

use crate::agent::ChatAgent;
use crate::core::{ChatTurn, Result};

/// How conversation context flows between pipeline stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Each stage sees only the prior stage's output as its sole input turn
    ResetPerStage,
    /// Each stage sees every prior output as separate user turns
    Accumulate,
}

/// A fixed sequence of agents executed in order
pub struct Pipeline {
    stages: Vec<Arc<dyn ChatAgent>>,
    mode: HistoryMode,
}

impl Pipeline {
    /// Create a pipeline with reset-per-stage context flow
    pub fn new(stages: Vec<Arc<dyn ChatAgent>>) -> Self {
        Self {
            stages,
            mode: HistoryMode::ResetPerStage,
        }
    }

    /// Choose how context flows between stages
    pub fn with_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Number of configured stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Run every stage in order, returning each stage's output text
    pub async fn run(&self, initial: &str) -> Result<Vec<String>> {
        let mut outputs = Vec::with_capacity(self.stages.len());

        match self.mode {
            HistoryMode::ResetPerStage => {
                let mut current = initial.to_string();
                for stage in &self.stages {
                    let reply = stage.generate_reply(&[ChatTurn::user(&current)]).await?;
                    current = reply.text().to_string();
                    outputs.push(current.clone());
                }
            }
            HistoryMode::Accumulate => {
                let mut turns = vec![ChatTurn::user(initial)];
                for stage in &self.stages {
                    let reply = stage.generate_reply(&turns).await?;
                    let text = reply.text().to_string();
                    turns.push(ChatTurn::user(&text).from_agent(stage.name()));
                    outputs.push(text);
                }
            }
        }

        Ok(outputs)
    }
}
