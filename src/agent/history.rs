//! Conversation history management
//!
//! Maintains the most recent turns of a conversation with a fixed cap.

use std::collections::VecDeque;

use crate::core::ChatTurn;

/// Bounded, oldest-first conversation history
#[derive(Debug, Clone)]
pub struct History {
    turns: VecDeque<ChatTurn>,
    max_len: usize,
}

impl History {
    /// Create a history keeping at most `max_len` turns
    pub fn new(max_len: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            max_len,
        }
    }

    /// Append a turn, dropping the oldest turns beyond the cap
    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push_back(turn);

        while self.turns.len() > self.max_len {
            self.turns.pop_front();
        }
    }

    /// Snapshot of the current turns, oldest first
    pub fn snapshot(&self) -> Vec<ChatTurn> {
        self.turns.iter().cloned().collect()
    }

    /// Iterate over the turns, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ChatTurn> {
        self.turns.iter()
    }

    /// The most recent turn
    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.back()
    }

    /// Number of retained turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_basic() {
        let mut history = History::new(10);
        history.push(ChatTurn::user("Hello"));
        history.push(ChatTurn::assistant("Hi there!"));

        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().text(), "Hi there!");
    }

    #[test]
    fn test_eleventh_turn_drops_oldest() {
        let mut history = History::new(10);
        for i in 0..10 {
            history.push(ChatTurn::user(format!("turn-{}", i)));
        }
        assert_eq!(history.len(), 10);

        history.push(ChatTurn::user("turn-10"));
        assert_eq!(history.len(), 10);

        // Oldest gone, remaining order preserved, new turn last
        let turns = history.snapshot();
        assert_eq!(turns[0].text(), "turn-1");
        assert_eq!(turns[8].text(), "turn-9");
        assert_eq!(turns[9].text(), "turn-10");
    }

    #[test]
    fn test_clear() {
        let mut history = History::default();
        history.push(ChatTurn::user("x"));
        history.clear();
        assert!(history.is_empty());
    }
}
