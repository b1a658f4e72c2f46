//! Provider module - chat-completion backends
//!
//! Provides the completion provider abstraction with an OpenAI-compatible
//! client as the primary implementation.

pub mod openai;
pub mod traits;

pub use openai::OpenAiClient;
pub use traits::{Completion, CompletionOptions, CompletionProvider, TokenUsage};
