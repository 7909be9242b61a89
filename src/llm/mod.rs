//! LLM client module
//!
//! Provides the chat client abstraction, an OpenAI-compatible
//! implementation, and the sequential batch inference engine.

mod client;
mod engine;
mod error;
mod openai;
mod types;

pub use client::ChatClient;
pub use engine::InferenceEngine;
pub use error::LlmError;
pub use openai::OpenAiClient;
pub use types::{Conversation, Message, Role};

#[cfg(test)]
pub use client::mock::MockChatClient;
