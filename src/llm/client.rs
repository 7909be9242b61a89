//! ChatClient trait definition

use async_trait::async_trait;

use super::{LlmError, Message};

/// A chat completion backend
///
/// One call sends a full conversation as message history and returns the
/// model's text response. Implementations perform a single attempt; the
/// retry policy lives in [`super::InferenceEngine`].
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one conversation and return the response text
    async fn complete(&self, conversation: &[Message]) -> Result<String, LlmError>;
}
