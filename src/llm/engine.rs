//! Sequential batch inference engine
//!
//! One conversation is fully resolved (success or exhausted retries) before
//! the next begins. Retry is a fixed-count, fixed-sleep loop: no backoff.
//! Exhausting the budget aborts the whole batch - callers needing partial
//! durability checkpoint per file, as the pipeline stage does.

use colored::Colorize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ChatClient, Conversation, LlmError};
use crate::config::ModelConfig;

/// Drives batched chat completions with bounded retry
pub struct InferenceEngine {
    client: Arc<dyn ChatClient>,
    max_retries: u32,
    retry_sleep: Duration,
}

impl InferenceEngine {
    /// Create an engine with explicit retry parameters
    pub fn new(client: Arc<dyn ChatClient>, max_retries: u32, retry_sleep: Duration) -> Self {
        debug!(max_retries, ?retry_sleep, "InferenceEngine::new: called");
        Self {
            client,
            max_retries,
            retry_sleep,
        }
    }

    /// Create an engine taking retry parameters from a model configuration
    pub fn from_config(client: Arc<dyn ChatClient>, config: &ModelConfig) -> Self {
        Self::new(
            client,
            config.max_retries,
            Duration::from_secs(config.retry_sleep_secs),
        )
    }

    /// Run every conversation in order and collect the response texts
    ///
    /// Output length and order match the input. On any request error the
    /// attempt counter is bumped; below the budget the engine sleeps the
    /// fixed duration and retries the same conversation, at the budget it
    /// aborts the whole batch with [`LlmError::RetriesExhausted`] wrapping
    /// the last error. No partial output is returned on abort.
    pub async fn infer_batch(&self, conversations: &[Conversation]) -> Result<Vec<String>, LlmError> {
        debug!(conversation_count = conversations.len(), "infer_batch: called");
        let total = conversations.len();
        let mut outputs = Vec::with_capacity(total);

        for (index, conversation) in conversations.iter().enumerate() {
            let mut attempts: u32 = 0;
            let text = loop {
                match self.client.complete(conversation).await {
                    Ok(text) => break text,
                    Err(e) => {
                        attempts += 1;
                        warn!(index, attempts, error = %e, "infer_batch: request failed");
                        if attempts >= self.max_retries {
                            return Err(LlmError::RetriesExhausted {
                                attempts,
                                source: Box::new(e),
                            });
                        }
                        tokio::time::sleep(self.retry_sleep).await;
                    }
                }
            };

            outputs.push(text);
            eprintln!("{} [{}/{}]", "inference".blue(), index + 1, total);
        }

        Ok(outputs)
    }
}
