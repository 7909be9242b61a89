//! mteval - LLM-based machine translation error analysis
//!
//! mteval builds chat-style evaluation prompts for judging machine
//! translation quality with a large language model, then drives batched
//! inference against an OpenAI-compatible endpoint with bounded retry.
//!
//! # Pipeline
//!
//! 1. **Queries**: aligned source/reference/candidate text files are turned
//!    into few-shot error-analysis conversations and written as a JSON
//!    query artifact.
//! 2. **Responses**: the query artifact is replayed against the model; in
//!    two-step mode the error annotations are fed back through a COUNT
//!    prompt to extract major/minor error counts.
//!
//! # Modules
//!
//! - [`prompts`] - Prompt-type grammar, template registry, and composer
//! - [`llm`] - Chat client trait, OpenAI-compatible client, batch engine
//! - [`pipeline`] - Query and response generation stages
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod cli;
pub mod config;
pub mod files;
pub mod llm;
pub mod pipeline;
pub mod prompts;

// Re-export commonly used types
pub use config::{Config, ModelConfig};
pub use llm::{ChatClient, Conversation, InferenceEngine, LlmError, Message, OpenAiClient, Role};
pub use pipeline::{QueryEntry, QueryPaths, generate_queries, generate_responses};
pub use prompts::{Composer, Demo, EvaluationRecord, LangPair, PromptError, PromptType, RefMode, Step};
