//! Prompt construction for translation error analysis
//!
//! A prompt type identifier such as `ERROR_ZHEN_ITEMIZED_REF` selects which
//! few-shot example, instruction, and evaluation-input templates are merged
//! into a conversation. The identifier grammar is four `_`-separated tokens:
//! step, language pair, demonstration style, and reference mode.
//!
//! COUNT prompts (turning an error annotation into a "major, minor" count
//! pair) sit outside that grammar and are built through
//! [`Composer::compose_count`] explicitly.

mod composer;
mod error;
pub mod registry;
mod types;

pub use composer::Composer;
pub use error::PromptError;
pub use types::{Demo, EvaluationRecord, LangPair, PromptType, RefMode, Step};
