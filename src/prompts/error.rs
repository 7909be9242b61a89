//! Prompt construction error types

use thiserror::Error;

/// Errors that can occur while parsing prompt types or composing prompts
#[derive(Debug, Error)]
pub enum PromptError {
    /// The identifier does not match the `STEP_LANG_DEMO_ISREF` grammar
    #[error("invalid prompt type '{0}': expected STEP_LANG_DEMO_ISREF, e.g. ERROR_ZHEN_ITEMIZED_REF")]
    InvalidPromptType(String),

    /// A REF-mode prompt was requested for a record without a reference
    #[error("prompt type requires a reference translation but the record has none")]
    MissingReference,

    /// The evaluation-input template failed to render
    #[error("template render failed: {0}")]
    Render(#[from] handlebars::RenderError),
}
