//! Prompt composer
//!
//! Merges registry templates into role-tagged conversations. Every
//! evaluation prompt has the same three-turn shape: a user turn carrying the
//! worked example plus the instruction, an assistant turn carrying the
//! example annotation, and a user turn carrying the real evaluation input
//! plus the instruction again.

use handlebars::Handlebars;
use tracing::debug;

use super::registry;
use super::types::{EvaluationRecord, PromptType, RefMode, Step};
use super::PromptError;
use crate::llm::{Conversation, Message};

/// Composes evaluation conversations for one prompt type
pub struct Composer {
    prompt_type: PromptType,
    hbs: Handlebars<'static>,
}

impl Composer {
    /// Create a composer for the given prompt type
    pub fn new(prompt_type: PromptType) -> Self {
        debug!(%prompt_type, "Composer::new: called");
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        // Segments are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);
        Self { prompt_type, hbs }
    }

    /// The prompt type this composer was built with
    pub fn prompt_type(&self) -> PromptType {
        self.prompt_type
    }

    /// Compose the evaluation conversation for one record
    ///
    /// Returns exactly three messages: user, assistant, user. REF-mode
    /// composition fails with [`PromptError::MissingReference`] if the
    /// record carries no reference.
    pub fn compose(&self, record: &EvaluationRecord) -> Result<Conversation, PromptError> {
        debug!(%self.prompt_type, "Composer::compose: called");
        let PromptType {
            step,
            lang,
            demo,
            ref_mode,
        } = self.prompt_type;

        if ref_mode == RefMode::Ref && record.reference.is_none() {
            debug!("Composer::compose: REF prompt without reference");
            return Err(PromptError::MissingReference);
        }

        let example = registry::example(lang, ref_mode).trim();
        let eval_input = self
            .hbs
            .render_template(registry::evaluation_input(ref_mode), record)?;

        let (instruction, example_assistant) = match step {
            Step::Error => (
                registry::error_instruction(ref_mode).trim(),
                registry::error_demo(demo, lang).trim().to_string(),
            ),
            Step::Singlestep => (
                registry::singlestep_instruction(ref_mode).trim(),
                // Annotation first, count line second
                format!(
                    "{}\n{}",
                    registry::error_demo(demo, lang).trim(),
                    registry::count_example(lang).trim()
                ),
            ),
        };

        Ok(vec![
            Message::user(format!("{}\n{}", example, instruction)),
            Message::assistant(example_assistant),
            Message::user(format!("{}\n{}", eval_input.trim(), instruction)),
        ])
    }

    /// Compose evaluation conversations for a batch of records
    ///
    /// Records are composed independently; output order and count match the
    /// input.
    pub fn compose_batch(&self, records: &[EvaluationRecord]) -> Result<Vec<Conversation>, PromptError> {
        debug!(record_count = records.len(), "Composer::compose_batch: called");
        records.iter().map(|record| self.compose(record)).collect()
    }

    /// Compose a COUNT prompt from raw error-annotation text
    ///
    /// This is the second step of two-step evaluation: the model's error
    /// annotation is fed back with the fixed count instruction. One user
    /// message, no few-shot turns.
    pub fn compose_count(error_text: &str) -> Conversation {
        debug!(error_text_len = error_text.len(), "Composer::compose_count: called");
        vec![Message::user(format!(
            "{}\n{}",
            error_text,
            registry::count_instruction().trim()
        ))]
    }

    /// Compose COUNT prompts for a batch of error annotations
    pub fn compose_count_batch(error_texts: &[String]) -> Vec<Conversation> {
        debug!(text_count = error_texts.len(), "Composer::compose_count_batch: called");
        error_texts.iter().map(|text| Self::compose_count(text)).collect()
    }
}
