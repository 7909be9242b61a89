//! Embedded prompt template registry
//!
//! All templates are compiled into the binary from `prompts/*.pmt` files.
//! Lookups are total matches over the grammar enums, so every (category,
//! key) combination the composer can ask for is guaranteed to exist at
//! compile time.

use super::types::{Demo, LangPair, RefMode};

// Few-shot example blocks (source/reference/translation)
const EXAMPLE_ENDE_REF: &str = include_str!("../../prompts/example_ende_ref.pmt");
const EXAMPLE_ENDE_SRC: &str = include_str!("../../prompts/example_ende_src.pmt");
const EXAMPLE_ENRU_REF: &str = include_str!("../../prompts/example_enru_ref.pmt");
const EXAMPLE_ENRU_SRC: &str = include_str!("../../prompts/example_enru_src.pmt");
const EXAMPLE_ZHEN_REF: &str = include_str!("../../prompts/example_zhen_ref.pmt");
const EXAMPLE_ZHEN_SRC: &str = include_str!("../../prompts/example_zhen_src.pmt");

// Worked error annotations for the assistant example turn
const ERROR_DETAILED_ENDE: &str = include_str!("../../prompts/error_detailed_ende.pmt");
const ERROR_ITEMIZED_ENDE: &str = include_str!("../../prompts/error_itemized_ende.pmt");
const ERROR_DETAILED_ENRU: &str = include_str!("../../prompts/error_detailed_enru.pmt");
const ERROR_ITEMIZED_ENRU: &str = include_str!("../../prompts/error_itemized_enru.pmt");
const ERROR_DETAILED_ZHEN: &str = include_str!("../../prompts/error_detailed_zhen.pmt");
const ERROR_ITEMIZED_ZHEN: &str = include_str!("../../prompts/error_itemized_zhen.pmt");

// Example count lines ("major, minor")
const COUNT_ENDE: &str = include_str!("../../prompts/count_ende.pmt");
const COUNT_ENRU: &str = include_str!("../../prompts/count_enru.pmt");
const COUNT_ZHEN: &str = include_str!("../../prompts/count_zhen.pmt");

// Instructions
const INSTRUCTION_ERROR_REF: &str = include_str!("../../prompts/instruction_error_ref.pmt");
const INSTRUCTION_ERROR_SRC: &str = include_str!("../../prompts/instruction_error_src.pmt");
const INSTRUCTION_SINGLESTEP_REF: &str = include_str!("../../prompts/instruction_singlestep_ref.pmt");
const INSTRUCTION_SINGLESTEP_SRC: &str = include_str!("../../prompts/instruction_singlestep_src.pmt");
const INSTRUCTION_COUNT: &str = include_str!("../../prompts/instruction_count.pmt");

// Evaluation input templates ({{src}}, {{ref}}, {{tgt}})
const EVAL_INPUT_REF: &str = include_str!("../../prompts/eval_input_ref.pmt");
const EVAL_INPUT_SRC: &str = include_str!("../../prompts/eval_input_src.pmt");

/// Few-shot example block for a language pair and reference mode
pub fn example(lang: LangPair, ref_mode: RefMode) -> &'static str {
    match (lang, ref_mode) {
        (LangPair::EnDe, RefMode::Ref) => EXAMPLE_ENDE_REF,
        (LangPair::EnDe, RefMode::Src) => EXAMPLE_ENDE_SRC,
        (LangPair::EnRu, RefMode::Ref) => EXAMPLE_ENRU_REF,
        (LangPair::EnRu, RefMode::Src) => EXAMPLE_ENRU_SRC,
        (LangPair::ZhEn, RefMode::Ref) => EXAMPLE_ZHEN_REF,
        (LangPair::ZhEn, RefMode::Src) => EXAMPLE_ZHEN_SRC,
    }
}

/// Worked error annotation for the assistant example turn
pub fn error_demo(demo: Demo, lang: LangPair) -> &'static str {
    match (demo, lang) {
        (Demo::Detailed, LangPair::EnDe) => ERROR_DETAILED_ENDE,
        (Demo::Itemized, LangPair::EnDe) => ERROR_ITEMIZED_ENDE,
        (Demo::Detailed, LangPair::EnRu) => ERROR_DETAILED_ENRU,
        (Demo::Itemized, LangPair::EnRu) => ERROR_ITEMIZED_ENRU,
        (Demo::Detailed, LangPair::ZhEn) => ERROR_DETAILED_ZHEN,
        (Demo::Itemized, LangPair::ZhEn) => ERROR_ITEMIZED_ZHEN,
    }
}

/// Example error-count line for the example annotation of a language pair
pub fn count_example(lang: LangPair) -> &'static str {
    match lang {
        LangPair::EnDe => COUNT_ENDE,
        LangPair::EnRu => COUNT_ENRU,
        LangPair::ZhEn => COUNT_ZHEN,
    }
}

/// Instruction for the error-identification step
pub fn error_instruction(ref_mode: RefMode) -> &'static str {
    match ref_mode {
        RefMode::Ref => INSTRUCTION_ERROR_REF,
        RefMode::Src => INSTRUCTION_ERROR_SRC,
    }
}

/// Combined identify-then-count instruction
pub fn singlestep_instruction(ref_mode: RefMode) -> &'static str {
    match ref_mode {
        RefMode::Ref => INSTRUCTION_SINGLESTEP_REF,
        RefMode::Src => INSTRUCTION_SINGLESTEP_SRC,
    }
}

/// Instruction for the standalone COUNT step
pub fn count_instruction() -> &'static str {
    INSTRUCTION_COUNT
}

/// Handlebars template for the real evaluation input turn
pub fn evaluation_input(ref_mode: RefMode) -> &'static str {
    match ref_mode {
        RefMode::Ref => EVAL_INPUT_REF,
        RefMode::Src => EVAL_INPUT_SRC,
    }
}
