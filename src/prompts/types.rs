//! Prompt type grammar and evaluation records
//!
//! A prompt type identifier is four tokens joined by `_`, in fixed order:
//! `{STEP}_{LANG}_{DEMO}_{IS_REF}`. Each token must be a member of its
//! position's legal set; anything else invalidates the whole identifier.
//! Token matching is exact - no case normalization.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use super::PromptError;

/// Separator between prompt type tokens
pub const TYPE_SEPARATOR: char = '_';

/// Evaluation step: identify errors, or identify and count in one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Two-step evaluation: this prompt only identifies errors
    Error,
    /// Combined evaluation: identify errors, then output counts
    Singlestep,
}

impl Step {
    /// Parse a grammar token ("ERROR", "SINGLESTEP")
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ERROR" => Some(Self::Error),
            "SINGLESTEP" => Some(Self::Singlestep),
            _ => None,
        }
    }

    /// The grammar token for this step
    pub fn token(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Singlestep => "SINGLESTEP",
        }
    }
}

/// Supported language pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangPair {
    /// English to German
    EnDe,
    /// English to Russian
    EnRu,
    /// Chinese to English
    ZhEn,
}

impl LangPair {
    /// Parse a grammar token ("ENDE", "ENRU", "ZHEN")
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "ENDE" => Some(Self::EnDe),
            "ENRU" => Some(Self::EnRu),
            "ZHEN" => Some(Self::ZhEn),
            _ => None,
        }
    }

    /// The grammar token for this language pair
    pub fn token(&self) -> &'static str {
        match self {
            Self::EnDe => "ENDE",
            Self::EnRu => "ENRU",
            Self::ZhEn => "ZHEN",
        }
    }
}

/// Style of the worked error-annotation demonstration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    /// Prose annotation
    Detailed,
    /// Numbered major/minor error list
    Itemized,
}

impl Demo {
    /// Parse a grammar token ("DETAILED", "ITEMIZED")
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "DETAILED" => Some(Self::Detailed),
            "ITEMIZED" => Some(Self::Itemized),
            _ => None,
        }
    }

    /// The grammar token for this demonstration style
    pub fn token(&self) -> &'static str {
        match self {
            Self::Detailed => "DETAILED",
            Self::Itemized => "ITEMIZED",
        }
    }
}

/// Whether prompts include a reference translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefMode {
    /// Reference-free (quality estimation): source and candidate only
    Src,
    /// Reference-based: source, reference, and candidate
    Ref,
}

impl RefMode {
    /// Parse a grammar token ("SRC", "REF")
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "SRC" => Some(Self::Src),
            "REF" => Some(Self::Ref),
            _ => None,
        }
    }

    /// The grammar token for this reference mode
    pub fn token(&self) -> &'static str {
        match self {
            Self::Src => "SRC",
            Self::Ref => "REF",
        }
    }
}

/// A fully parsed prompt type
///
/// Immutable once constructed. The textual identifier is exactly the four
/// tokens rejoined with `_`, so `parse` and `Display` roundtrip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptType {
    pub step: Step,
    pub lang: LangPair,
    pub demo: Demo,
    pub ref_mode: RefMode,
}

impl PromptType {
    /// Construct a prompt type from its fields
    pub fn new(step: Step, lang: LangPair, demo: Demo, ref_mode: RefMode) -> Self {
        Self {
            step,
            lang,
            demo,
            ref_mode,
        }
    }
}

impl FromStr for PromptType {
    type Err = PromptError;

    /// Parse an identifier such as `ERROR_ZHEN_ITEMIZED_REF`
    ///
    /// Pure: no side effects, same input always yields the same result.
    /// Extra or missing segments fail the whole identifier - there is no
    /// partial parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(identifier = %s, "PromptType::from_str: called");
        let invalid = || PromptError::InvalidPromptType(s.to_string());

        let tokens: Vec<&str> = s.split(TYPE_SEPARATOR).collect();
        let &[step, lang, demo, ref_mode] = tokens.as_slice() else {
            debug!(segments = tokens.len(), "PromptType::from_str: wrong segment count");
            return Err(invalid());
        };

        Ok(Self {
            step: Step::from_token(step).ok_or_else(invalid)?,
            lang: LangPair::from_token(lang).ok_or_else(invalid)?,
            demo: Demo::from_token(demo).ok_or_else(invalid)?,
            ref_mode: RefMode::from_token(ref_mode).ok_or_else(invalid)?,
        })
    }
}

impl fmt::Display for PromptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.step.token(),
            self.lang.token(),
            self.demo.token(),
            self.ref_mode.token(),
            sep = TYPE_SEPARATOR
        )
    }
}

/// One segment to be evaluated
///
/// `reference` serializes as `"ref"` and is required only for REF-mode
/// prompts; SRC-mode prompts ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Source segment
    pub src: String,

    /// Candidate translation under evaluation
    pub tgt: String,

    /// Reference translation, if available
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl EvaluationRecord {
    /// Create a reference-free record
    pub fn new(src: impl Into<String>, tgt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            tgt: tgt.into(),
            reference: None,
        }
    }

    /// Create a reference-based record
    pub fn with_reference(src: impl Into<String>, tgt: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            tgt: tgt.into(),
            reference: Some(reference.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_identifier() {
        let pt: PromptType = "ERROR_ZHEN_ITEMIZED_REF".parse().unwrap();
        assert_eq!(pt.step, Step::Error);
        assert_eq!(pt.lang, LangPair::ZhEn);
        assert_eq!(pt.demo, Demo::Itemized);
        assert_eq!(pt.ref_mode, RefMode::Ref);
    }

    #[test]
    fn test_parse_all_valid_combinations_roundtrip() {
        for step in [Step::Error, Step::Singlestep] {
            for lang in [LangPair::EnDe, LangPair::EnRu, LangPair::ZhEn] {
                for demo in [Demo::Detailed, Demo::Itemized] {
                    for ref_mode in [RefMode::Src, RefMode::Ref] {
                        let pt = PromptType::new(step, lang, demo, ref_mode);
                        let identifier = pt.to_string();
                        let reparsed: PromptType = identifier.parse().unwrap();
                        assert_eq!(reparsed, pt, "roundtrip failed for {}", identifier);
                    }
                }
            }
        }
    }

    #[test]
    fn test_parse_wrong_segment_count() {
        assert!("ERROR_ZHEN_REF".parse::<PromptType>().is_err());
        assert!("ERROR_ZHEN_ITEMIZED_REF_EXTRA".parse::<PromptType>().is_err());
        assert!("ERROR".parse::<PromptType>().is_err());
        assert!("".parse::<PromptType>().is_err());
    }

    #[test]
    fn test_parse_unknown_token() {
        assert!("COUNT_ZHEN_ITEMIZED_REF".parse::<PromptType>().is_err());
        assert!("ERROR_FRDE_ITEMIZED_REF".parse::<PromptType>().is_err());
        assert!("ERROR_ZHEN_VERBOSE_REF".parse::<PromptType>().is_err());
        assert!("ERROR_ZHEN_ITEMIZED_QE".parse::<PromptType>().is_err());
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("error_zhen_itemized_ref".parse::<PromptType>().is_err());
        assert!("Error_Zhen_Itemized_Ref".parse::<PromptType>().is_err());
    }

    #[test]
    fn test_parse_is_pure() {
        let a: PromptType = "SINGLESTEP_ENDE_DETAILED_SRC".parse().unwrap();
        let b: PromptType = "SINGLESTEP_ENDE_DETAILED_SRC".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_matches_identifier() {
        let pt: PromptType = "SINGLESTEP_ENRU_DETAILED_SRC".parse().unwrap();
        assert_eq!(pt.to_string(), "SINGLESTEP_ENRU_DETAILED_SRC");
    }

    #[test]
    fn test_record_serde_ref_field_name() {
        let record = EvaluationRecord::with_reference("你好!", "Hello!", "Hello!");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["ref"], "Hello!");

        let record = EvaluationRecord::new("你好!", "Hello!");
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("ref").is_none());
    }
}
