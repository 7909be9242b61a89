//! Query and response generation stages
//!
//! Stage one turns aligned segment files into a JSON query artifact; stage
//! two replays the artifact against a model and merges the responses back
//! in. Each stage checkpoints to its own output file, so a multi-system run
//! resumes at file granularity after an aborted batch.

use eyre::{Result, bail, eyre};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::files::{read_json, read_lines, save_json};
use crate::llm::{Conversation, InferenceEngine};
use crate::prompts::{Composer, EvaluationRecord, RefMode};

/// One entry of the query/response artifact
///
/// Written by the queries stage with only `inputs` and `query` set; the
/// responses stage merges in `singlestep_response` or the
/// `error_response`/`count_response` pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryEntry {
    pub inputs: EvaluationRecord,
    pub query: Conversation,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singlestep_response: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_response: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_response: Option<String>,
}

/// Input and output paths for the queries stage
#[derive(Debug, Clone)]
pub struct QueryPaths {
    /// Source segments, one per line
    pub sources: PathBuf,
    /// Reference segments, required for REF-mode prompt types
    pub references: Option<PathBuf>,
    /// Candidate translation segments, one per line
    pub translations: PathBuf,
    /// Query artifact destination
    pub output: PathBuf,
}

/// Generate the query artifact for one system file
///
/// All provided segment files must have equal line counts; a mismatch is
/// reported before any composition occurs.
pub fn generate_queries(composer: &Composer, paths: &QueryPaths) -> Result<()> {
    let prompt_type = composer.prompt_type();
    info!(%prompt_type, sources = %paths.sources.display(), "generate_queries: starting");

    let sources = read_lines(&paths.sources)?;
    let translations = read_lines(&paths.translations)?;
    let references = match &paths.references {
        Some(path) => Some(read_lines(path)?),
        None if prompt_type.ref_mode == RefMode::Ref => {
            bail!("prompt type {} requires a reference file", prompt_type)
        }
        None => None,
    };

    if sources.len() != translations.len() {
        bail!(
            "Length mismatch: sources({}), translations({})",
            sources.len(),
            translations.len()
        );
    }
    if let Some(refs) = &references
        && refs.len() != sources.len()
    {
        bail!("Length mismatch: sources({}), references({})", sources.len(), refs.len());
    }

    let records: Vec<EvaluationRecord> = sources
        .into_iter()
        .zip(translations)
        .enumerate()
        .map(|(index, (src, tgt))| {
            // References are embedded only for REF-mode prompts
            let reference = match (prompt_type.ref_mode, &references) {
                (RefMode::Ref, Some(refs)) => Some(refs[index].clone()),
                _ => None,
            };
            EvaluationRecord {
                src,
                tgt,
                reference,
            }
        })
        .collect();

    debug!(record_count = records.len(), "generate_queries: composing");
    let queries = composer.compose_batch(&records)?;

    let entries: Vec<QueryEntry> = records
        .into_iter()
        .zip(queries)
        .map(|(inputs, query)| QueryEntry {
            inputs,
            query,
            singlestep_response: None,
            error_response: None,
            count_response: None,
        })
        .collect();

    save_json(&entries, &paths.output)
}

/// Run inference over a query artifact and write the response artifact
///
/// In singlestep mode each entry gains a `singlestep_response`; otherwise
/// the error responses are fed back through COUNT prompts in a second batch
/// and each entry gains `error_response` and `count_response`.
pub async fn generate_responses(
    engine: &InferenceEngine,
    singlestep: bool,
    input: &Path,
    output: &Path,
) -> Result<()> {
    info!(input = %input.display(), singlestep, "generate_responses: starting");
    let mut entries: Vec<QueryEntry> = read_json(input)?;
    let queries: Vec<Conversation> = entries.iter().map(|entry| entry.query.clone()).collect();

    let responses = engine
        .infer_batch(&queries)
        .await
        .map_err(|e| eyre!("inference failed for {}: {}", input.display(), e))?;

    if singlestep {
        for (entry, response) in entries.iter_mut().zip(responses) {
            entry.singlestep_response = Some(response);
        }
    } else {
        let count_queries = Composer::compose_count_batch(&responses);
        info!("generate_responses: generating count responses");
        let count_responses = engine
            .infer_batch(&count_queries)
            .await
            .map_err(|e| eyre!("count inference failed for {}: {}", input.display(), e))?;

        for ((entry, response), count) in entries.iter_mut().zip(responses).zip(count_responses) {
            entry.error_response = Some(response);
            entry.count_response = Some(count);
        }
    }

    save_json(&entries, output)
}
