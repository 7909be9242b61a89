//! Integration tests for mteval
//!
//! Drives the queries and responses stages end-to-end over temp files,
//! with a scripted chat client standing in for the remote model.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use mteval::llm::{ChatClient, InferenceEngine, LlmError, Message};
use mteval::pipeline::{QueryEntry, QueryPaths, generate_queries, generate_responses};
use mteval::prompts::{Composer, PromptType};

/// Chat client returning canned responses in call order
struct ScriptedClient {
    responses: Vec<String>,
    call_count: AtomicUsize,
}

impl ScriptedClient {
    fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: responses.into_iter().map(String::from).collect(),
            call_count: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ChatClient for ScriptedClient {
    async fn complete(&self, _conversation: &[Message]) -> Result<String, LlmError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(idx)
            .cloned()
            .ok_or_else(|| LlmError::InvalidResponse("script exhausted".to_string()))
    }
}

fn write_segments(dir: &TempDir, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[tokio::test]
async fn test_two_step_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();

    // Stage 1: queries
    let prompt_type: PromptType = "ERROR_ZHEN_ITEMIZED_REF".parse().unwrap();
    let composer = Composer::new(prompt_type);
    let query_paths = QueryPaths {
        sources: write_segments(&dir, "src.txt", &["你好!", "我爱你"]),
        references: Some(write_segments(&dir, "ref.txt", &["Hello!", "I love you"])),
        translations: write_segments(&dir, "tgt.txt", &["Hello!", "I love you"]),
        output: dir.path().join("queries.json"),
    };
    generate_queries(&composer, &query_paths).unwrap();

    let entries: Vec<QueryEntry> = serde_json::from_str(&fs::read_to_string(&query_paths.output).unwrap()).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].query.len(), 3);
    let final_turn = &entries[0].query[2].content;
    assert!(final_turn.contains("Source: 你好!"));
    assert!(final_turn.contains("Reference: Hello!"));
    assert!(final_turn.contains("Translation: Hello!"));

    // Stage 2: responses, two-step (2 error calls + 2 count calls)
    let client = Arc::new(ScriptedClient::new(vec![
        "Major errors:\n(1) none\nMinor errors:\n(1) none",
        "Major errors:\n(1) none\nMinor errors:\n(1) none",
        "0, 0",
        "0, 1",
    ]));
    let engine = InferenceEngine::new(client, 5, Duration::ZERO);
    let responses_path = dir.path().join("responses.json");
    generate_responses(&engine, false, &query_paths.output, &responses_path)
        .await
        .unwrap();

    let entries: Vec<QueryEntry> = serde_json::from_str(&fs::read_to_string(&responses_path).unwrap()).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].error_response.is_some());
    assert_eq!(entries[0].count_response.as_deref(), Some("0, 0"));
    assert_eq!(entries[1].count_response.as_deref(), Some("0, 1"));
    // Original inputs and queries are preserved in the response artifact
    assert_eq!(entries[0].inputs.src, "你好!");
    assert_eq!(entries[0].query.len(), 3);
}

#[tokio::test]
async fn test_singlestep_pipeline_end_to_end() {
    let dir = TempDir::new().unwrap();

    let prompt_type: PromptType = "SINGLESTEP_ENDE_ITEMIZED_SRC".parse().unwrap();
    let composer = Composer::new(prompt_type);
    let query_paths = QueryPaths {
        sources: write_segments(&dir, "src.txt", &["Hello world"]),
        references: None,
        translations: write_segments(&dir, "tgt.txt", &["Hallo Welt"]),
        output: dir.path().join("queries.json"),
    };
    generate_queries(&composer, &query_paths).unwrap();

    let entries: Vec<QueryEntry> = serde_json::from_str(&fs::read_to_string(&query_paths.output).unwrap()).unwrap();
    // The SRC-mode query never mentions a reference
    assert!(!entries[0].query[2].content.contains("Reference:"));
    // The singlestep example assistant turn ends with the count line
    assert!(entries[0].query[1].content.ends_with("2, 5"));

    let client = Arc::new(ScriptedClient::new(vec!["Major errors: none\n0, 2"]));
    let engine = InferenceEngine::new(client, 5, Duration::ZERO);
    let responses_path = dir.path().join("responses.json");
    generate_responses(&engine, true, &query_paths.output, &responses_path)
        .await
        .unwrap();

    let entries: Vec<QueryEntry> = serde_json::from_str(&fs::read_to_string(&responses_path).unwrap()).unwrap();
    assert_eq!(entries[0].singlestep_response.as_deref(), Some("Major errors: none\n0, 2"));
    assert!(entries[0].error_response.is_none());
    assert!(entries[0].count_response.is_none());
}

#[tokio::test]
async fn test_response_artifact_json_field_names() {
    // The on-disk artifact must use the exact field names downstream
    // scoring expects: inputs, query, error_response, count_response.
    let dir = TempDir::new().unwrap();
    let composer = Composer::new("ERROR_ZHEN_ITEMIZED_SRC".parse().unwrap());
    let query_paths = QueryPaths {
        sources: write_segments(&dir, "src.txt", &["你好!"]),
        references: None,
        translations: write_segments(&dir, "tgt.txt", &["Hello!"]),
        output: dir.path().join("queries.json"),
    };
    generate_queries(&composer, &query_paths).unwrap();

    let client = Arc::new(ScriptedClient::new(vec!["annotation", "1, 1"]));
    let engine = InferenceEngine::new(client, 5, Duration::ZERO);
    let responses_path = dir.path().join("responses.json");
    generate_responses(&engine, false, &query_paths.output, &responses_path)
        .await
        .unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&responses_path).unwrap()).unwrap();
    let entry = &raw[0];
    assert!(entry.get("inputs").is_some());
    assert!(entry.get("query").is_some());
    assert_eq!(entry["error_response"], "annotation");
    assert_eq!(entry["count_response"], "1, 1");
    assert!(entry.get("singlestep_response").is_none());
    assert_eq!(entry["inputs"]["src"], "你好!");
    assert_eq!(entry["query"][0]["role"], "user");
}
