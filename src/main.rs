//! mteval CLI entry point

use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use mteval::cli::{Cli, Command};
use mteval::config::Config;
use mteval::llm::{InferenceEngine, OpenAiClient};
use mteval::pipeline::{QueryPaths, generate_queries, generate_responses};
use mteval::prompts::{Composer, PromptType};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            other => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    // Stdout carries progress and confirmation lines; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    match cli.command {
        Command::Queries {
            lang,
            mode,
            demo,
            qe,
            src,
            reference,
            tgt,
            output,
        } => {
            let ref_token = if qe { "SRC" } else { "REF" };
            let identifier = format!("{}_{}_{}_{}", mode.token(), lang.token(), demo.token(), ref_token);
            // One parser validates both CLI-built and hand-written identifiers
            let prompt_type: PromptType = identifier.parse()?;
            info!(%prompt_type, "queries: composing");

            let composer = Composer::new(prompt_type);
            let paths = QueryPaths {
                sources: src,
                references: reference,
                translations: tgt,
                output,
            };
            generate_queries(&composer, &paths)
        }

        Command::Responses {
            model,
            singlestep,
            input,
            output,
        } => {
            let config = Config::load(cli.config.as_ref())?;
            let model_config = config.model(&model)?;

            let client = OpenAiClient::from_config(model_config)
                .map_err(|e| eyre::eyre!("Failed to create client for '{}': {}", model, e))?;
            let engine = InferenceEngine::from_config(Arc::new(client), model_config);
            info!(%model, "responses: running inference");

            generate_responses(&engine, singlestep, &input, &output).await
        }
    }
}
