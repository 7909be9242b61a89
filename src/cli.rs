//! CLI command definitions and subcommands

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// mteval - LLM-based machine translation error analysis
#[derive(Parser)]
#[command(
    name = "mteval",
    about = "Build translation-evaluation prompts and run them against an LLM",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the query artifact from aligned segment files
    Queries {
        /// Language pair
        #[arg(long, value_enum)]
        lang: LangArg,

        /// Evaluation mode
        #[arg(long, value_enum, default_value = "error")]
        mode: ModeArg,

        /// Demonstration style for the few-shot example
        #[arg(long, value_enum, default_value = "itemized")]
        demo: DemoArg,

        /// Quality estimation: build reference-free prompts
        #[arg(long)]
        qe: bool,

        /// Source segments file, one per line
        #[arg(long)]
        src: PathBuf,

        /// Reference segments file (required unless --qe)
        #[arg(long = "ref")]
        reference: Option<PathBuf>,

        /// Candidate translation segments file, one per line
        #[arg(long)]
        tgt: PathBuf,

        /// Query artifact destination (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Run inference over a query artifact and merge in responses
    Responses {
        /// Model name from the config file
        #[arg(short, long)]
        model: String,

        /// Treat the artifact as singlestep queries (one response field)
        #[arg(long)]
        singlestep: bool,

        /// Query artifact (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Response artifact destination (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Language pair flag values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LangArg {
    Ende,
    Enru,
    Zhen,
}

impl LangArg {
    /// The prompt-type grammar token for this flag value
    pub fn token(self) -> &'static str {
        match self {
            Self::Ende => "ENDE",
            Self::Enru => "ENRU",
            Self::Zhen => "ZHEN",
        }
    }
}

/// Evaluation mode flag values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Two-step: identify errors now, count later
    Error,
    /// Combined: identify and count in one response
    Singlestep,
}

impl ModeArg {
    pub fn token(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Singlestep => "SINGLESTEP",
        }
    }
}

/// Demonstration style flag values
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DemoArg {
    Detailed,
    Itemized,
}

impl DemoArg {
    pub fn token(self) -> &'static str {
        match self {
            Self::Detailed => "DETAILED",
            Self::Itemized => "ITEMIZED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_queries_command_flags() {
        let cli = Cli::parse_from([
            "mteval", "queries", "--lang", "zhen", "--mode", "error", "--qe", "--src", "s.txt", "--tgt", "t.txt",
            "--output", "q.json",
        ]);
        match cli.command {
            Command::Queries { lang, mode, demo, qe, .. } => {
                assert_eq!(lang.token(), "ZHEN");
                assert_eq!(mode.token(), "ERROR");
                assert_eq!(demo.token(), "ITEMIZED");
                assert!(qe);
            }
            _ => panic!("expected queries command"),
        }
    }

    #[test]
    fn test_responses_command_flags() {
        let cli = Cli::parse_from([
            "mteval",
            "responses",
            "--model",
            "gpt-4",
            "--input",
            "q.json",
            "--output",
            "r.json",
        ]);
        match cli.command {
            Command::Responses {
                model, singlestep, ..
            } => {
                assert_eq!(model, "gpt-4");
                assert!(!singlestep);
            }
            _ => panic!("expected responses command"),
        }
    }
}
