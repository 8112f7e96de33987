//! Dossier CLI
//!
//! Wires the fragment store, embedding engine, and HTTP backends into the
//! ask pipeline.
//!
//! # Commands
//!
//! - `ask`: answer a question against a case's documents
//! - `log`: show recent answered questions for a case

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use dossier_backends::{HttpGenerationClient, HttpRerankClient, HttpVectorIndex};
use dossier_core::config::DossierConfig;
use dossier_core::errors::DossierResult;
use dossier_embeddings::EmbeddingEngine;
use dossier_retrieval::AskEngine;
use dossier_store::FragmentStore;

/// Grounded question answering over case documents.
#[derive(Parser)]
#[command(name = "dossier")]
#[command(version)]
#[command(about = "Answer questions against a case's documents, with citations")]
struct Cli {
    /// Path to a TOML config file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a question against one case.
    Ask {
        /// Case identifier.
        #[arg(long)]
        case: String,
        /// Number of evidence fragments to keep after reranking.
        #[arg(long)]
        top_k: Option<usize>,
        /// The question to answer.
        question: String,
    },
    /// Show recent answered questions for a case.
    Log {
        /// Case identifier.
        #[arg(long)]
        case: String,
        /// Max entries to show.
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> DossierResult<()> {
    let config = match &cli.config {
        Some(path) => DossierConfig::from_toml_file(path)?,
        None => DossierConfig::default(),
    };

    let store = FragmentStore::open_with_config(
        std::path::Path::new(&config.storage.db_path),
        &config.storage,
    )?;

    match cli.command {
        Commands::Ask {
            case,
            top_k,
            question,
        } => {
            let index = HttpVectorIndex::new(&config.index)?;
            let rerank = HttpRerankClient::new(&config.rerank)?;
            let generation = HttpGenerationClient::new(&config.generation)?;
            let embedder = EmbeddingEngine::new(&config.embedding)?;

            let engine = AskEngine::new(&store, &index, &rerank, &generation, config.clone())
                .with_embedder(&embedder)
                .with_query_log(&store);

            let answer = engine.ask(&case, &question, top_k)?;
            println!("{}", answer.text);
            if !answer.citations.is_empty() {
                println!("\nCitations:");
                for citation in &answer.citations {
                    let page = citation
                        .page
                        .map(|p| p.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "  [{} asset:{} p:{}]",
                        citation.fragment_id, citation.asset, page
                    );
                }
            }
        }
        Commands::Log { case, limit } => {
            for entry in store.recent_queries(&case, limit)? {
                println!(
                    "{}",
                    serde_json::to_string(&entry).unwrap_or_else(|_| "<unprintable>".to_string())
                );
            }
        }
    }
    Ok(())
}
