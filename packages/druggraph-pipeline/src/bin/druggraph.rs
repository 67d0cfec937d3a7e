//! Druggraph CLI
//!
//! # Usage
//!
//! ```bash
//! # Clean the raw tables
//! druggraph data --pubmed-files pubmed.csv pubmed.json \
//!     --clinical-trials-file clinical_trials.csv --drug-file drugs.csv -o formatted/
//!
//! # Build and save the graph
//! druggraph build-graph -i formatted/ -g graph.json [--config druggraph.yaml]
//!
//! # Reports
//! druggraph mentions -g graph.json -d diphenhydramine tetracycline
//! druggraph query -g graph.json
//! ```
//!
//! Logging goes to stderr; `RUST_LOG` overrides the default `info` level.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use druggraph_core::BuilderConfig;
use druggraph_pipeline::tasks;
use serde::Serialize;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "druggraph")]
#[command(about = "Drug / publication / clinical trial / journal graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read, clean and export the raw source files
    Data {
        /// Pubmed files (.csv or .json)
        #[arg(long, required = true, num_args = 1..)]
        pubmed_files: Vec<PathBuf>,

        /// Clinical trials CSV
        #[arg(long)]
        clinical_trials_file: PathBuf,

        /// Drugs CSV
        #[arg(long)]
        drug_file: PathBuf,

        /// Directory receiving the formatted JSON files
        #[arg(short, long)]
        output_directory: PathBuf,
    },

    /// Build the graph from formatted files and save it as JSON
    BuildGraph {
        /// Directory written by `data`
        #[arg(short, long)]
        input_directory: PathBuf,

        /// Graph JSON output
        #[arg(short = 'g', long)]
        json_graph_file: PathBuf,

        /// Builder configuration (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print every node mentioning the given drugs
    Mentions {
        /// Graph JSON file
        #[arg(short = 'g', long)]
        json_graph_file: PathBuf,

        /// Drug names
        #[arg(short, long, required = true, num_args = 1..)]
        drug_names: Vec<String>,
    },

    /// Print journals ranked by distinct mentioned drugs
    Query {
        /// Graph JSON file
        #[arg(short = 'g', long)]
        json_graph_file: PathBuf,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing report")?;
    println!("{}", text);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Data {
            pubmed_files,
            clinical_trials_file,
            drug_file,
            output_directory,
        } => {
            tasks::read_and_format_data(
                &pubmed_files,
                &clinical_trials_file,
                &drug_file,
                &output_directory,
            )
            .context("data step failed")?;
        }
        Commands::BuildGraph {
            input_directory,
            json_graph_file,
            config,
        } => {
            let config = match config {
                Some(path) => BuilderConfig::from_yaml(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => BuilderConfig::default(),
            };
            let stats = tasks::export_graph(&input_directory, &json_graph_file, &config)
                .context("graph step failed")?;
            print_json(&stats)?;
        }
        Commands::Mentions {
            json_graph_file,
            drug_names,
        } => {
            let report = tasks::drug_mentions(&json_graph_file, &drug_names)
                .context("mentions report failed")?;
            print_json(&report)?;
        }
        Commands::Query { json_graph_file } => {
            let ranking = tasks::journals_with_distinct_mentions(&json_graph_file)
                .context("journal query failed")?;
            print_json(&ranking)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
