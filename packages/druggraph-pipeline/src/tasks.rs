//! Pipeline tasks
//!
//! One function per CLI subcommand:
//! - `read_and_format_data`: raw files → formatted record files
//! - `export_graph`: formatted records → graph JSON
//! - `drug_mentions`, `journals_with_distinct_mentions`: graph JSON → report

use std::collections::BTreeMap;
use std::path::Path;

use druggraph_core::application::{DrugMentionEntry, JournalMentionCount};
use druggraph_core::{BuilderConfig, Graph, GraphBuilder, GraphStats};
use tracing::{error, info};

use crate::error::Result;
use crate::ingest::{
    create_journals, export_records, load_records, read_and_format_clinical_trials,
    read_and_format_drugs, read_and_format_pubmed, RecordBundle,
};

fn read_bundle<P: AsRef<Path>>(
    pubmed_files: &[P],
    clinical_trials_file: &Path,
    drug_file: &Path,
) -> Result<RecordBundle> {
    let pubmeds = read_and_format_pubmed(pubmed_files)?;
    let clinical_trials = read_and_format_clinical_trials(clinical_trials_file)?;
    let journals = create_journals(&clinical_trials, &pubmeds);
    let drugs = read_and_format_drugs(drug_file)?;
    Ok(RecordBundle {
        drugs,
        pubmeds,
        clinical_trials,
        journals,
    })
}

/// Read and clean the raw tables, then write them into `output_dir`
pub fn read_and_format_data<P: AsRef<Path>>(
    pubmed_files: &[P],
    clinical_trials_file: impl AsRef<Path>,
    drug_file: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<RecordBundle> {
    let bundle = read_bundle(
        pubmed_files,
        clinical_trials_file.as_ref(),
        drug_file.as_ref(),
    )
    .inspect_err(|e| error!("data: formatting failed: {}", e))?;

    export_records(output_dir, &bundle).inspect_err(|e| error!("data: export failed: {}", e))?;
    Ok(bundle)
}

/// Build the graph from formatted records and save it as JSON
pub fn export_graph(
    input_dir: impl AsRef<Path>,
    graph_file: impl AsRef<Path>,
    config: &BuilderConfig,
) -> Result<GraphStats> {
    let bundle = load_records(input_dir)?;
    let graph = GraphBuilder::with_config(config.clone()).build_graph(
        &bundle.drugs,
        &bundle.pubmeds,
        &bundle.clinical_trials,
    )?;
    graph.save_json(graph_file)?;
    Ok(graph.stats())
}

/// Mentions of the named drugs in a saved graph
pub fn drug_mentions<S: AsRef<str>>(
    graph_file: impl AsRef<Path>,
    drug_names: &[S],
) -> Result<BTreeMap<String, Vec<DrugMentionEntry>>> {
    let graph = Graph::load_json(graph_file)?;
    let report = druggraph_core::drug_mentions(&graph, drug_names);
    info!(
        "mentions: {} of {} drug names found",
        report.len(),
        drug_names.len()
    );
    Ok(report)
}

/// Journal ranking by distinct mentioned drugs in a saved graph
pub fn journals_with_distinct_mentions(
    graph_file: impl AsRef<Path>,
) -> Result<Vec<JournalMentionCount>> {
    let graph = Graph::load_json(graph_file)?;
    Ok(druggraph_core::journals_with_distinct_mentions(&graph))
}
