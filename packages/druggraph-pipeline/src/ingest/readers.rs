//! Raw source readers
//!
//! Each reader turns one raw table into clean builder records:
//!
//! | source          | format     | columns                               |
//! |-----------------|------------|---------------------------------------|
//! | drugs           | CSV        | `atccode,drug`                        |
//! | pubmed          | CSV / JSON | `id,title,date,journal`               |
//! | clinical trials | CSV        | `id,scientific_title,date,journal`    |
//!
//! Rows that cannot become a complete record are skipped with a warning.
//! Duplicates (same drug name, same document title) keep the first row.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use ahash::AHashSet;
use druggraph_core::domain::parse_record_date;
use druggraph_core::{DocumentRecord, DrugRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::normalize::{clean_column, clean_text, strip_trailing_commas};
use crate::error::{PipelineError, Result};

/// One entry of the journal reference table
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JournalRecord {
    pub name: String,
}

// ═══════════════════════════════════════════════════════════════════════════
// Raw rows
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct DrugRow {
    atccode: Option<String>,
    drug: String,
}

#[derive(Debug, Deserialize)]
struct PubmedCsvRow {
    id: Option<String>,
    title: Option<String>,
    date: Option<String>,
    journal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PubmedJsonRow {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    journal: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ClinicalTrialRow {
    id: Option<String>,
    scientific_title: Option<String>,
    date: Option<String>,
    journal: Option<String>,
}

/// Cleaned columns of a publication or trial row, before completeness checks
struct DocumentFields {
    base_id: Option<String>,
    title: Option<String>,
    date: Option<String>,
    journal: Option<String>,
}

impl DocumentFields {
    fn into_record(self, source: &str, row: usize) -> Option<DocumentRecord> {
        let Some(title) = self.title else {
            warn!("{}: row {} skipped, empty title", source, row);
            return None;
        };
        let Some(journal) = self.journal else {
            warn!("{}: row {} ({:?}) skipped, empty journal", source, row, title);
            return None;
        };
        let Some(date) = self.date.as_deref().and_then(parse_record_date) else {
            warn!(
                "{}: row {} ({:?}) skipped, unreadable date {:?}",
                source, row, title, self.date
            );
            return None;
        };
        Some(DocumentRecord {
            base_id: self.base_id.unwrap_or_default(),
            title,
            date,
            journal,
        })
    }
}

fn json_id(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => clean_text(&s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn read_csv<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .map_err(|e| PipelineError::csv(path, e))?;
    reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|e| PipelineError::csv(path, e))
}

/// Keep the first record per key, preserving order
fn dedup_by_key<T, K, F>(records: Vec<T>, source: &str, key: F) -> Vec<T>
where
    K: Eq + std::hash::Hash,
    F: Fn(&T) -> K,
{
    let before = records.len();
    let mut seen = AHashSet::new();
    let kept: Vec<T> = records
        .into_iter()
        .filter(|record| seen.insert(key(record)))
        .collect();
    if kept.len() != before {
        info!("{}: {} duplicates removed", source, before - kept.len());
    }
    kept
}

// ═══════════════════════════════════════════════════════════════════════════
// Readers
// ═══════════════════════════════════════════════════════════════════════════

/// Read the drug table, names cleaned and deduplicated
pub fn read_and_format_drugs(path: impl AsRef<Path>) -> Result<Vec<DrugRecord>> {
    let path = path.as_ref();
    info!("drugs: reading {}", path.display());
    let rows: Vec<DrugRow> = read_csv(path)?;

    let drugs = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| match clean_text(&row.drug) {
            Some(name) => Some(DrugRecord {
                name,
                atccode: row
                    .atccode
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
            }),
            None => {
                warn!("drugs: row {} skipped, empty name", i + 1);
                None
            }
        })
        .collect();

    Ok(dedup_by_key(drugs, "drugs", |d: &DrugRecord| d.name.clone()))
}

fn read_pubmed_file(path: &Path) -> Result<Vec<DocumentRecord>> {
    info!("pubmed: reading {}", path.display());
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let fields: Vec<DocumentFields> = match extension.as_deref() {
        Some("csv") => read_csv::<PubmedCsvRow>(path)?
            .into_iter()
            .map(|row| DocumentFields {
                base_id: clean_column(row.id.as_deref()),
                title: clean_column(row.title.as_deref()),
                date: row.date,
                journal: clean_column(row.journal.as_deref()),
            })
            .collect(),
        Some("json") => {
            let content = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
            let rows: Vec<PubmedJsonRow> = serde_json::from_str(&strip_trailing_commas(&content))
                .map_err(|e| PipelineError::json(path, e))?;
            rows.into_iter()
                .map(|row| DocumentFields {
                    base_id: json_id(row.id),
                    title: clean_column(row.title.as_deref()),
                    date: row.date,
                    journal: clean_column(row.journal.as_deref()),
                })
                .collect()
        }
        _ => return Err(PipelineError::UnsupportedExtension(path.to_path_buf())),
    };

    let source = path.display().to_string();
    let records: Vec<DocumentRecord> = fields
        .into_iter()
        .enumerate()
        .filter_map(|(i, f)| f.into_record(&source, i + 1))
        .collect();
    debug!("pubmed: {} records from {}", records.len(), source);
    Ok(records)
}

/// Read and concatenate pubmed files (CSV or JSON), deduplicated by title
pub fn read_and_format_pubmed<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<DocumentRecord>> {
    let mut records = Vec::new();
    for path in paths {
        records.extend(read_pubmed_file(path.as_ref())?);
    }
    Ok(dedup_by_key(records, "pubmed", |r: &DocumentRecord| {
        r.title.clone()
    }))
}

/// Read the clinical trial table, deduplicated by title
///
/// Trial ids keep their original case.
pub fn read_and_format_clinical_trials(path: impl AsRef<Path>) -> Result<Vec<DocumentRecord>> {
    let path = path.as_ref();
    info!("clinical trials: reading {}", path.display());
    let rows: Vec<ClinicalTrialRow> = read_csv(path)?;

    let source = path.display().to_string();
    let records: Vec<DocumentRecord> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, row)| {
            DocumentFields {
                base_id: row.id.map(|id| id.trim().to_string()),
                title: clean_column(row.scientific_title.as_deref()),
                date: row.date,
                journal: clean_column(row.journal.as_deref()),
            }
            .into_record(&source, i + 1)
        })
        .collect();

    Ok(dedup_by_key(records, "clinical trials", |r: &DocumentRecord| {
        r.title.clone()
    }))
}

/// Distinct journal names of both document tables, sorted
pub fn create_journals(
    clinical_trials: &[DocumentRecord],
    pubmeds: &[DocumentRecord],
) -> Vec<JournalRecord> {
    let names: BTreeSet<&str> = clinical_trials
        .iter()
        .chain(pubmeds)
        .map(|r| r.journal.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    info!("journals: {} distinct names", names.len());
    names
        .into_iter()
        .map(|name| JournalRecord {
            name: name.to_string(),
        })
        .collect()
}
