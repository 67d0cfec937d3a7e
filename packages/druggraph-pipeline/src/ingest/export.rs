//! Formatted record files
//!
//! The data step writes four JSON arrays into one directory; the graph step
//! reads them back. The journal table is informational: the graph derives its
//! journals from the document records, so `journals.json` may be absent.

use std::fs;
use std::path::Path;

use druggraph_core::{DocumentRecord, DrugRecord};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use super::readers::JournalRecord;
use crate::error::{PipelineError, Result};

pub const DRUGS_FILE: &str = "drugs.json";
pub const PUBMEDS_FILE: &str = "pubmeds.json";
pub const CLINICAL_TRIALS_FILE: &str = "clinical_trials.json";
pub const JOURNALS_FILE: &str = "journals.json";

/// Everything the graph step needs, as produced by the data step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordBundle {
    pub drugs: Vec<DrugRecord>,
    pub pubmeds: Vec<DocumentRecord>,
    pub clinical_trials: Vec<DocumentRecord>,
    pub journals: Vec<JournalRecord>,
}

fn write_json<T: Serialize>(dir: &Path, name: &str, records: &[T]) -> Result<()> {
    let path = dir.join(name);
    let text = serde_json::to_string(records).map_err(|e| PipelineError::json(&path, e))?;
    fs::write(&path, text).map_err(|e| PipelineError::io(&path, e))?;
    info!("export: {} ({} records)", path.display(), records.len());
    Ok(())
}

fn read_json<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    let path = dir.join(name);
    let text = fs::read_to_string(&path).map_err(|e| PipelineError::io(&path, e))?;
    serde_json::from_str(&text).map_err(|e| PipelineError::json(&path, e))
}

fn read_json_or_empty<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Vec<T>> {
    if !dir.join(name).exists() {
        debug!("export: {} absent in {}, using empty table", name, dir.display());
        return Ok(Vec::new());
    }
    read_json(dir, name)
}

/// Write the four record files into `dir`, creating it if needed
pub fn export_records(dir: impl AsRef<Path>, bundle: &RecordBundle) -> Result<()> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| PipelineError::io(dir, e))?;
    write_json(dir, PUBMEDS_FILE, &bundle.pubmeds)?;
    write_json(dir, CLINICAL_TRIALS_FILE, &bundle.clinical_trials)?;
    write_json(dir, JOURNALS_FILE, &bundle.journals)?;
    write_json(dir, DRUGS_FILE, &bundle.drugs)?;
    Ok(())
}

/// Read back the files written by [`export_records`]
///
/// A missing journal table loads as empty; the other three files are required.
pub fn load_records(dir: impl AsRef<Path>) -> Result<RecordBundle> {
    let dir = dir.as_ref();
    Ok(RecordBundle {
        drugs: read_json(dir, DRUGS_FILE)?,
        pubmeds: read_json(dir, PUBMEDS_FILE)?,
        clinical_trials: read_json(dir, CLINICAL_TRIALS_FILE)?,
        journals: read_json_or_empty(dir, JOURNALS_FILE)?,
    })
}
