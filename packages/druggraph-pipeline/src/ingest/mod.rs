//! Raw file ingestion: read, clean, deduplicate, export

pub mod export;
pub mod normalize;
pub mod readers;

pub use export::{export_records, load_records, RecordBundle};
pub use readers::{
    create_journals, read_and_format_clinical_trials, read_and_format_drugs,
    read_and_format_pubmed, JournalRecord,
};
