/*
 * Druggraph Pipeline - Files in, graph and reports out
 *
 * - ingest/ : raw CSV / JSON readers, column cleanup, formatted record files
 * - tasks   : one function per CLI step (data, build-graph, mentions, query)
 *
 * Graph construction and reports live in druggraph-core.
 */

pub mod error;
pub mod ingest;
pub mod tasks;

pub use error::{PipelineError, Result};
pub use ingest::{export_records, load_records, JournalRecord, RecordBundle};
pub use tasks::{drug_mentions, export_graph, journals_with_distinct_mentions, read_and_format_data};
