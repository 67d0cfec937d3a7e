/*
 * Druggraph Core - Drug / publication / clinical-trial / journal graph
 *
 * Layered like a small hexagon:
 * - domain/         : Nodes, links, id counter, Graph aggregate, input records
 * - infrastructure/ : GraphBuilder, mention scan, JSON codec
 * - application/    : Read-side reports
 * - config/         : Builder configuration (YAML)
 *
 * Every node and link of one graph draws its id from the graph's single
 * counter. Journals are deduplicated by exact name; drugs are not.
 */

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use application::{drug_mentions, journals_with_distinct_mentions};
pub use config::{BuilderConfig, ConfigError, MentionConfig};
pub use domain::{
    ClinicalTrial, ClinicalTrialRecord, DocumentRecord, Drug, DrugRecord, EntityId, Graph,
    GraphStats, IdAllocator, Journal, Link, LinkKind, MentionType, MentionedLink, Node, NodeKind,
    Publication, PublicationRecord, PublishedLink,
};
pub use error::{ErrorKind, GraphError, Result};
pub use infrastructure::GraphBuilder;
