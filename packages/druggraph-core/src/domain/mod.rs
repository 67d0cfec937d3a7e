//! Domain layer
//!
//! Pure graph models: typed nodes, typed links, the id counter and the
//! graph aggregate with its lookup helpers, plus the input records
//! the builder consumes. No I/O happens here.

pub mod graph;
pub mod ids;
pub mod link;
pub mod node;
pub mod records;

pub use graph::{Graph, GraphStats};
pub use ids::{EntityId, IdAllocator};
pub use link::{Link, LinkKind, MentionType, MentionedLink, PublishedLink};
pub use node::{ClinicalTrial, Drug, Journal, Node, NodeKind, Publication};
pub use records::{
    parse_record_date, ClinicalTrialRecord, DocumentRecord, DrugRecord, PublicationRecord,
};
