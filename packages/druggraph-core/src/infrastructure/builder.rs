// Graph Builder - Main Entry Point
//
// Turns drug / publication / clinical-trial records into a Graph:
// 1. Drug nodes (no dedup by name)
// 2. Per document: journal (dedup by name) → document node → published link
//    → mention links for every drug named in the title
// 3. Optional: drug → journal mentions derived from step 2
//
// All id allocation and journal lookup-or-insert happen on the calling
// thread; only the read-only drug scan may run on rayon.

use ahash::{AHashMap, AHashSet};
use tracing::{debug, info};

use super::mention::MentionDetector;
use crate::config::BuilderConfig;
use crate::domain::{
    ClinicalTrial, ClinicalTrialRecord, DocumentRecord, Drug, DrugRecord, EntityId, Graph, Link,
    MentionType, MentionedLink, Node, Publication, PublicationRecord, PublishedLink,
};
use crate::error::Result;

/// Concrete type of a document record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Publication,
    ClinicalTrial,
}

impl DocumentKind {
    fn mention_type(self) -> MentionType {
        match self {
            DocumentKind::Publication => MentionType::Publication,
            DocumentKind::ClinicalTrial => MentionType::ClinicalTrial,
        }
    }

    fn node(self, id: EntityId, record: &DocumentRecord) -> Node {
        match self {
            DocumentKind::Publication => Node::Publication(Publication {
                id,
                base_id: record.base_id.clone(),
                title: record.title.clone(),
                date: record.date,
            }),
            DocumentKind::ClinicalTrial => Node::ClinicalTrial(ClinicalTrial {
                id,
                base_id: record.base_id.clone(),
                title: record.title.clone(),
                date: record.date,
            }),
        }
    }
}

/// Graph builder
///
/// ## Usage
/// ```text
/// let builder = GraphBuilder::new();
/// let graph = builder.build_graph(&drugs, &publications, &clinical_trials)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: BuilderConfig,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build a complete graph from the three record collections
    ///
    /// Publications are processed before clinical trials; within each
    /// collection records keep their input order, so ids are deterministic.
    pub fn build_graph(
        &self,
        drugs: &[DrugRecord],
        publications: &[PublicationRecord],
        clinical_trials: &[ClinicalTrialRecord],
    ) -> Result<Graph> {
        info!(
            "build_graph: {} drugs, {} publications, {} clinical trials",
            drugs.len(),
            publications.len(),
            clinical_trials.len()
        );
        let mut graph = Graph::new();

        // Phase 1: drug nodes
        for record in drugs {
            let id = graph.get_id_and_increment();
            graph.insert_node(Node::Drug(Drug {
                id,
                name: record.name.clone(),
                atccode: record.atccode.clone(),
            }))?;
            debug!("drug node {} ({})", id, record.name);
        }

        let detector =
            MentionDetector::new(graph.drugs(), self.config.scan_in_parallel(drugs.len()));

        // Phase 2: documents, journals, published + mention links
        for record in publications {
            self.add_document(&mut graph, &detector, record, DocumentKind::Publication)?;
        }
        for record in clinical_trials {
            self.add_document(&mut graph, &detector, record, DocumentKind::ClinicalTrial)?;
        }

        // Phase 3: drug → journal mentions
        if self.config.mentions.propagate_to_journals {
            let created = self.propagate_journal_mentions(&mut graph)?;
            info!("build_graph: {} journal mentions derived", created);
        }

        let stats = graph.stats();
        info!(
            "build_graph: done, {} nodes ({} journals), {} links",
            stats.total_nodes,
            graph.journals_lookup().len(),
            stats.total_links
        );
        Ok(graph)
    }

    fn add_document(
        &self,
        graph: &mut Graph,
        detector: &MentionDetector,
        record: &DocumentRecord,
        kind: DocumentKind,
    ) -> Result<EntityId> {
        let journal_id = graph.ensure_journal(&record.journal)?;

        let doc_id = graph.get_id_and_increment();
        graph.insert_node(kind.node(doc_id, record))?;
        debug!("{:?} node {} ({})", kind, doc_id, record.base_id);

        let link_id = graph.get_id_and_increment();
        graph.insert_link(Link::Published(PublishedLink {
            id: link_id,
            node_a: doc_id,
            node_b: journal_id,
            date: record.date,
        }))?;

        for drug_id in detector.mentioned_in(&record.title) {
            let link_id = graph.get_id_and_increment();
            graph.insert_link(Link::Mentioned(MentionedLink {
                id: link_id,
                node_a: drug_id,
                node_b: doc_id,
                date: record.date,
                mention_type: kind.mention_type(),
            }))?;
            debug!("mention link {}: drug {} in {}", link_id, drug_id, doc_id);
        }

        Ok(doc_id)
    }

    /// For every title mention, link the drug to the journal that published
    /// the document. One link per (drug, journal); the earliest mention wins.
    fn propagate_journal_mentions(&self, graph: &mut Graph) -> Result<usize> {
        let journal_of: AHashMap<EntityId, EntityId> = graph
            .published_links()
            .map(|link| (link.node_a, link.node_b))
            .collect();

        let mut seen: AHashSet<(EntityId, EntityId)> = graph
            .mentioned_links()
            .filter(|m| m.mention_type == MentionType::Journal)
            .map(|m| (m.node_a, m.node_b))
            .collect();

        let pending: Vec<_> = graph
            .mentioned_links()
            .filter(|m| m.mention_type != MentionType::Journal)
            .filter_map(|m| {
                journal_of
                    .get(&m.node_b)
                    .map(|&journal_id| (m.node_a, journal_id, m.date))
            })
            .filter(|&(drug_id, journal_id, _)| seen.insert((drug_id, journal_id)))
            .collect();

        for &(drug_id, journal_id, date) in &pending {
            let link_id = graph.get_id_and_increment();
            graph.insert_link(Link::Mentioned(MentionedLink {
                id: link_id,
                node_a: drug_id,
                node_b: journal_id,
                date,
                mention_type: MentionType::Journal,
            }))?;
        }
        Ok(pending.len())
    }
}
