//! Graph reports
//!
//! Both reports only read the graph and return serializable rows, so the
//! CLI can print them as JSON.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{EntityId, Graph, MentionType, Node, NodeKind};

/// One node mentioning a drug, dated by the mention link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrugMentionEntry {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub id: EntityId,
    /// Title for documents, name for journals
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_id: Option<String>,
    pub mention_type: MentionType,
    pub date: NaiveDate,
}

/// Mentions of each requested drug, keyed by drug name
///
/// Unknown names are absent from the result. Drugs sharing a name are merged.
pub fn drug_mentions<S: AsRef<str>>(
    graph: &Graph,
    names: &[S],
) -> BTreeMap<String, Vec<DrugMentionEntry>> {
    graph
        .get_drugs_mentions(names)
        .into_iter()
        .map(|(name, links)| {
            let entries = links
                .into_iter()
                .filter_map(|link| {
                    let node = graph.node(link.node_b)?;
                    let base_id = match node {
                        Node::Publication(p) => Some(p.base_id.clone()),
                        Node::ClinicalTrial(t) => Some(t.base_id.clone()),
                        _ => None,
                    };
                    Some(DrugMentionEntry {
                        kind: node.kind(),
                        id: node.id(),
                        label: node.label().to_string(),
                        base_id,
                        mention_type: link.mention_type,
                        date: link.date,
                    })
                })
                .collect();
            (name, entries)
        })
        .collect()
}

/// Number of distinct drug names mentioned in one journal's documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalMentionCount {
    pub journal: String,
    pub journal_id: EntityId,
    pub distinct_drugs: usize,
}

/// Journals ranked by the number of distinct drug names appearing in the
/// titles they published, highest first, ties by journal name
///
/// Goes through published links, so derived journal mentions are not needed.
/// Journals without any mention are left out.
pub fn journals_with_distinct_mentions(graph: &Graph) -> Vec<JournalMentionCount> {
    let journal_of: AHashMap<EntityId, EntityId> = graph
        .published_links()
        .map(|link| (link.node_a, link.node_b))
        .collect();

    let mut drugs_per_journal: AHashMap<EntityId, BTreeSet<&str>> = AHashMap::new();
    for mention in graph.mentioned_links() {
        let journal_id = match mention.mention_type {
            MentionType::Journal => Some(mention.node_b),
            _ => journal_of.get(&mention.node_b).copied(),
        };
        let drug_name = graph
            .node(mention.node_a)
            .and_then(|n| n.as_drug())
            .map(|d| d.name.as_str());
        if let (Some(journal_id), Some(drug_name)) = (journal_id, drug_name) {
            drugs_per_journal
                .entry(journal_id)
                .or_default()
                .insert(drug_name);
        }
    }

    let mut counts: Vec<JournalMentionCount> = drugs_per_journal
        .into_iter()
        .filter_map(|(journal_id, drugs)| {
            let journal = graph.node(journal_id)?.as_journal()?;
            Some(JournalMentionCount {
                journal: journal.name.clone(),
                journal_id,
                distinct_drugs: drugs.len(),
            })
        })
        .collect();

    counts.sort_by(|a, b| {
        b.distinct_drugs
            .cmp(&a.distinct_drugs)
            .then_with(|| a.journal.cmp(&b.journal))
    });
    counts
}
