//! The drug / publication / trial / journal graph
//!
//! Owns every node and link, the journal-name lookup index and the id
//! counter. Nodes and links are kept in id order, so iteration and
//! serialization are deterministic.
//!
//! Mutation goes through [`Graph::insert_node`] and [`Graph::insert_link`],
//! which enforce the graph invariants:
//!
//! - ids are unique across nodes and links
//! - a journal name maps to at most one journal node
//! - both link endpoints exist and have the types the link kind requires

use std::collections::BTreeMap;

use ahash::AHashMap;
use serde::Serialize;

use super::ids::{EntityId, IdAllocator};
use super::link::{Link, LinkKind, MentionType, MentionedLink, PublishedLink};
use super::node::{Drug, Journal, Node, NodeKind};
use crate::error::{GraphError, Result};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub(crate) ids: IdAllocator,
    pub(crate) nodes: BTreeMap<EntityId, Node>,
    pub(crate) links: BTreeMap<EntityId, Link>,
    /// journal name → journal node id
    pub(crate) journals_lookup: AHashMap<String, EntityId>,
}

impl Graph {
    /// Empty graph with the id counter at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current id counter value, then advances it
    #[inline]
    pub fn get_id_and_increment(&mut self) -> EntityId {
        self.ids.get_id_and_increment()
    }

    /// Value the next allocated id will take
    #[inline]
    pub fn id_state(&self) -> EntityId {
        self.ids.state()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Mutation
    // ═══════════════════════════════════════════════════════════════════════

    /// Add a node under its own id
    ///
    /// Journals are registered in the name lookup; a second journal with an
    /// already registered name is rejected.
    pub fn insert_node(&mut self, node: Node) -> Result<EntityId> {
        let id = node.id();
        if self.nodes.contains_key(&id) || self.links.contains_key(&id) {
            return Err(GraphError::duplicate_node(id));
        }
        if let Node::Journal(journal) = &node {
            if self.journals_lookup.contains_key(&journal.name) {
                return Err(GraphError::duplicate_journal(&journal.name));
            }
            self.journals_lookup.insert(journal.name.clone(), id);
        }
        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Add a link under its own id, after checking both endpoints
    pub fn insert_link(&mut self, link: Link) -> Result<EntityId> {
        let id = link.id();
        if self.links.contains_key(&id) || self.nodes.contains_key(&id) {
            return Err(GraphError::duplicate_link(id));
        }
        self.check_endpoints(&link)?;
        self.links.insert(id, link);
        Ok(id)
    }

    /// Journal registered under `name`, created with a fresh id when absent
    pub fn ensure_journal(&mut self, name: &str) -> Result<EntityId> {
        if let Some(&id) = self.journals_lookup.get(name) {
            return Ok(id);
        }
        let id = self.get_id_and_increment();
        self.insert_node(Node::Journal(Journal::new(id, name)))
    }

    fn check_endpoints(&self, link: &Link) -> Result<()> {
        let node_a = self
            .nodes
            .get(&link.node_a())
            .ok_or_else(|| GraphError::dangling_endpoint(link.id(), link.node_a()))?;
        let node_b = self
            .nodes
            .get(&link.node_b())
            .ok_or_else(|| GraphError::dangling_endpoint(link.id(), link.node_b()))?;

        match link {
            Link::Published(_) => {
                if !node_a.is_document() {
                    return Err(GraphError::invalid_link(format!(
                        "published_link {}: node_a must be a publication or clinical trial, got {}",
                        link.id(),
                        node_a.kind()
                    )));
                }
                if node_b.kind() != NodeKind::Journal {
                    return Err(GraphError::invalid_link(format!(
                        "published_link {}: node_b must be a journal, got {}",
                        link.id(),
                        node_b.kind()
                    )));
                }
            }
            Link::Mentioned(mention) => {
                if node_a.kind() != NodeKind::Drug {
                    return Err(GraphError::invalid_link(format!(
                        "mentionned_link {}: node_a must be a drug, got {}",
                        link.id(),
                        node_a.kind()
                    )));
                }
                if MentionType::for_target(node_b.kind()) != Some(mention.mention_type) {
                    return Err(GraphError::invalid_link(format!(
                        "mentionned_link {}: mention_type {} does not match {} node {}",
                        link.id(),
                        mention.mention_type,
                        node_b.kind(),
                        node_b.id()
                    )));
                }
            }
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Read access
    // ═══════════════════════════════════════════════════════════════════════

    #[inline]
    pub fn node(&self, id: EntityId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[inline]
    pub fn link(&self, id: EntityId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// All nodes in id order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// All links in id order
    pub fn links(&self) -> impl Iterator<Item = &Link> + '_ {
        self.links.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// journal name → journal node id
    pub fn journals_lookup(&self) -> &AHashMap<String, EntityId> {
        &self.journals_lookup
    }

    pub fn drugs(&self) -> impl Iterator<Item = &Drug> + '_ {
        self.nodes.values().filter_map(Node::as_drug)
    }

    pub fn journals(&self) -> impl Iterator<Item = &Journal> + '_ {
        self.nodes.values().filter_map(Node::as_journal)
    }

    /// Publications and clinical trials
    pub fn documents(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values().filter(|n| n.is_document())
    }

    pub fn published_links(&self) -> impl Iterator<Item = &PublishedLink> + '_ {
        self.links.values().filter_map(Link::as_published)
    }

    pub fn mentioned_links(&self) -> impl Iterator<Item = &MentionedLink> + '_ {
        self.links.values().filter_map(Link::as_mentioned)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lookups (absence is an empty result, never an error)
    // ═══════════════════════════════════════════════════════════════════════

    /// Drug nodes whose name equals one of `names`
    pub fn look_for_drug_by_names<S: AsRef<str>>(&self, names: &[S]) -> Vec<&Drug> {
        self.drugs()
            .filter(|drug| names.iter().any(|n| n.as_ref() == drug.name))
            .collect()
    }

    /// Journal registered under `name` (O(1))
    pub fn look_for_journal(&self, name: &str) -> Option<&Journal> {
        self.journals_lookup
            .get(name)
            .and_then(|id| self.nodes.get(id))
            .and_then(Node::as_journal)
    }

    /// Every published link pointing at journal `journal_id`
    pub fn look_for_journal_link(&self, journal_id: EntityId) -> Vec<&PublishedLink> {
        self.published_links()
            .filter(|link| link.node_b == journal_id)
            .collect()
    }

    /// Every link, of any kind, joining the two nodes in either direction
    pub fn look_for_links_by_nodes(&self, node_a: EntityId, node_b: EntityId) -> Vec<&Link> {
        self.links
            .values()
            .filter(|link| link.connects(node_a, node_b))
            .collect()
    }

    /// Published link of a publication or clinical trial
    pub fn published_link_of(&self, document_id: EntityId) -> Option<&PublishedLink> {
        self.published_links()
            .find(|link| link.node_a == document_id)
    }

    /// Links touching any of `node_ids`, optionally restricted to one kind
    pub fn links_touching(&self, node_ids: &[EntityId], kind: Option<LinkKind>) -> Vec<&Link> {
        self.links
            .values()
            .filter(|link| kind.map_or(true, |k| link.kind() == k))
            .filter(|link| node_ids.iter().any(|&id| link.touches(id)))
            .collect()
    }

    /// Mention links of the named drugs, keyed by drug name
    ///
    /// Drugs sharing a name (no drug dedup) are merged under that name.
    pub fn get_drugs_mentions<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> BTreeMap<String, Vec<&MentionedLink>> {
        let mut mentions: BTreeMap<String, Vec<&MentionedLink>> = BTreeMap::new();
        for drug in self.look_for_drug_by_names(names) {
            let links = self
                .mentioned_links()
                .filter(|link| link.node_a == drug.id);
            mentions
                .entry(drug.name.clone())
                .or_default()
                .extend(links);
        }
        mentions
    }

    /// Node and link counts by type
    pub fn stats(&self) -> GraphStats {
        let mut nodes_by_kind = BTreeMap::new();
        for node in self.nodes.values() {
            *nodes_by_kind.entry(node.kind()).or_insert(0) += 1;
        }

        let mut links_by_kind = BTreeMap::new();
        let mut mentions_by_type = BTreeMap::new();
        for link in self.links.values() {
            *links_by_kind.entry(link.kind()).or_insert(0) += 1;
            if let Link::Mentioned(m) = link {
                *mentions_by_type.entry(m.mention_type).or_insert(0) += 1;
            }
        }

        GraphStats {
            total_nodes: self.nodes.len(),
            total_links: self.links.len(),
            nodes_by_kind,
            links_by_kind,
            mentions_by_type,
        }
    }
}

/// Graph statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_links: usize,
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    pub links_by_kind: BTreeMap<LinkKind, usize>,
    pub mentions_by_type: BTreeMap<MentionType, usize>,
}
