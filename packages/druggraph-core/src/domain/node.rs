//! Graph nodes
//!
//! A closed set of node variants, each serialized with a `type` discriminator:
//! `drug`, `journal`, `publication` or `clinical_trial`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::EntityId;

/// Node type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Drug,
    Journal,
    Publication,
    ClinicalTrial,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Drug => "drug",
            NodeKind::Journal => "journal",
            NodeKind::Publication => "publication",
            NodeKind::ClinicalTrial => "clinical_trial",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A drug (molecule)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drug {
    pub id: EntityId,
    pub name: String,
    /// ATC classification code from the source drug table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atccode: Option<String>,
}

impl Drug {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            atccode: None,
        }
    }

    /// Case-insensitive substring test of the drug name against `content`.
    ///
    /// This is a raw substring test: "aspirin" matches "aspirinated", and a
    /// one-letter name matches nearly everything and an empty name matches
    /// every content.
    pub fn is_name_mentioned(&self, content: &str) -> bool {
        content.to_lowercase().contains(&self.name.to_lowercase())
    }
}

/// A journal; unique by name within a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: EntityId,
    pub name: String,
}

impl Journal {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A PubMed publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: EntityId,
    /// Identifier in the source system (PubMed id)
    pub base_id: String,
    pub title: String,
    pub date: NaiveDate,
}

/// A registered clinical trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalTrial {
    pub id: EntityId,
    /// Identifier in the source registry (e.g. NCT number)
    pub base_id: String,
    pub title: String,
    pub date: NaiveDate,
}

/// Any graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Drug(Drug),
    Journal(Journal),
    Publication(Publication),
    ClinicalTrial(ClinicalTrial),
}

impl Node {
    #[inline]
    pub fn id(&self) -> EntityId {
        match self {
            Node::Drug(n) => n.id,
            Node::Journal(n) => n.id,
            Node::Publication(n) => n.id,
            Node::ClinicalTrial(n) => n.id,
        }
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Drug(_) => NodeKind::Drug,
            Node::Journal(_) => NodeKind::Journal,
            Node::Publication(_) => NodeKind::Publication,
            Node::ClinicalTrial(_) => NodeKind::ClinicalTrial,
        }
    }

    /// Title of a publication or clinical trial
    pub fn title(&self) -> Option<&str> {
        match self {
            Node::Publication(n) => Some(&n.title),
            Node::ClinicalTrial(n) => Some(&n.title),
            _ => None,
        }
    }

    /// Human-readable label: the title for documents, the name otherwise
    pub fn label(&self) -> &str {
        match self {
            Node::Drug(n) => &n.name,
            Node::Journal(n) => &n.name,
            Node::Publication(n) => &n.title,
            Node::ClinicalTrial(n) => &n.title,
        }
    }

    /// Publication date of a publication or clinical trial
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Node::Publication(n) => Some(n.date),
            Node::ClinicalTrial(n) => Some(n.date),
            _ => None,
        }
    }

    pub fn as_drug(&self) -> Option<&Drug> {
        match self {
            Node::Drug(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_journal(&self) -> Option<&Journal> {
        match self {
            Node::Journal(n) => Some(n),
            _ => None,
        }
    }

    /// True for publications and clinical trials
    #[inline]
    pub fn is_document(&self) -> bool {
        matches!(self, Node::Publication(_) | Node::ClinicalTrial(_))
    }
}

impl From<Drug> for Node {
    fn from(n: Drug) -> Self {
        Node::Drug(n)
    }
}

impl From<Journal> for Node {
    fn from(n: Journal) -> Self {
        Node::Journal(n)
    }
}

impl From<Publication> for Node {
    fn from(n: Publication) -> Self {
        Node::Publication(n)
    }
}

impl From<ClinicalTrial> for Node {
    fn from(n: ClinicalTrial) -> Self {
        Node::ClinicalTrial(n)
    }
}
