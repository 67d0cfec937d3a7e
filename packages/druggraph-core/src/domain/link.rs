//! Graph links
//!
//! Links are directed: `node_a` is always the source of the relation.
//!
//! - `published_link`: publication / clinical trial → journal
//! - `mentionned_link`: drug → publication / clinical trial (or journal when
//!   journal mentions are propagated)
//!
//! The `mentionned_link` spelling is part of the persisted format.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::node::NodeKind;

/// Link type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LinkKind {
    #[serde(rename = "published_link")]
    Published,
    #[serde(rename = "mentionned_link")]
    Mentioned,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Published => "published_link",
            LinkKind::Mentioned => "mentionned_link",
        }
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of node a drug was mentioned in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentionType {
    Publication,
    ClinicalTrial,
    Journal,
}

impl MentionType {
    /// Mention type matching the concrete type of the mentioned-in node
    pub fn for_target(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::Publication => Some(MentionType::Publication),
            NodeKind::ClinicalTrial => Some(MentionType::ClinicalTrial),
            NodeKind::Journal => Some(MentionType::Journal),
            NodeKind::Drug => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MentionType::Publication => "publication",
            MentionType::ClinicalTrial => "clinical_trial",
            MentionType::Journal => "journal",
        }
    }
}

impl std::fmt::Display for MentionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A publication or clinical trial (`node_a`) appeared in a journal (`node_b`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedLink {
    pub id: EntityId,
    pub node_a: EntityId,
    pub node_b: EntityId,
    pub date: NaiveDate,
}

/// A drug (`node_a`) is named in the title of `node_b`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionedLink {
    pub id: EntityId,
    pub node_a: EntityId,
    pub node_b: EntityId,
    pub date: NaiveDate,
    pub mention_type: MentionType,
}

/// Any graph link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Link {
    #[serde(rename = "published_link")]
    Published(PublishedLink),
    #[serde(rename = "mentionned_link")]
    Mentioned(MentionedLink),
}

impl Link {
    #[inline]
    pub fn id(&self) -> EntityId {
        match self {
            Link::Published(l) => l.id,
            Link::Mentioned(l) => l.id,
        }
    }

    #[inline]
    pub fn kind(&self) -> LinkKind {
        match self {
            Link::Published(_) => LinkKind::Published,
            Link::Mentioned(_) => LinkKind::Mentioned,
        }
    }

    #[inline]
    pub fn node_a(&self) -> EntityId {
        match self {
            Link::Published(l) => l.node_a,
            Link::Mentioned(l) => l.node_a,
        }
    }

    #[inline]
    pub fn node_b(&self) -> EntityId {
        match self {
            Link::Published(l) => l.node_b,
            Link::Mentioned(l) => l.node_b,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Link::Published(l) => l.date,
            Link::Mentioned(l) => l.date,
        }
    }

    /// True when the link joins `x` and `y`, in either direction
    pub fn connects(&self, x: EntityId, y: EntityId) -> bool {
        let (a, b) = (self.node_a(), self.node_b());
        (a == x && b == y) || (a == y && b == x)
    }

    /// True when either endpoint is `node_id`
    pub fn touches(&self, node_id: EntityId) -> bool {
        self.node_a() == node_id || self.node_b() == node_id
    }

    pub fn as_published(&self) -> Option<&PublishedLink> {
        match self {
            Link::Published(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_mentioned(&self) -> Option<&MentionedLink> {
        match self {
            Link::Mentioned(l) => Some(l),
            _ => None,
        }
    }
}

impl From<PublishedLink> for Link {
    fn from(l: PublishedLink) -> Self {
        Link::Published(l)
    }
}

impl From<MentionedLink> for Link {
    fn from(l: MentionedLink) -> Self {
        Link::Mentioned(l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_mention_type_for_target() {
        assert_eq!(
            MentionType::for_target(NodeKind::Publication),
            Some(MentionType::Publication)
        );
        assert_eq!(
            MentionType::for_target(NodeKind::ClinicalTrial),
            Some(MentionType::ClinicalTrial)
        );
        assert_eq!(
            MentionType::for_target(NodeKind::Journal),
            Some(MentionType::Journal)
        );
        assert_eq!(MentionType::for_target(NodeKind::Drug), None);
    }

    #[test]
    fn test_mentioned_link_wire_format() {
        let link = Link::Mentioned(MentionedLink {
            id: 4,
            node_a: 0,
            node_b: 2,
            date: date("2020-01-01"),
            mention_type: MentionType::Publication,
        });

        assert_eq!(
            serde_json::to_value(&link).unwrap(),
            json!({
                "type": "mentionned_link",
                "id": 4,
                "node_a": 0,
                "node_b": 2,
                "date": "2020-01-01",
                "mention_type": "publication",
            })
        );
    }

    #[test]
    fn test_published_link_parse() {
        let value = json!({
            "type": "published_link",
            "id": 3,
            "node_a": 2,
            "node_b": 1,
            "date": "2019-01-01",
        });
        let link: Link = serde_json::from_value(value).unwrap();
        assert_eq!(link.kind(), LinkKind::Published);
        assert_eq!((link.node_a(), link.node_b()), (2, 1));
        assert_eq!(link.date(), date("2019-01-01"));
    }

    #[test]
    fn test_mentioned_link_requires_mention_type() {
        let value = json!({
            "type": "mentionned_link",
            "id": 3,
            "node_a": 0,
            "node_b": 1,
            "date": "2019-01-01",
        });
        assert!(serde_json::from_value::<Link>(value).is_err());
    }

    #[test]
    fn test_date_with_time_rejected() {
        let value = json!({
            "type": "published_link",
            "id": 3,
            "node_a": 2,
            "node_b": 1,
            "date": "2019-01-01T00:00:00Z",
        });
        assert!(serde_json::from_value::<Link>(value).is_err());
    }

    #[test]
    fn test_connects_either_direction() {
        let link = Link::Published(PublishedLink {
            id: 9,
            node_a: 2,
            node_b: 1,
            date: date("2019-01-01"),
        });
        assert!(link.connects(2, 1));
        assert!(link.connects(1, 2));
        assert!(!link.connects(2, 3));
        assert!(link.touches(1));
        assert!(!link.touches(9));
    }
}
