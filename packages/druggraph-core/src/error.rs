//! Error types for druggraph-core

use std::fmt;
use thiserror::Error;

use crate::domain::ids::EntityId;

/// Graph error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or incomplete serialized graph / record
    Decode,
    /// Two nodes (or two links) carry the same id
    DuplicateIdentifier,
    /// A link endpoint does not resolve to a node of the graph
    DanglingEndpoint,
    /// A link joins nodes of the wrong types
    InvalidLink,
    /// I/O errors while loading or saving a graph
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Decode => "decode",
            ErrorKind::DuplicateIdentifier => "duplicate_identifier",
            ErrorKind::DanglingEndpoint => "dangling_endpoint",
            ErrorKind::InvalidLink => "invalid_link",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Graph error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct GraphError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl GraphError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    pub fn duplicate_node(id: EntityId) -> Self {
        Self::new(
            ErrorKind::DuplicateIdentifier,
            format!("Duplicate node id: {}", id),
        )
    }

    pub fn duplicate_link(id: EntityId) -> Self {
        Self::new(
            ErrorKind::DuplicateIdentifier,
            format!("Duplicate link id: {}", id),
        )
    }

    pub fn duplicate_journal(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateIdentifier,
            format!("Duplicate journal name: {:?}", name),
        )
    }

    pub fn invalid_link(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidLink, message)
    }

    pub fn dangling_endpoint(link_id: EntityId, node_id: EntityId) -> Self {
        Self::new(
            ErrorKind::DanglingEndpoint,
            format!("Link {} references unknown node {}", link_id, node_id),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::decode(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GraphError>;
