//! Identifier allocation
//!
//! Nodes and links draw from one counter, so an id is unique across the whole
//! graph. The counter lives in the graph it numbers.

use serde::{Deserialize, Serialize};

/// Graph-assigned identifier of a node or a link
pub type EntityId = u64;

/// Monotonic id counter owned by one graph
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdAllocator {
    next: EntityId,
}

impl IdAllocator {
    /// Counter starting at 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter resuming from a persisted state
    pub fn resume(next: EntityId) -> Self {
        Self { next }
    }

    /// Returns the current value, then advances the counter by one
    #[inline]
    pub fn get_id_and_increment(&mut self) -> EntityId {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Value the next allocation will return
    #[inline]
    pub fn state(&self) -> EntityId {
        self.next
    }
}
