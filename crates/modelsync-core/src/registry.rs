//! Side-table attaching synchronization metadata to model nodes

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{ModelNode, NodeId, SyncMetadata};

/// Registry of one [`SyncMetadata`] record per synchronizable node
///
/// Keyed by node identity so any node type can participate without per-type
/// wrapper boilerplate. The registry also resolves the parent-diagram
/// relation that diagram children need for version and update queries:
/// the parent link is an identity lookup, never an owning reference.
///
/// Access is single-threaded by contract; callers serialize synchronization
/// work per model tree.
#[derive(Debug, Default)]
pub struct MetadataRegistry {
    records: HashMap<NodeId, SyncMetadata>,
}

impl MetadataRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and attach the metadata record for `node`
    ///
    /// A node gets exactly one record, bound at registration and kept for
    /// the node's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyRegistered`] if the node already has a record.
    pub fn register(&mut self, node: &impl ModelNode) -> Result<&mut SyncMetadata> {
        match self.records.entry(node.node_id().clone()) {
            Entry::Occupied(entry) => Err(Error::AlreadyRegistered(entry.key().clone())),
            Entry::Vacant(entry) => {
                let record = SyncMetadata::new(node);
                tracing::debug!("Attached sync metadata to {}", record.debug_name());
                Ok(entry.insert(record))
            }
        }
    }

    /// Get the metadata record for a node
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] if the node has no record.
    pub fn metadata(&self, id: &NodeId) -> Result<&SyncMetadata> {
        self.records
            .get(id)
            .ok_or_else(|| Error::NotRegistered(id.clone()))
    }

    /// Get mutable access to the metadata record for a node
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] if the node has no record.
    pub fn metadata_mut(&mut self, id: &NodeId) -> Result<&mut SyncMetadata> {
        self.records
            .get_mut(id)
            .ok_or_else(|| Error::NotRegistered(id.clone()))
    }

    /// Check whether a node has a record
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.records.contains_key(id)
    }

    /// Number of registered records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the registry holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = &SyncMetadata> {
        self.records.values()
    }

    /// Whether a node needs exporting
    ///
    /// Standalone nodes compare checksums. Diagram children answer with
    /// their owning diagram's state, walking parent links; a child whose
    /// diagram link is unset or dangling is treated as updated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] if the node has no record.
    pub fn is_updated(&self, id: &NodeId) -> Result<bool> {
        let mut record = self.metadata(id)?;
        loop {
            if !record.role().delegates_to_diagram() {
                return Ok(record.differs_from_database());
            }
            let Some(parent) = record.parent_diagram() else {
                return Ok(true);
            };
            match self.records.get(parent) {
                Some(parent_record) => record = parent_record,
                None => return Ok(true),
            }
        }
    }

    /// The version staged for a node by the in-progress export
    ///
    /// Diagram children report their owning diagram's staged version; a
    /// diagram object itself always reports its own, since it has its own
    /// row in the store. Without a resolvable parent, a child falls back to
    /// its local value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotRegistered`] if the node has no record.
    pub fn exported_version(&self, id: &NodeId) -> Result<u32> {
        let mut record = self.metadata(id)?;
        loop {
            if !record.role().delegates_to_diagram() {
                return Ok(record.exported_version());
            }
            match record.parent_diagram().and_then(|p| self.records.get(p)) {
                Some(parent_record) => record = parent_record,
                None => return Ok(record.exported_version()),
            }
        }
    }
}
