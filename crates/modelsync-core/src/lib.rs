//! modelsync-core - Synchronization bookkeeping for model graphs
//!
//! Tracks, per node of an in-memory model graph, its synchronization state
//! against a backing relational store: version numbers, content checksums,
//! conflict-resolution policy, and the derived needs-export signal.
//! Database access, checksum computation, and conflict UI live in the
//! collaborators that consume this crate.

pub mod error;
pub mod models;
pub mod prefs;
pub mod registry;

pub use error::{Error, Result};
pub use models::{
    ConflictChoice, DatabaseStatus, ModelNode, NodeDescriptor, NodeId, NodeRole, SyncMetadata,
};
pub use prefs::SyncPreferences;
pub use registry::MetadataRegistry;
