//! Data models for synchronization bookkeeping

mod metadata;
mod names;
mod node;

pub use metadata::{ConflictChoice, DatabaseStatus, SyncMetadata};
pub use names::NameCache;
pub use node::{ModelNode, NodeDescriptor, NodeId, NodeRole};
