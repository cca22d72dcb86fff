//! Per-node synchronization metadata record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::names::NameCache;
use crate::models::node::{ModelNode, NodeId, NodeRole};

/// What to do with a node when a conflict with the store is detected
///
/// Plugin preferences take precedence over this per-record choice; see
/// [`SyncPreferences`](crate::prefs::SyncPreferences).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConflictChoice {
    /// Defer the decision to an interactive collaborator
    #[default]
    AskUser,
    /// Keep the local state, skip the export
    DoNotExport,
    /// Overwrite the store with the local state
    ExportToDatabase,
    /// Overwrite the local state from the store
    ImportFromDatabase,
}

/// Last-observed coarse sync state of a node against the store
///
/// Advisory only: refreshed at discrete synchronization points, so it can go
/// stale. Checksum comparison is authoritative for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseStatus {
    /// Local and stored state matched at the last synchronization point
    IsSynced,
    /// Local state diverged from the store
    IsUpdated,
    /// Never exported to the store
    #[default]
    IsNew,
}

/// Synchronization state for one model node
///
/// Created together with its owning node and living exactly as long. Holds
/// the version and checksum bookkeeping the export and import workflows
/// operate on; the record itself performs no I/O and resolves no conflicts.
#[derive(Debug)]
pub struct SyncMetadata {
    node_id: NodeId,
    type_name: String,
    display_name: String,
    role: NodeRole,
    conflict_choice: ConflictChoice,
    database_status: DatabaseStatus,
    current_version: u32,
    exported_version: u32,
    database_version: u32,
    current_checksum: String,
    database_checksum: String,
    database_created_by: Option<String>,
    database_created_on: Option<DateTime<Utc>>,
    parent_diagram: Option<NodeId>,
    root_folder_type: i32,
    names: NameCache,
}

impl SyncMetadata {
    /// Create the record for `node`, capturing its identity
    ///
    /// # Panics
    ///
    /// Panics if the node's identifier or type name is empty. A record bound
    /// to an anonymous node is a programming defect, not a runtime condition.
    #[must_use]
    pub fn new(node: &impl ModelNode) -> Self {
        assert!(
            !node.node_id().is_empty(),
            "sync metadata requires a node with a stable identifier"
        );
        assert!(
            !node.type_name().is_empty(),
            "sync metadata requires a node with a type name"
        );

        Self {
            node_id: node.node_id().clone(),
            type_name: node.type_name().to_string(),
            display_name: node.display_name().to_string(),
            role: node.role(),
            conflict_choice: ConflictChoice::default(),
            database_status: DatabaseStatus::default(),
            current_version: 0,
            exported_version: 0,
            database_version: 0,
            current_checksum: String::new(),
            database_checksum: String::new(),
            database_created_by: None,
            database_created_on: None,
            parent_diagram: node.parent_diagram().cloned(),
            root_folder_type: 0,
            names: NameCache::default(),
        }
    }

    /// Identifier of the node this record describes
    pub const fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Type name of the owning node
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Display name of the owning node
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Structural role of the owning node
    pub const fn role(&self) -> NodeRole {
        self.role
    }

    /// Conflict resolution policy for this node
    pub const fn conflict_choice(&self) -> ConflictChoice {
        self.conflict_choice
    }

    pub fn set_conflict_choice(&mut self, choice: ConflictChoice) {
        self.conflict_choice = choice;
    }

    /// Coarse sync state recorded at the last synchronization point
    pub const fn database_status(&self) -> DatabaseStatus {
        self.database_status
    }

    pub fn set_database_status(&mut self, status: DatabaseStatus) {
        self.database_status = status;
    }

    /// Version after the last successful import or committed export
    pub const fn current_version(&self) -> u32 {
        self.current_version
    }

    pub fn set_current_version(&mut self, version: u32) {
        self.current_version = version;
    }

    /// Version staged by the in-progress export, local value only
    ///
    /// Diagram children must resolve this through the registry, which
    /// forwards the query to the owning diagram.
    pub const fn exported_version(&self) -> u32 {
        self.exported_version
    }

    pub fn set_exported_version(&mut self, version: u32) {
        self.exported_version = version;
    }

    /// Version read from the store on the last connect or import
    pub const fn database_version(&self) -> u32 {
        self.database_version
    }

    pub fn set_database_version(&mut self, version: u32) {
        self.database_version = version;
    }

    /// Checksum of the node's content, recomputed by the caller
    #[must_use]
    pub fn current_checksum(&self) -> &str {
        &self.current_checksum
    }

    pub fn set_current_checksum(&mut self, checksum: impl Into<String>) {
        self.current_checksum = checksum.into();
    }

    /// Checksum read from the store on the last connect or import
    #[must_use]
    pub fn database_checksum(&self) -> &str {
        &self.database_checksum
    }

    pub fn set_database_checksum(&mut self, checksum: impl Into<String>) {
        self.database_checksum = checksum.into();
    }

    /// Author recorded by the store, if any
    #[must_use]
    pub fn database_created_by(&self) -> Option<&str> {
        self.database_created_by.as_deref()
    }

    pub fn set_database_created_by(&mut self, username: Option<String>) {
        self.database_created_by = username;
    }

    /// Creation time recorded by the store, if any
    pub const fn database_created_on(&self) -> Option<DateTime<Utc>> {
        self.database_created_on
    }

    pub fn set_database_created_on(&mut self, timestamp: Option<DateTime<Utc>>) {
        self.database_created_on = timestamp;
    }

    /// Owning diagram, set only for diagram children
    pub const fn parent_diagram(&self) -> Option<&NodeId> {
        self.parent_diagram.as_ref()
    }

    pub fn set_parent_diagram(&mut self, parent: Option<NodeId>) {
        self.parent_diagram = parent;
    }

    /// Root folder classification for folder nodes
    ///
    /// User-created folders carry 0; the root folder they sit under still
    /// constrains what they may contain.
    pub const fn root_folder_type(&self) -> i32 {
        self.root_folder_type
    }

    pub fn set_root_folder_type(&mut self, folder_type: i32) {
        self.root_folder_type = folder_type;
    }

    /// Whether the node's content differs from what the store last recorded
    ///
    /// Compares checksums rather than consulting `database_status`: the
    /// status is only refreshed at discrete synchronization points, while
    /// the caller recomputes the checksum on demand.
    #[must_use]
    pub fn differs_from_database(&self) -> bool {
        self.current_checksum != self.database_checksum
    }

    /// Promote the staged export version to the current version
    ///
    /// Called by the export workflow exactly when its transaction commits.
    /// An aborted transaction leaves `current_version` untouched.
    pub fn commit_export(&mut self) {
        self.current_version = self.exported_version;
    }

    /// `<type name>:"<display name>"`, computed once and cached
    pub fn full_name(&self) -> &str {
        self.names
            .full_name(|| format!("{}:\"{}\"", self.type_name, self.display_name))
    }

    /// [`full_name`](Self::full_name) plus the node identifier, cached
    pub fn debug_name(&self) -> &str {
        self.names
            .debug_name(|| format!("{}({})", self.full_name(), self.node_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::node::NodeDescriptor;
    use pretty_assertions::assert_eq;

    fn billing_component() -> NodeDescriptor {
        NodeDescriptor::new("id-1", "ApplicationComponent", "Billing")
    }

    #[test]
    fn test_new_record_defaults() {
        let metadata = SyncMetadata::new(&billing_component());
        assert_eq!(metadata.conflict_choice(), ConflictChoice::AskUser);
        assert_eq!(metadata.database_status(), DatabaseStatus::IsNew);
        assert_eq!(metadata.current_version(), 0);
        assert_eq!(metadata.exported_version(), 0);
        assert_eq!(metadata.database_version(), 0);
        assert_eq!(metadata.current_checksum(), "");
        assert_eq!(metadata.database_checksum(), "");
        assert_eq!(metadata.database_created_by(), None);
        assert_eq!(metadata.database_created_on(), None);
        assert_eq!(metadata.root_folder_type(), 0);
    }

    #[test]
    #[should_panic(expected = "stable identifier")]
    fn test_new_rejects_empty_identifier() {
        let node = NodeDescriptor::new("", "ApplicationComponent", "Billing");
        let _ = SyncMetadata::new(&node);
    }

    #[test]
    fn test_matching_checksums_mean_unchanged() {
        let mut metadata = SyncMetadata::new(&billing_component());
        metadata.set_current_checksum("abc");
        metadata.set_database_checksum("abc");
        assert!(!metadata.differs_from_database());
    }

    #[test]
    fn test_diverged_checksums_mean_changed() {
        let mut metadata = SyncMetadata::new(&billing_component());
        metadata.set_current_checksum("abc");
        metadata.set_database_checksum("xyz");
        assert!(metadata.differs_from_database());
    }

    #[test]
    fn test_commit_promotes_exported_version() {
        let mut metadata = SyncMetadata::new(&billing_component());
        metadata.set_exported_version(4);
        assert_eq!(metadata.current_version(), 0);

        metadata.commit_export();
        assert_eq!(metadata.current_version(), 4);
    }

    #[test]
    fn test_full_name_format() {
        let metadata = SyncMetadata::new(&billing_component());
        assert_eq!(metadata.full_name(), "ApplicationComponent:\"Billing\"");
        assert_eq!(metadata.full_name(), "ApplicationComponent:\"Billing\"");
    }

    #[test]
    fn test_debug_name_appends_identifier() {
        let metadata = SyncMetadata::new(&billing_component());
        assert_eq!(
            metadata.debug_name(),
            "ApplicationComponent:\"Billing\"(id-1)"
        );
    }

    #[test]
    fn test_import_mirrors_store_state() {
        let mut metadata = SyncMetadata::new(&billing_component());
        metadata.set_database_version(2);
        metadata.set_database_checksum("abc");
        metadata.set_current_version(2);
        metadata.set_current_checksum("abc");
        metadata.set_database_status(DatabaseStatus::IsSynced);

        assert_eq!(metadata.database_version(), 2);
        assert_eq!(metadata.database_status(), DatabaseStatus::IsSynced);
        assert!(!metadata.differs_from_database());
    }

    #[test]
    fn test_store_audit_fields_roundtrip() {
        let mut metadata = SyncMetadata::new(&billing_component());
        let exported_at = Utc::now();
        metadata.set_database_created_by(Some("herve".to_string()));
        metadata.set_database_created_on(Some(exported_at));
        assert_eq!(metadata.database_created_by(), Some("herve"));
        assert_eq!(metadata.database_created_on(), Some(exported_at));
    }
}
