//! Plugin preference overrides for conflict handling

use serde::{Deserialize, Serialize};

use crate::models::{ConflictChoice, SyncMetadata};

/// Plugin-level synchronization preferences
///
/// A forced conflict choice takes precedence over every record's own
/// [`conflict_choice`](SyncMetadata::conflict_choice); leave it unset to let
/// each record decide. Persisted by the external preference store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncPreferences {
    /// Conflict resolution applied to every node, overriding per-record choices
    #[serde(default)]
    pub forced_conflict_choice: Option<ConflictChoice>,
}

impl SyncPreferences {
    /// The conflict choice in effect for `record`
    #[must_use]
    pub fn effective_conflict_choice(&self, record: &SyncMetadata) -> ConflictChoice {
        match self.forced_conflict_choice {
            Some(choice) => choice,
            None => record.conflict_choice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeDescriptor;
    use pretty_assertions::assert_eq;

    fn record() -> SyncMetadata {
        let node = NodeDescriptor::new("id-1", "ApplicationComponent", "Billing");
        SyncMetadata::new(&node)
    }

    #[test]
    fn defaults_defer_to_the_record() {
        let mut metadata = record();
        metadata.set_conflict_choice(ConflictChoice::DoNotExport);

        let prefs = SyncPreferences::default();
        assert_eq!(
            prefs.effective_conflict_choice(&metadata),
            ConflictChoice::DoNotExport
        );
    }

    #[test]
    fn forced_choice_overrides_the_record() {
        let mut metadata = record();
        metadata.set_conflict_choice(ConflictChoice::AskUser);

        let prefs = SyncPreferences {
            forced_conflict_choice: Some(ConflictChoice::ExportToDatabase),
        };
        assert_eq!(
            prefs.effective_conflict_choice(&metadata),
            ConflictChoice::ExportToDatabase
        );
    }
}
