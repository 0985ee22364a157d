//! Display name to GitHub handle resolution.

use crate::config::MigrationSettings;
use std::collections::{BTreeMap, BTreeSet};

/// Static display-name table plus the handles allowed to be assigned.
#[derive(Debug, Clone, Default)]
pub struct AssigneeDirectory {
    handles: BTreeMap<String, String>,
    assignable: BTreeSet<String>,
}

impl AssigneeDirectory {
    /// Creates a directory from explicit tables.
    #[must_use]
    pub fn new(handles: BTreeMap<String, String>, assignable: BTreeSet<String>) -> Self {
        Self {
            handles,
            assignable,
        }
    }

    /// Creates a directory from migration settings.
    #[must_use]
    pub fn from_settings(settings: &MigrationSettings) -> Self {
        Self::new(settings.assignees.clone(), settings.assignable.clone())
    }

    /// Resolves a Jira display name, returning an empty string if unknown.
    #[must_use]
    pub fn resolve(&self, display_name: Option<&str>) -> String {
        display_name
            .and_then(|name| self.handles.get(name))
            .map(|handle| handle.trim().to_string())
            .unwrap_or_default()
    }

    /// Returns true if `handle` may be assigned.
    #[must_use]
    pub fn is_assignable(&self, handle: &str) -> bool {
        !handle.is_empty() && self.assignable.contains(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> AssigneeDirectory {
        AssigneeDirectory::new(
            BTreeMap::from([
                ("Ada Lovelace".to_string(), "ada".to_string()),
                ("Charles Babbage".to_string(), "cbabbage".to_string()),
            ]),
            BTreeSet::from(["ada".to_string()]),
        )
    }

    #[test]
    fn can_resolve_known_name() {
        assert_eq!(directory().resolve(Some("Ada Lovelace")), "ada");
    }

    #[test]
    fn unknown_or_missing_name_is_empty() {
        assert_eq!(directory().resolve(Some("Grace Hopper")), "");
        assert_eq!(directory().resolve(None), "");
    }

    #[test]
    fn only_allow_listed_handles_are_assignable() {
        let directory = directory();

        assert!(directory.is_assignable("ada"));
        assert!(!directory.is_assignable("cbabbage"));
        assert!(!directory.is_assignable(""));
    }
}
