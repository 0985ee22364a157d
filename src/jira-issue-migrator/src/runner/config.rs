//! Runner configuration.

use crate::config::{Credentials, MigrationSettings};
use std::path::{Path, PathBuf};

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Tracker credentials and identifiers.
    credentials: Credentials,
    /// Lookup tables and tunables.
    settings: MigrationSettings,
    /// Root directory for per-repository ledgers.
    state_dir: PathBuf,
    /// Whether to preview issues without creating them.
    dry_run: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(
        credentials: Credentials,
        settings: MigrationSettings,
        state_dir: PathBuf,
        dry_run: bool,
    ) -> Self {
        Self {
            credentials,
            settings,
            state_dir,
            dry_run,
        }
    }

    /// Returns the tracker credentials.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the migration settings.
    pub fn settings(&self) -> &MigrationSettings {
        &self.settings
    }

    /// Returns the ledger root directory.
    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    /// Returns whether dry-run mode is enabled.
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}
