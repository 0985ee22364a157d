//! Record of tickets already migrated to a repository.
//!
//! Re-running a migration skips every key the ledger contains, so a run that
//! stopped halfway can simply be started again.

mod error;
mod file;

pub use error::LedgerError;
pub use file::{FileLedger, MAPPING_FILE, STATE_FILE};

/// Append-only store of migrated keys and the issues they became.
pub trait MigrationLedger {
    /// Returns true if `key` was already migrated.
    fn contains(&self, key: &str) -> bool;

    /// Marks `key` as migrated.
    fn append(&mut self, key: &str) -> Result<(), LedgerError>;

    /// Logs that issue `issue_number` was created from `key`.
    fn record_mapping(&mut self, issue_number: u64, key: &str) -> Result<(), LedgerError>;

    /// Adds a free-form line to the mapping log.
    fn annotate(&mut self, note: &str) -> Result<(), LedgerError>;

    /// Number of migrated keys.
    fn len(&self) -> usize;

    /// Returns true if nothing was migrated yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory ledger, used for dry runs and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryLedger {
    keys: Vec<String>,
    mapping: Vec<String>,
}

impl MemoryLedger {
    /// Creates a ledger pre-populated with `keys`.
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            mapping: Vec::new(),
        }
    }

    /// Returns migrated keys in order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns mapping log lines in order.
    #[must_use]
    pub fn mapping(&self) -> &[String] {
        &self.mapping
    }
}

impl MigrationLedger for MemoryLedger {
    fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    fn append(&mut self, key: &str) -> Result<(), LedgerError> {
        self.keys.push(key.to_string());
        Ok(())
    }

    fn record_mapping(&mut self, issue_number: u64, key: &str) -> Result<(), LedgerError> {
        self.mapping.push(format!("{issue_number}: {key}"));
        Ok(())
    }

    fn annotate(&mut self, note: &str) -> Result<(), LedgerError> {
        self.mapping.push(note.to_string());
        Ok(())
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
