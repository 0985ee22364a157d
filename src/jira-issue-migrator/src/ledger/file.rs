//! File-backed ledger.

use super::{LedgerError, MigrationLedger};
use crate::config::RepositoryId;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Comma-joined list of migrated keys.
pub const STATE_FILE: &str = "alreadyCreated.txt";

/// `<number>: <key>` lines, one per created issue.
pub const MAPPING_FILE: &str = "mapping.txt";

/// Ledger stored under `<state_dir>/<owner>/<repo>/`.
///
/// The directory is created on the first write.
#[derive(Debug)]
pub struct FileLedger {
    dir: PathBuf,
    keys: Vec<String>,
}

impl FileLedger {
    /// Opens the ledger for `repository`, reading any existing state.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError`] if an existing state file can't be read.
    pub fn open(state_dir: &Path, repository: &RepositoryId) -> Result<Self, LedgerError> {
        let dir = state_dir.join(&repository.owner).join(&repository.name);
        let state_path = dir.join(STATE_FILE);

        let keys = if state_path.exists() {
            let content = fs::read_to_string(&state_path).map_err(|e| io_error(&state_path, e))?;
            content
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        debug!(path = %dir.display(), migrated = keys.len(), "Opened ledger");
        Ok(Self { dir, keys })
    }

    /// Returns the ledger directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))
    }

    fn append_line(&self, line: &str) -> Result<(), LedgerError> {
        self.ensure_dir()?;
        let path = self.dir.join(MAPPING_FILE);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_error(&path, e))?;
        writeln!(file, "{line}").map_err(|e| io_error(&path, e))
    }
}

impl MigrationLedger for FileLedger {
    fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    fn append(&mut self, key: &str) -> Result<(), LedgerError> {
        self.ensure_dir()?;
        self.keys.push(key.to_string());
        let path = self.dir.join(STATE_FILE);
        fs::write(&path, self.keys.join(",")).map_err(|e| io_error(&path, e))
    }

    fn record_mapping(&mut self, issue_number: u64, key: &str) -> Result<(), LedgerError> {
        self.append_line(&format!("{issue_number}: {key}"))
    }

    fn annotate(&mut self, note: &str) -> Result<(), LedgerError> {
        self.append_line(note)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

fn io_error(path: &Path, source: std::io::Error) -> LedgerError {
    LedgerError::IoError {
        path: path.display().to_string(),
        source,
    }
}
