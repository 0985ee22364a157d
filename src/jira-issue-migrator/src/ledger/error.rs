//! Ledger error types.

use thiserror::Error;

/// Errors that can occur while persisting migration state.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Failed to read or write a state file.
    #[error("Failed to access ledger file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
