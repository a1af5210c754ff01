//! Ledger error handling
//!
//! Typed errors for ledger operations and the store, with descriptive
//! messages and recovery suggestions for the I/O cases.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while operating on or persisting a ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Amount is zero, negative, or not a finite number
    #[error("Amount must be a positive number, got {amount}")]
    InvalidAmount { amount: f64 },

    /// No expense with the requested ID
    #[error("Expense with ID {id} not found")]
    NotFound { id: u64 },

    /// The highest ID in the ledger leaves no room for another
    #[error("No IDs left: the ledger already holds ID {max}")]
    IdsExhausted { max: u64 },

    /// Ledger file exists but cannot be parsed
    #[error("Ledger file '{path}' is malformed: {details}")]
    MalformedStore { path: PathBuf, details: String },

    /// Failed to create the directory holding the ledger
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Permission denied accessing path
    #[error("Permission denied: cannot access '{path}'. Check file permissions.")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Disk is full or quota exceeded
    #[error(
        "Disk full or quota exceeded while writing to '{path}'. Free up disk space and try again."
    )]
    DiskFull {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to read the ledger file
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the ledger file
    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Atomic write failed during rename
    #[error("Atomic write failed: could not rename '{from}' to '{to}': {source}")]
    AtomicWriteFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Which side of the store an I/O error happened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Read,
    Write,
}

impl LedgerError {
    /// Create an error from an I/O error with path context
    ///
    /// Classifies the error based on its kind (permission, disk full, etc.)
    pub fn from_io(error: io::Error, path: PathBuf, op: IoOp) -> Self {
        match error.kind() {
            io::ErrorKind::PermissionDenied => LedgerError::PermissionDenied {
                path,
                source: error,
            },
            _ if is_disk_full_error(&error) => LedgerError::DiskFull {
                path,
                source: error,
            },
            _ => match op {
                IoOp::Read => LedgerError::ReadError {
                    path,
                    source: error,
                },
                IoOp::Write => LedgerError::WriteError {
                    path,
                    source: error,
                },
            },
        }
    }

    /// True for failures that happened while reading or writing the file
    pub fn is_persistence(&self) -> bool {
        !matches!(
            self,
            LedgerError::InvalidAmount { .. }
                | LedgerError::NotFound { .. }
                | LedgerError::IdsExhausted { .. }
                | LedgerError::MalformedStore { .. }
        )
    }

    /// Get a recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            LedgerError::DiskFull { .. } => Some("Free up disk space and try again."),
            LedgerError::PermissionDenied { .. } => {
                Some("Check file and directory permissions, or point --file at a writable location.")
            }
            LedgerError::MalformedStore { .. } => {
                Some("Fix the JSON by hand or move the file aside to start a new ledger.")
            }
            LedgerError::CreateDirectory { .. } => {
                Some("Check that the parent directory exists and you have write permissions.")
            }
            LedgerError::NotFound { .. } => Some("Run `expense-tracker list` to see valid IDs."),
            _ => None,
        }
    }
}

/// Check if an I/O error indicates disk full condition
fn is_disk_full_error(error: &io::Error) -> bool {
    let msg = error.to_string().to_lowercase();
    msg.contains("no space left")
        || msg.contains("disk full")
        || msg.contains("quota exceeded")
        || msg.contains("not enough space")
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
