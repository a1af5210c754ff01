//! Ledger file storage
//!
//! The `Store` is the boundary between the in-memory `Ledger` and its JSON
//! file. A command loads the whole ledger once, applies one operation, and
//! saves the whole ledger back if it changed.
//!
//! Saves use atomic writes (write to temp file, then rename) so a crash
//! mid-write never leaves a truncated ledger behind.
//!
//! ## Usage
//!
//! ```ignore
//! let store = Store::new("expenses.json");
//! let mut ledger = store.load()?;   // empty if the file is missing
//! ledger.add("Lunch", 20.0, &SystemClock)?;
//! store.save(&ledger)?;
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::Config;
use crate::error::{IoOp, LedgerError, LedgerResult};
use crate::ledger::Ledger;

/// Handle on one ledger file
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store for the ledger at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store for the ledger file named by the configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ledger_path())
    }

    /// Path of the ledger file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the ledger file exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the whole ledger
    ///
    /// Returns an empty ledger if the file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed, or
    /// holds duplicate IDs or non-positive amounts.
    pub fn load(&self) -> LedgerResult<Ledger> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?self.path, "ledger file missing, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(LedgerError::from_io(e, self.path.clone(), IoOp::Read)),
        };

        let ledger: Ledger =
            serde_json::from_str(&content).map_err(|e| LedgerError::MalformedStore {
                path: self.path.clone(),
                details: e.to_string(),
            })?;
        ledger
            .check_invariants()
            .map_err(|details| LedgerError::MalformedStore {
                path: self.path.clone(),
                details,
            })?;

        debug!(path = ?self.path, count = ledger.len(), "loaded ledger");
        Ok(ledger)
    }

    /// Replace the ledger file with the given ledger
    pub fn save(&self, ledger: &Ledger) -> LedgerResult<()> {
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|e| LedgerError::from_io(io::Error::from(e), self.path.clone(), IoOp::Write))?;

        atomic_write(&self.path, json.as_bytes())?;

        debug!(path = ?self.path, count = ledger.len(), "saved ledger");
        Ok(())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// An existing target keeps its permission bits.
fn atomic_write(path: &Path, data: &[u8]) -> LedgerResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| LedgerError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = temp_path_for(path);
    let existing_permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let write_temp = || -> io::Result<()> {
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        if let Some(permissions) = existing_permissions {
            file.set_permissions(permissions)?;
        }
        file.sync_all()
    };
    if let Err(e) = write_temp() {
        let _ = fs::remove_file(&temp_path);
        return Err(LedgerError::from_io(e, temp_path, IoOp::Write));
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        }
    })
}

/// Sibling temp file: `expenses.json` -> `expenses.json.tmp`
///
/// Same directory as the target so the rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
