//! JSON file ledger store

use crate::document;
use crate::{LedgerStore, StoreError};
use dvp_domain::Ledger;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Ledger stored as a single JSON document
///
/// Saves are atomic on filesystems with atomic rename: the document is
/// written to a sibling `.tmp` file, synced, then renamed over the ledger.
/// Saves are serialized through a sibling `.lock` file created exclusively
/// and removed when the save finishes. A process killed mid-save can leave
/// that lock file behind; it then has to be removed by hand.
///
/// Loads take no lock: readers see either the old or the new document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the ledger at `path`
    ///
    /// Nothing is touched on disk until the first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the ledger document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the writer lock file
    pub fn lock_path(&self) -> PathBuf {
        self.sibling("lock")
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling("tmp")
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("ledger"));
        name.push(".");
        name.push(suffix);
        self.path.with_file_name(name)
    }

    /// Read the stored document, or `None` if there is none yet
    fn read_bytes(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn stored_revision(&self) -> Result<u64, StoreError> {
        match self.read_bytes()? {
            Some(bytes) => document::peek_revision(&bytes),
            None => Ok(0),
        }
    }

    fn ensure_parent_dir(&self) -> Result<(), StoreError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))
            }
            _ => Ok(()),
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let temp_path = self.temp_path();

        let result = (|| -> std::io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            drop(file);
            fs::rename(&temp_path, &self.path)
        })();

        if let Err(e) = result {
            // The previous ledger is still in place; only the temp file may linger
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    warn!(path = %temp_path.display(), error = %cleanup, "Failed to remove temp ledger");
                }
            }
            return Err(StoreError::io(&self.path, e));
        }

        Ok(())
    }
}

impl LedgerStore for JsonFileStore {
    fn load(&self) -> Result<Ledger, StoreError> {
        match self.read_bytes()? {
            Some(bytes) => {
                let ledger = document::decode(&bytes)?;
                debug!(
                    path = %self.path.display(),
                    claims = ledger.len(),
                    revision = ledger.revision(),
                    "Loaded ledger"
                );
                Ok(ledger)
            }
            None => {
                debug!(path = %self.path.display(), "No ledger on disk, starting empty");
                Ok(Ledger::new())
            }
        }
    }

    fn save(&self, ledger: &mut Ledger) -> Result<(), StoreError> {
        self.ensure_parent_dir()?;
        let _lock = LockGuard::acquire(self.lock_path())?;

        let stored = self.stored_revision()?;
        if stored != ledger.revision() {
            warn!(
                path = %self.path.display(),
                loaded = ledger.revision(),
                stored,
                "Refusing to overwrite a ledger changed by another writer"
            );
            return Err(StoreError::Conflict {
                expected: ledger.revision(),
                found: stored,
            });
        }

        let next = stored + 1;
        let bytes = document::encode(ledger, next)?;
        self.write_atomically(&bytes)?;
        ledger.set_revision(next);

        info!(
            path = %self.path.display(),
            claims = ledger.len(),
            revision = next,
            "Saved ledger"
        );
        Ok(())
    }
}

/// Exclusive writer lock held for the duration of a save
///
/// The lock file is removed on drop, on success and error paths alike.
struct LockGuard {
    path: PathBuf,
}

impl LockGuard {
    fn acquire(path: PathBuf) -> Result<Self, StoreError> {
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(mut file) => {
                // Owner pid is informational only
                let _ = writeln!(file, "{}", std::process::id());
                Ok(Self { path })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(StoreError::Locked(path)),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Failed to release ledger lock");
        }
    }
}
