//! DVP Storage Layer
//!
//! Loads and saves the claim ledger as a whole.
//!
//! # Architecture
//!
//! - [`LedgerStore`] is the persistence seam used by `dvp-service`
//! - [`JsonFileStore`] keeps the ledger in one JSON document on disk
//! - [`InMemoryStore`] holds a snapshot in memory (tests, embedding)
//!
//! Both stores carry a revision counter: a save whose ledger was loaded at a
//! revision other than the one currently stored fails with
//! [`StoreError::Conflict`] instead of overwriting another writer's update.
//!
//! # Examples
//!
//! ```no_run
//! use dvp_store::{JsonFileStore, LedgerStore};
//!
//! let store = JsonFileStore::new("data/ledger.json");
//! let ledger = store.load().unwrap();
//! println!("{} claims at revision {}", ledger.len(), ledger.revision());
//! ```

#![warn(missing_docs)]

mod document;
mod json_file;
mod memory;

pub use document::CURRENT_SCHEMA_VERSION;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

use dvp_domain::Ledger;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the durable representation failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The ledger could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored ledger is unparseable or violates an invariant
    #[error("Corrupt ledger: {0}")]
    Corrupt(String),

    /// The stored ledger was written by a newer schema
    #[error("Unsupported ledger schema version {found} (supported up to {supported})")]
    UnsupportedSchema {
        /// Version found on disk
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Another writer saved the ledger after it was loaded
    #[error("Ledger changed since it was loaded (loaded revision {expected}, stored revision {found})")]
    Conflict {
        /// Revision the caller loaded
        expected: u64,
        /// Revision currently stored
        found: u64,
    },

    /// Another writer currently holds the ledger lock
    #[error("Ledger is locked by another writer ({0}); remove the lock file if no other process is running")]
    Locked(PathBuf),

    /// Internal lock poisoned by a panicking thread
    #[error("Store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error reports a concurrent writer rather than a failure
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. } | StoreError::Locked(_))
    }
}

/// Whole-ledger persistence
///
/// `load` returns every claim; `save` replaces every claim. There is no
/// incremental update: callers always go through load → mutate → save.
pub trait LedgerStore {
    /// Load the full ledger
    ///
    /// A store with no prior state yields an empty ledger at revision 0.
    fn load(&self) -> Result<Ledger, StoreError>;

    /// Persist the full ledger
    ///
    /// On success the ledger's revision is advanced to the stored revision.
    /// On failure the previously stored ledger is left as it was.
    fn save(&self, ledger: &mut Ledger) -> Result<(), StoreError>;
}
