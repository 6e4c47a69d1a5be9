//! In-memory ledger store

use crate::{LedgerStore, StoreError};
use dvp_domain::Ledger;
use std::sync::Mutex;

/// Ledger snapshot held in memory
///
/// Applies the same revision check as [`JsonFileStore`](crate::JsonFileStore),
/// so conflict handling can be exercised without touching disk.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    ledger: Mutex<Ledger>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `ledger`
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: Mutex::new(ledger),
        }
    }
}

impl LedgerStore for InMemoryStore {
    fn load(&self) -> Result<Ledger, StoreError> {
        let ledger = self.ledger.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(ledger.clone())
    }

    fn save(&self, ledger: &mut Ledger) -> Result<(), StoreError> {
        let mut stored = self.ledger.lock().map_err(|_| StoreError::Poisoned)?;
        if stored.revision() != ledger.revision() {
            return Err(StoreError::Conflict {
                expected: ledger.revision(),
                found: stored.revision(),
            });
        }

        ledger.set_revision(stored.revision() + 1);
        *stored = ledger.clone();
        Ok(())
    }
}
