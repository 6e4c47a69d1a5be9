//! Ledger - the in-memory set of all claims
//!
//! The ledger is loaded and saved as a whole by a store; `get` and `put`
//! never perform I/O.

use crate::claim::{ClaimId, ClaimRecord};
use std::collections::BTreeMap;

/// All claims, keyed by id, plus the revision they were loaded at
///
/// `revision` is bumped by the store on every successful save and is used to
/// detect a concurrent writer between load and save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    revision: u64,
    claims: BTreeMap<ClaimId, ClaimRecord>,
}

impl Ledger {
    /// Create an empty ledger at revision 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from stored parts
    pub fn from_parts(revision: u64, claims: BTreeMap<ClaimId, ClaimRecord>) -> Self {
        Self { revision, claims }
    }

    /// Revision this ledger was loaded at (or last saved as)
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Record the revision assigned by a successful save
    pub fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    /// Look up a claim
    pub fn get(&self, id: &ClaimId) -> Option<&ClaimRecord> {
        self.claims.get(id)
    }

    /// Whether a claim with this id exists
    pub fn contains(&self, id: &ClaimId) -> bool {
        self.claims.contains_key(id)
    }

    /// Insert or replace a claim under its own id
    pub fn put(&mut self, claim: ClaimRecord) {
        self.claims.insert(claim.id().clone(), claim);
    }

    /// Iterate over claims in id order
    pub fn claims(&self) -> impl Iterator<Item = &ClaimRecord> {
        self.claims.values()
    }

    /// Borrow the underlying map (for serialization)
    pub fn as_map(&self) -> &BTreeMap<ClaimId, ClaimRecord> {
        &self.claims
    }

    /// Number of claims
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Whether the ledger holds no claims
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
