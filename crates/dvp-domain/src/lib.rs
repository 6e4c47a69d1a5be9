//! DVP Domain Layer
//!
//! This crate contains the core model of the Synergy Ledger: Dynamic
//! Verification Proposals (claims), their lineage of verification events,
//! and the deterministic confidence rule that connects the two.
//!
//! ## Key Concepts
//!
//! - **Claim**: a proposition whose credibility is a bounded score, not a fact
//! - **Confidence**: a value in [0.0, 1.0], adjusted by saturating arithmetic
//! - **Lineage**: the append-only history of events that produced the score
//! - **Ledger**: the full set of claims, persisted as a single unit
//!
//! ## Architecture
//!
//! - No I/O: persistence lives in `dvp-store`, orchestration in `dvp-service`
//! - Every type validates its own invariants on construction and rehydration

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod confidence;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod lineage;
pub mod protocol;

// Re-exports for convenience
pub use claim::{ClaimId, ClaimRecord};
pub use confidence::{parse_score_delta, Confidence, DEFAULT_CONFIDENCE};
pub use engine::ConfidenceEngine;
pub use error::DomainError;
pub use ledger::Ledger;
pub use lineage::{LineageEvent, PendingEvent};
pub use protocol::ProtocolOutcome;
