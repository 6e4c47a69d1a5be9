//! DVP Claim Service
//!
//! Orchestrates the domain and the store for the ledger operations:
//! create a claim, append a verification event, read a claim's status, and
//! list claims. Every operation loads the full ledger, applies one change,
//! and saves the full ledger.
//!
//! # Examples
//!
//! ```
//! use dvp_service::{ClaimService, EventRequest};
//! use dvp_store::InMemoryStore;
//!
//! let service = ClaimService::new(InMemoryStore::new());
//! let id = service.create_claim("Audits improve credibility.", None).unwrap();
//!
//! let outcome = service
//!     .append_event(&id, EventRequest::new("OxfordDebate", "did:synergy:eig-lead", 0.10, "uri:osd-1"))
//!     .unwrap();
//! assert!((outcome.confidence.value() - 0.60).abs() < 1e-9);
//! ```

#![warn(missing_docs)]

mod error;
mod service;

pub use error::ServiceError;
pub use service::{AppendOutcome, ClaimFilter, ClaimService, EventRequest};
