//! Lineage events - the verification history behind a claim's confidence

use crate::confidence::ensure_finite_delta;
use crate::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A verification step that has been appended to a claim's lineage
///
/// Once inside a [`ClaimRecord`](crate::ClaimRecord) an event is only
/// reachable through shared references, so its fields, including the
/// timestamp, cannot change after the append.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineageEvent {
    /// Identifier unique within the owning claim's lineage
    pub step_id: String,

    /// Verification process tag (e.g., "OxfordDebate", "FunctionalAudit")
    pub process_type: String,

    /// Identifier of the acting agent or group; opaque
    pub agent_did: String,

    /// Raw delta proposed by this step, before clamping
    pub result_score_change: f64,

    /// Reference to the immutable attestation record; never dereferenced
    pub attestation_vc_uri: String,

    /// When the step was appended (assigned by the engine)
    pub timestamp: DateTime<Utc>,
}

/// A validated verification step that has not been applied yet
///
/// There is no timestamp here: only the
/// [`ConfidenceEngine`](crate::ConfidenceEngine) assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEvent {
    step_id: String,
    process_type: String,
    agent_did: String,
    result_score_change: f64,
    attestation_vc_uri: String,
}

impl PendingEvent {
    /// Create a pending event
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if `step_id`, `process_type` or
    /// `agent_did` is blank, or if the score change is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use dvp_domain::PendingEvent;
    ///
    /// let step = PendingEvent::new(
    ///     "osd-1",
    ///     "OxfordDebate",
    ///     "did:synergy:eig-lead",
    ///     0.10,
    ///     "https://ledger.example/vc/osd-1",
    /// );
    /// assert!(step.is_ok());
    /// ```
    pub fn new(
        step_id: impl Into<String>,
        process_type: impl Into<String>,
        agent_did: impl Into<String>,
        result_score_change: f64,
        attestation_vc_uri: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let step_id = step_id.into();
        let process_type = process_type.into();
        let agent_did = agent_did.into();

        require_non_blank("step_id", &step_id)?;
        require_non_blank("process_type", &process_type)?;
        require_non_blank("agent_did", &agent_did)?;
        ensure_finite_delta(result_score_change)?;

        Ok(Self {
            step_id,
            process_type,
            agent_did,
            result_score_change,
            attestation_vc_uri: attestation_vc_uri.into(),
        })
    }

    /// Step identifier
    pub fn step_id(&self) -> &str {
        &self.step_id
    }

    /// Process type tag
    pub fn process_type(&self) -> &str {
        &self.process_type
    }

    /// Proposed score delta
    pub fn result_score_change(&self) -> f64 {
        self.result_score_change
    }

    /// Finalize into a lineage event stamped with `timestamp`
    pub(crate) fn stamp(self, timestamp: DateTime<Utc>) -> LineageEvent {
        LineageEvent {
            step_id: self.step_id,
            process_type: self.process_type,
            agent_did: self.agent_did,
            result_score_change: self.result_score_change,
            attestation_vc_uri: self.attestation_vc_uri,
            timestamp,
        }
    }
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
