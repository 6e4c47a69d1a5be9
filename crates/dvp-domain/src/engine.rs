//! Confidence engine - applies verification steps to claims
//!
//! The rule: add the proposed delta, clamp to
//! [0.0, 1.0], append the stamped step. Which delta a given process type
//! deserves is decided by the caller (see [`crate::protocol`]); the engine
//! only ever clamps and appends what it is given.

use crate::claim::ClaimRecord;
use crate::error::DomainError;
use crate::lineage::{LineageEvent, PendingEvent};
use chrono::{DateTime, Utc};

/// Stateless applier of lineage events
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEngine;

impl ConfidenceEngine {
    /// Apply `event` to `claim`, stamping it with the current time
    pub fn apply(
        claim: ClaimRecord,
        event: PendingEvent,
    ) -> Result<(ClaimRecord, LineageEvent), DomainError> {
        Self::apply_at(claim, event, Utc::now())
    }

    /// Apply `event` to `claim`, stamping it with `now`
    ///
    /// Deterministic given `now`. Never fails on the score itself (any finite
    /// delta saturates at the bounds); fails only if the step id is already
    /// present in the lineage, in which case nothing is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use dvp_domain::{ClaimRecord, ConfidenceEngine, PendingEvent};
    ///
    /// let claim = ClaimRecord::with_confidence("motion", 0.95).unwrap();
    /// let step = PendingEvent::new("final-1", "FinalMotionApproval", "did:c", 0.20, "uri:final").unwrap();
    /// let (claim, _) = ConfidenceEngine::apply_at(claim, step, Utc::now()).unwrap();
    /// assert_eq!(claim.current_confidence().value(), 1.0);
    /// ```
    pub fn apply_at(
        mut claim: ClaimRecord,
        event: PendingEvent,
        now: DateTime<Utc>,
    ) -> Result<(ClaimRecord, LineageEvent), DomainError> {
        if claim.has_step(event.step_id()) {
            return Err(DomainError::Validation(format!(
                "step '{}' already recorded for claim {}",
                event.step_id(),
                claim.id()
            )));
        }

        let confidence = claim
            .current_confidence()
            .saturating_add(event.result_score_change());
        let applied = event.stamp(now);
        claim.record_event(applied.clone(), confidence);

        Ok((claim, applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::Confidence;
    use chrono::TimeZone;

    const EPSILON: f64 = 1e-9;

    fn claim_at(confidence: f64) -> ClaimRecord {
        ClaimRecord::create_at(
            "The Synergy Ledger is the most effective solution for epistemic crisis.",
            Confidence::new(confidence).unwrap(),
            Utc.with_ymd_and_hms(2026, 2, 3, 9, 0, 0).unwrap(),
        )
        .unwrap()
    }

    fn step(step_id: &str, process_type: &str, delta: f64) -> PendingEvent {
        PendingEvent::new(step_id, process_type, "did:synergy:test", delta, "uri:test").unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPSILON,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_osd_victory_scoring() {
        let (claim, _) = ConfidenceEngine::apply(claim_at(0.5), step("osd-win-1", "OxfordDebate", 0.10)).unwrap();
        assert_close(claim.current_confidence().value(), 0.60);
    }

    #[test]
    fn test_functional_audit_fail_scoring() {
        let (claim, _) =
            ConfidenceEngine::apply(claim_at(0.75), step("audit-fail-1", "FunctionalAudit", -0.10)).unwrap();
        assert_close(claim.current_confidence().value(), 0.65);
    }

    #[test]
    fn test_malicious_attestation_floors_at_zero() {
        let (claim, event) =
            ConfidenceEngine::apply(claim_at(0.40), step("malicious-1", "MaliciousAttestation", -0.50)).unwrap();
        assert_eq!(claim.current_confidence().value(), 0.0);
        // The raw delta is recorded, not the clamped one
        assert_eq!(event.result_score_change, -0.50);
    }

    #[test]
    fn test_final_approval_caps_at_one() {
        let (claim, _) =
            ConfidenceEngine::apply(claim_at(0.95), step("final-app-1", "FinalMotionApproval", 0.20)).unwrap();
        assert_eq!(claim.current_confidence().value(), 1.0);
    }

    #[test]
    fn test_timestamp_assigned_at_append() {
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 10, 30, 0).unwrap();
        let (claim, event) =
            ConfidenceEngine::apply_at(claim_at(0.5), step("check-fields-1", "TestProcess", 0.0), now).unwrap();
        assert_eq!(event.timestamp, now);
        assert_eq!(claim.lineage().len(), 1);
        assert_eq!(claim.lineage()[0], event);
    }

    #[test]
    fn test_duplicate_step_rejected() {
        let (claim, _) = ConfidenceEngine::apply(claim_at(0.5), step("s-1", "Audit", 0.05)).unwrap();
        let result = ConfidenceEngine::apply(claim, step("s-1", "Audit", 0.05));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_events_after_final_approval_are_accepted() {
        let (claim, _) = ConfidenceEngine::apply(claim_at(0.5), step("final-1", "FinalMotionApproval", 0.20)).unwrap();
        let (claim, _) = ConfidenceEngine::apply(claim, step("audit-2", "FunctionalAudit", -0.10)).unwrap();
        assert_eq!(claim.lineage().len(), 2);
        assert_close(claim.current_confidence().value(), 0.60);
    }

    #[test]
    fn test_identity_unchanged_by_events() {
        let original = claim_at(0.5);
        let (id, created_at) = (original.id().clone(), original.created_at());
        let mut claim = original;
        for i in 0..5 {
            claim = ConfidenceEngine::apply(claim, step(&format!("s-{}", i), "Audit", 0.05)).unwrap().0;
        }
        assert_eq!(claim.id(), &id);
        assert_eq!(claim.created_at(), created_at);
    }
}
