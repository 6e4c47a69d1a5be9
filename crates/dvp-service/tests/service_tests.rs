//! End-to-end tests for the claim service
//!
//! Covers the scoring scenarios of the reputation protocol and the ledger
//! guarantees (identity stability, no mutation on failure, conflicts).

use dvp_domain::{ClaimId, ProtocolOutcome};
use dvp_service::{ClaimFilter, ClaimService, EventRequest, ServiceError};
use dvp_store::{InMemoryStore, JsonFileStore, LedgerStore};
use tempfile::TempDir;

const EPSILON: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {}, got {}",
        expected,
        actual
    );
}

fn file_service(dir: &TempDir) -> ClaimService<JsonFileStore> {
    ClaimService::new(JsonFileStore::new(dir.path().join("data").join("ledger.json")))
}

fn event(process_type: &str, score_change: f64) -> EventRequest {
    EventRequest::new(process_type, "did:synergy:test", score_change, "uri:test")
}

#[test]
fn test_create_then_status_has_empty_lineage() {
    let service = ClaimService::new(InMemoryStore::new());
    let id = service
        .create_claim("This house believes the Synergy Ledger will solve Civil Unrest.", None)
        .unwrap();

    let claim = service.get_status(&id).unwrap();
    assert_eq!(claim.id(), &id);
    assert!(claim.lineage().is_empty());
    assert_eq!(claim.current_confidence().value(), 0.5);
}

#[test]
fn test_create_with_supplied_confidence() {
    let service = ClaimService::new(InMemoryStore::new());
    let id = service.create_claim("motion", Some(0.75)).unwrap();
    assert_eq!(service.get_status(&id).unwrap().current_confidence().value(), 0.75);
}

#[test]
fn test_empty_claim_text_rejected() {
    let service = ClaimService::new(InMemoryStore::new());
    assert!(matches!(service.create_claim("", None), Err(ServiceError::Validation(_))));
}

#[test]
fn test_protocol_scenarios() {
    let service = ClaimService::new(InMemoryStore::new());

    let cases = [
        (0.50, 0.10, 0.60),
        (0.75, -0.10, 0.65),
        (0.40, -0.50, 0.0),
        (0.95, 0.20, 1.0),
    ];

    for (i, (start, delta, expected)) in cases.into_iter().enumerate() {
        let id = service.create_claim(&format!("scenario claim {}", i), Some(start)).unwrap();
        let outcome = service.append_event(&id, event("Scenario", delta)).unwrap();
        assert_close(outcome.confidence.value(), expected);
        assert_close(service.get_status(&id).unwrap().current_confidence().value(), expected);
    }
}

#[test]
fn test_simulated_debate_and_audit() {
    let dir = TempDir::new().unwrap();
    let service = file_service(&dir);

    let id = service.create_claim("The Synergy Ledger is the most effective solution.", None).unwrap();
    service
        .append_event(
            &id,
            EventRequest::from_outcome(ProtocolOutcome::OsdVictory, "did:synergy:eig-lead", "https://ledger.com/vc/osd-001"),
        )
        .unwrap();
    let outcome = service
        .append_event(
            &id,
            EventRequest::from_outcome(ProtocolOutcome::AuditFail, "did:synergy:ffg-node-a", "https://ledger.com/vc/audit-002"),
        )
        .unwrap();

    assert_close(outcome.confidence.value(), 0.5);

    let claim = service.get_status(&id).unwrap();
    let types: Vec<&str> = claim.lineage().iter().map(|e| e.process_type.as_str()).collect();
    assert_eq!(types, ["OxfordDebate", "FunctionalAudit"]);
    assert!(claim.lineage()[0].timestamp <= claim.lineage()[1].timestamp);
}

#[test]
fn test_unknown_claim_is_not_found_without_mutation() {
    let dir = TempDir::new().unwrap();
    let service = file_service(&dir);
    let existing = service.create_claim("existing", None).unwrap();
    let before = std::fs::read(service.store().path()).unwrap();

    let missing = ClaimId::new("0000000000000000000000000000000000000000000000000000000000000000");
    assert!(matches!(service.get_status(&missing), Err(ServiceError::NotFound(_))));
    assert!(matches!(
        service.append_event(&missing, event("Audit", 0.1)),
        Err(ServiceError::NotFound(id)) if id == missing
    ));

    let after = std::fs::read(service.store().path()).unwrap();
    assert_eq!(before, after, "Ledger must not change on NotFound");
    assert!(service.get_status(&existing).is_ok());
}

#[test]
fn test_invalid_event_rejected_without_mutation() {
    let service = ClaimService::new(InMemoryStore::new());
    let id = service.create_claim("motion", None).unwrap();
    let revision = service.store().load().unwrap().revision();

    let blank_agent = EventRequest::new("Audit", "", 0.1, "uri");
    assert!(matches!(service.append_event(&id, blank_agent), Err(ServiceError::Validation(_))));

    let nan_score = event("Audit", f64::NAN);
    assert!(matches!(service.append_event(&id, nan_score), Err(ServiceError::Validation(_))));

    let ledger = service.store().load().unwrap();
    assert_eq!(ledger.revision(), revision);
    assert!(ledger.get(&id).unwrap().lineage().is_empty());
}

#[test]
fn test_identity_stable_across_file_cycles() {
    let dir = TempDir::new().unwrap();
    let service = file_service(&dir);
    let id = service.create_claim("stable", None).unwrap();
    let created_at = service.get_status(&id).unwrap().created_at();

    for i in 0..10 {
        let delta = if i % 3 == 0 { -0.3 } else { 0.15 };
        service.append_event(&id, event("Audit", delta)).unwrap();
    }

    // A fresh service over the same file sees the same claim
    let reopened = file_service(&dir);
    let claim = reopened.get_status(&id).unwrap();
    assert_eq!(claim.id(), &id);
    assert_eq!(claim.created_at(), created_at);
    assert_eq!(claim.lineage().len(), 10);
    let value = claim.current_confidence().value();
    assert!((0.0..=1.0).contains(&value));
}

#[test]
fn test_concurrent_writer_reported_as_conflict() {
    let dir = TempDir::new().unwrap();
    let service = file_service(&dir);
    let id = service.create_claim("contested", None).unwrap();

    // A second writer loads, then this service writes, then the second writer saves
    let other = JsonFileStore::new(service.store().path());
    let mut stale = other.load().unwrap();

    service.append_event(&id, event("Audit", 0.1)).unwrap();

    let result = other.save(&mut stale);
    assert!(result.is_err());
    let err: ServiceError = result.unwrap_err().into();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // The service's update is still there
    assert_eq!(service.get_status(&id).unwrap().lineage().len(), 1);
}

#[test]
fn test_list_claims_filter_and_order() {
    let service = ClaimService::new(InMemoryStore::new());
    service.create_claim("low", Some(0.2)).unwrap();
    service.create_claim("mid", Some(0.5)).unwrap();
    service.create_claim("high", Some(0.9)).unwrap();

    let all = service.list_claims(&ClaimFilter::default()).unwrap();
    let texts: Vec<&str> = all.iter().map(|c| c.claim_text()).collect();
    assert_eq!(texts, ["high", "mid", "low"]);

    let filtered = service
        .list_claims(&ClaimFilter {
            min_confidence: Some(0.5),
            limit: Some(1),
        })
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].claim_text(), "high");

    let invalid = service.list_claims(&ClaimFilter {
        min_confidence: Some(2.0),
        limit: None,
    });
    assert!(matches!(invalid, Err(ServiceError::Validation(_))));
}
