//! Claim service implementation

use crate::error::ServiceError;
use dvp_domain::{
    ClaimId, ClaimRecord, Confidence, ConfidenceEngine, LineageEvent, PendingEvent, ProtocolOutcome,
};
use dvp_store::LedgerStore;
use tracing::{debug, info};

/// A verification event as submitted by a caller
///
/// The step id and timestamp are assigned by the service and the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRequest {
    /// Verification process tag
    pub process_type: String,
    /// Acting agent identifier
    pub agent_did: String,
    /// Proposed score change, before clamping
    pub score_change: f64,
    /// Reference to the attestation record
    pub attestation_vc_uri: String,
}

impl EventRequest {
    /// Create an event request
    pub fn new(
        process_type: impl Into<String>,
        agent_did: impl Into<String>,
        score_change: f64,
        attestation_vc_uri: impl Into<String>,
    ) -> Self {
        Self {
            process_type: process_type.into(),
            agent_did: agent_did.into(),
            score_change,
            attestation_vc_uri: attestation_vc_uri.into(),
        }
    }

    /// Create a request for a well-known protocol outcome, using its default score
    pub fn from_outcome(
        outcome: ProtocolOutcome,
        agent_did: impl Into<String>,
        attestation_vc_uri: impl Into<String>,
    ) -> Self {
        Self::new(
            outcome.process_type(),
            agent_did,
            outcome.score_change(),
            attestation_vc_uri,
        )
    }
}

/// Result of appending an event
#[derive(Debug, Clone, PartialEq)]
pub struct AppendOutcome {
    /// Claim the event was appended to
    pub claim_id: ClaimId,
    /// The event as recorded in the lineage
    pub event: LineageEvent,
    /// Confidence after the event
    pub confidence: Confidence,
}

/// Criteria for listing claims
#[derive(Debug, Clone, Default)]
pub struct ClaimFilter {
    /// Only claims at or above this confidence
    pub min_confidence: Option<f64>,
    /// Maximum results to return
    pub limit: Option<usize>,
}

/// Ledger operations over an explicit store handle
///
/// The service keeps no claim state between calls: each operation works on a
/// freshly loaded ledger snapshot.
pub struct ClaimService<S> {
    store: S,
}

impl<S: LedgerStore> ClaimService<S> {
    /// Create a service over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a claim and persist it
    ///
    /// `confidence` defaults to 0.5 and must lie in [0.0, 1.0].
    pub fn create_claim(
        &self,
        claim_text: &str,
        confidence: Option<f64>,
    ) -> Result<ClaimId, ServiceError> {
        let claim = match confidence {
            Some(value) => ClaimRecord::with_confidence(claim_text, value)?,
            None => ClaimRecord::new(claim_text)?,
        };
        let id = claim.id().clone();

        let mut ledger = self.store.load()?;
        if ledger.contains(&id) {
            return Err(ServiceError::Validation(format!(
                "a claim with id {} already exists",
                id
            )));
        }

        ledger.put(claim);
        self.store.save(&mut ledger)?;

        info!(claim_id = %id, "Created claim");
        Ok(id)
    }

    /// Append a verification event to a claim and persist the ledger
    ///
    /// The step id is `<process type, lowercased>-<claim id>-<position>`.
    pub fn append_event(
        &self,
        id: &ClaimId,
        request: EventRequest,
    ) -> Result<AppendOutcome, ServiceError> {
        let mut ledger = self.store.load()?;
        let claim = ledger
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;

        let step_id = format!(
            "{}-{}-{}",
            request.process_type.to_lowercase(),
            id,
            claim.lineage().len() + 1
        );
        let pending = PendingEvent::new(
            step_id,
            request.process_type,
            request.agent_did,
            request.score_change,
            request.attestation_vc_uri,
        )?;

        let (claim, event) = ConfidenceEngine::apply(claim, pending)?;
        let confidence = claim.current_confidence();
        ledger.put(claim);
        self.store.save(&mut ledger)?;

        info!(
            claim_id = %id,
            step_id = %event.step_id,
            score_change = event.result_score_change,
            confidence = confidence.value(),
            "Appended lineage event"
        );
        Ok(AppendOutcome {
            claim_id: id.clone(),
            event,
            confidence,
        })
    }

    /// Get the full record of a claim
    pub fn get_status(&self, id: &ClaimId) -> Result<ClaimRecord, ServiceError> {
        let ledger = self.store.load()?;
        let claim = ledger
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;

        debug!(claim_id = %id, events = claim.lineage().len(), "Read claim status");
        Ok(claim)
    }

    /// List claims matching `filter`, highest confidence first
    pub fn list_claims(&self, filter: &ClaimFilter) -> Result<Vec<ClaimRecord>, ServiceError> {
        if let Some(min) = filter.min_confidence {
            Confidence::new(min)?;
        }

        let ledger = self.store.load()?;
        let mut claims: Vec<ClaimRecord> = ledger
            .claims()
            .filter(|claim| {
                filter
                    .min_confidence
                    .is_none_or(|min| claim.current_confidence().value() >= min)
            })
            .cloned()
            .collect();

        claims.sort_by(|a, b| {
            b.current_confidence()
                .value()
                .total_cmp(&a.current_confidence().value())
                .then_with(|| a.created_at().cmp(&b.created_at()))
        });

        if let Some(limit) = filter.limit {
            claims.truncate(limit);
        }
        Ok(claims)
    }
}
