//! Claim module - the tracked proposition and its verification history

use crate::confidence::Confidence;
use crate::error::DomainError;
use crate::lineage::{require_non_blank, LineageEvent};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a claim: a lowercase hex SHA-256 digest
///
/// The digest covers the claim text and the creation instant, so two claims
/// with the same text get distinct ids, but the id cannot be recomputed from
/// the text alone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Wrap an existing identifier (for lookups and storage rehydration)
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Derive the identifier for a claim created at `created_at`
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use dvp_domain::ClaimId;
    ///
    /// let now = Utc::now();
    /// let id = ClaimId::derive("The ledger is sound.", now);
    /// assert_eq!(id.as_str().len(), 64);
    /// assert_eq!(id, ClaimId::derive("The ledger is sound.", now));
    /// ```
    pub fn derive(claim_text: &str, created_at: DateTime<Utc>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(claim_text.as_bytes());
        hasher.update(created_at.to_rfc3339_opts(SecondsFormat::AutoSi, true).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A claim together with its current confidence and lineage
///
/// Fields are private: the id, text and creation time are fixed at creation,
/// and the confidence and lineage only change through the
/// [`ConfidenceEngine`](crate::ConfidenceEngine).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredClaim")]
pub struct ClaimRecord {
    id: ClaimId,
    claim_text: String,
    created_at: DateTime<Utc>,
    current_confidence: Confidence,
    lineage: Vec<LineageEvent>,
}

impl ClaimRecord {
    /// Create a claim at the default confidence (0.5)
    pub fn new(claim_text: impl Into<String>) -> Result<Self, DomainError> {
        Self::create_at(claim_text, Confidence::default(), Utc::now())
    }

    /// Create a claim with an explicit starting confidence
    pub fn with_confidence(
        claim_text: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, DomainError> {
        Self::create_at(claim_text, Confidence::new(confidence)?, Utc::now())
    }

    /// Create a claim as of `created_at`
    ///
    /// The id is derived from the text and `created_at`; the lineage starts empty.
    pub fn create_at(
        claim_text: impl Into<String>,
        confidence: Confidence,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let claim_text = claim_text.into();
        require_non_blank("claim_text", &claim_text)?;

        Ok(Self {
            id: ClaimId::derive(&claim_text, created_at),
            claim_text,
            created_at,
            current_confidence: confidence,
            lineage: Vec::new(),
        })
    }

    /// Unique identifier
    pub fn id(&self) -> &ClaimId {
        &self.id
    }

    /// The proposition being tracked
    pub fn claim_text(&self) -> &str {
        &self.claim_text
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Current confidence
    pub fn current_confidence(&self) -> Confidence {
        self.current_confidence
    }

    /// Verification history, oldest first
    pub fn lineage(&self) -> &[LineageEvent] {
        &self.lineage
    }

    /// Whether a step with this id is already in the lineage
    pub fn has_step(&self, step_id: &str) -> bool {
        self.lineage.iter().any(|event| event.step_id == step_id)
    }

    pub(crate) fn record_event(&mut self, event: LineageEvent, confidence: Confidence) {
        self.lineage.push(event);
        self.current_confidence = confidence;
    }
}

/// Wire shape of a claim, validated before it becomes a `ClaimRecord`
#[derive(Deserialize)]
struct StoredClaim {
    id: ClaimId,
    claim_text: String,
    created_at: DateTime<Utc>,
    current_confidence: Confidence,
    #[serde(default)]
    lineage: Vec<LineageEvent>,
}

impl TryFrom<StoredClaim> for ClaimRecord {
    type Error = DomainError;

    fn try_from(stored: StoredClaim) -> Result<Self, Self::Error> {
        require_non_blank("id", stored.id.as_str())?;
        require_non_blank("claim_text", &stored.claim_text)?;

        let mut seen = HashSet::new();
        for event in &stored.lineage {
            if !seen.insert(event.step_id.as_str()) {
                return Err(DomainError::Validation(format!(
                    "duplicate step_id '{}' in lineage of claim {}",
                    event.step_id, stored.id
                )));
            }
        }

        // Identity comes from storage verbatim, never re-derived
        Ok(Self {
            id: stored.id,
            claim_text: stored.claim_text,
            created_at: stored.created_at,
            current_confidence: stored.current_confidence,
            lineage: stored.lineage,
        })
    }
}
