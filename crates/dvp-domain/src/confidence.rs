//! Confidence score module
//!
//! Confidence is a bounded credibility measure, not a balance: adjustments
//! saturate at the bounds instead of failing.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Starting confidence for a claim when the caller supplies none
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Lower bound of the confidence range
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Upper bound of the confidence range
pub const MAX_CONFIDENCE: f64 = 1.0;

/// A confidence value guaranteed to lie in [0.0, 1.0]
///
/// Deserialization goes through [`Confidence::new`], so a stored value outside
/// the range is rejected instead of silently accepted.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// Create a confidence value
    ///
    /// # Errors
    /// Returns [`DomainError::Validation`] if the value is NaN or outside [0, 1].
    ///
    /// # Examples
    ///
    /// ```
    /// use dvp_domain::Confidence;
    ///
    /// assert!(Confidence::new(0.75).is_ok());
    /// assert!(Confidence::new(1.5).is_err());
    /// ```
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !(MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&value) {
            return Err(DomainError::validation(format!(
                "confidence must be in [0.0, 1.0], got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Add a signed delta, clamping the result to [0.0, 1.0]
    ///
    /// The delta must be finite; `PendingEvent` guarantees that before the
    /// engine ever calls this.
    pub fn saturating_add(self, delta: f64) -> Self {
        Self((self.0 + delta).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE))
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE)
    }
}

impl TryFrom<f64> for Confidence {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Parse a textual score delta, as typed on a command line
///
/// Accepts any finite decimal, signed or not. Anything else is a
/// validation error, raised before the ledger is touched.
pub fn parse_score_delta(input: &str) -> Result<f64, DomainError> {
    let delta: f64 = input.trim().parse().map_err(|_| {
        DomainError::validation(format!("score change must be a number, got '{}'", input))
    })?;
    ensure_finite_delta(delta)?;
    Ok(delta)
}

pub(crate) fn ensure_finite_delta(delta: f64) -> Result<(), DomainError> {
    if delta.is_finite() {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "score change must be finite, got {}",
            delta
        )))
    }
}
