//! Reputation protocol outcomes and their default score changes
//!
//! This table is a calling convention: it maps well-known protocol outcomes
//! to a process type and a delta. The confidence engine never consults it.

/// A well-known verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProtocolOutcome {
    /// Motion won an Oxford-style debate (+0.10)
    OsdVictory,

    /// Motion lost an Oxford-style debate (-0.05)
    OsdLoss,

    /// Functional audit passed (+0.05)
    AuditPass,

    /// Functional audit failed (-0.10)
    AuditFail,

    /// An attestation was found to be malicious (-0.50)
    MaliciousAttestation,

    /// Final motion approval (+0.20)
    FinalApproval,
}

impl ProtocolOutcome {
    /// Every outcome, in protocol order
    pub const ALL: [ProtocolOutcome; 6] = [
        ProtocolOutcome::OsdVictory,
        ProtocolOutcome::OsdLoss,
        ProtocolOutcome::AuditPass,
        ProtocolOutcome::AuditFail,
        ProtocolOutcome::MaliciousAttestation,
        ProtocolOutcome::FinalApproval,
    ];

    /// Get the outcome name as used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolOutcome::OsdVictory => "osd-victory",
            ProtocolOutcome::OsdLoss => "osd-loss",
            ProtocolOutcome::AuditPass => "audit-pass",
            ProtocolOutcome::AuditFail => "audit-fail",
            ProtocolOutcome::MaliciousAttestation => "malicious-attestation",
            ProtocolOutcome::FinalApproval => "final-approval",
        }
    }

    /// Process type recorded in the lineage for this outcome
    pub fn process_type(&self) -> &'static str {
        match self {
            ProtocolOutcome::OsdVictory | ProtocolOutcome::OsdLoss => "OxfordDebate",
            ProtocolOutcome::AuditPass | ProtocolOutcome::AuditFail => "FunctionalAudit",
            ProtocolOutcome::MaliciousAttestation => "MaliciousAttestation",
            ProtocolOutcome::FinalApproval => "FinalMotionApproval",
        }
    }

    /// Default score change for this outcome
    pub fn score_change(&self) -> f64 {
        match self {
            ProtocolOutcome::OsdVictory => 0.10,
            ProtocolOutcome::OsdLoss => -0.05,
            ProtocolOutcome::AuditPass => 0.05,
            ProtocolOutcome::AuditFail => -0.10,
            ProtocolOutcome::MaliciousAttestation => -0.50,
            ProtocolOutcome::FinalApproval => 0.20,
        }
    }

    /// Parse an outcome name (case-insensitive, `_` and `-` interchangeable)
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL.into_iter().find(|outcome| outcome.as_str() == normalized)
    }
}

impl std::str::FromStr for ProtocolOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown protocol outcome: {}", s))
    }
}
