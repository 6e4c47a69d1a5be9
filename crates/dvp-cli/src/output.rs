//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use chrono::SecondsFormat;
use colored::*;
use dvp_domain::{ClaimId, ClaimRecord, ProtocolOutcome};
use dvp_service::AppendOutcome;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const SHORT_ID_LEN: usize = 12;
const MAX_TEXT_LEN: usize = 48;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a single claim with its full lineage.
    pub fn format_claim(&self, claim: &ClaimRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claim)?),
            OutputFormat::Table => Ok(self.format_claim_table(claim)),
            OutputFormat::Quiet => Ok(claim.id().to_string()),
        }
    }

    /// Format a list of claims.
    pub fn format_claims(&self, claims: &[ClaimRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(claims)?),
            OutputFormat::Table => Ok(self.format_claims_table(claims)),
            OutputFormat::Quiet => {
                let ids: Vec<String> = claims.iter().map(|c| c.id().to_string()).collect();
                Ok(ids.join("\n"))
            }
        }
    }

    /// Format the result of creating a claim.
    pub fn claim_created(&self, id: &ClaimId) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({ "id": id }))?),
            OutputFormat::Table => Ok(self.success(&format!("Claim created: {}", id))),
            OutputFormat::Quiet => Ok(id.to_string()),
        }
    }

    /// Format the result of appending an event.
    pub fn event_appended(&self, outcome: &AppendOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "claim_id": outcome.claim_id,
                "step_id": outcome.event.step_id,
                "current_confidence": outcome.confidence,
            }))?),
            OutputFormat::Table => Ok(self.success(&format!(
                "Step added: {} (claim {}), confidence updated to {}",
                outcome.event.step_id,
                short_id(&outcome.claim_id),
                outcome.confidence
            ))),
            OutputFormat::Quiet => Ok(outcome.confidence.to_string()),
        }
    }

    /// Format the protocol outcome score table.
    pub fn protocol_table(&self) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let rows: Vec<serde_json::Value> = ProtocolOutcome::ALL
                    .iter()
                    .map(|o| {
                        serde_json::json!({
                            "outcome": o.as_str(),
                            "process_type": o.process_type(),
                            "score_change": o.score_change(),
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&rows)?)
            }
            OutputFormat::Table | OutputFormat::Quiet => {
                let mut builder = Builder::default();
                builder.push_record(["Outcome", "Process Type", "Score Change"]);
                for outcome in ProtocolOutcome::ALL {
                    builder.push_record([
                        outcome.as_str().to_string(),
                        outcome.process_type().to_string(),
                        format!("{:+.2}", outcome.score_change()),
                    ]);
                }
                Ok(styled(builder))
            }
        }
    }

    /// Format claims as a table.
    fn format_claims_table(&self, claims: &[ClaimRecord]) -> String {
        if claims.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Confidence", "Events", "Created", "Claim"]);

        for claim in claims {
            builder.push_record([
                short_id(claim.id()),
                claim.current_confidence().to_string(),
                claim.lineage().len().to_string(),
                claim.created_at().to_rfc3339_opts(SecondsFormat::Secs, true),
                truncate(claim.claim_text(), MAX_TEXT_LEN),
            ]);
        }

        styled(builder)
    }

    /// Format one claim as a summary plus a lineage table.
    fn format_claim_table(&self, claim: &ClaimRecord) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} {}\n", self.colorize("ID:", "cyan"), claim.id()));
        out.push_str(&format!("{} {}\n", self.colorize("Claim:", "cyan"), claim.claim_text()));
        out.push_str(&format!(
            "{} {}\n",
            self.colorize("Created:", "cyan"),
            claim.created_at().to_rfc3339_opts(SecondsFormat::Micros, true)
        ));
        out.push_str(&format!(
            "{} {}\n",
            self.colorize("Confidence:", "cyan"),
            claim.current_confidence()
        ));

        if claim.lineage().is_empty() {
            out.push_str(&self.colorize("No lineage events recorded.", "yellow"));
            return out;
        }

        let mut builder = Builder::default();
        builder.push_record(["Step", "Process", "Agent", "Change", "Timestamp", "Attestation"]);
        for event in claim.lineage() {
            builder.push_record([
                event.step_id.clone(),
                event.process_type.clone(),
                event.agent_did.clone(),
                format!("{:+.2}", event.result_score_change),
                event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
                event.attestation_vc_uri.clone(),
            ]);
        }
        out.push_str(&styled(builder));
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn short_id(id: &ClaimId) -> String {
    id.as_str().chars().take(SHORT_ID_LEN).collect()
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
