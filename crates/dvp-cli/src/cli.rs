//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use dvp_domain::ProtocolOutcome;
use std::path::PathBuf;

/// DVP CLI - Track claims and their verification lineage on the Synergy Ledger.
#[derive(Debug, Parser)]
#[command(name = "dvp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ledger file path (overrides the configured one)
    #[arg(long, global = true, env = "DVP_LEDGER")]
    pub ledger: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format
    Table,
    /// JSON format (default)
    Json,
    /// Quiet format (IDs and values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new claim
    Create(CreateArgs),

    /// Append a verification event to a claim
    #[command(name = "add-event", alias = "add_step")]
    AddEvent(AddEventArgs),

    /// Append a well-known protocol outcome with its default score
    Record(RecordArgs),

    /// Show the full record of a claim
    Status(StatusArgs),

    /// List claims
    List(ListArgs),

    /// Show the protocol outcome score table
    Protocol,

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the create command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// The proposition to track
    pub claim_text: String,

    /// Starting confidence (0.0-1.0, default 0.5)
    #[arg(long)]
    pub confidence: Option<f64>,
}

/// Arguments for the add-event command.
#[derive(Debug, Parser)]
pub struct AddEventArgs {
    /// Claim ID
    pub id: String,

    /// Verification process type (e.g., OxfordDebate, FunctionalAudit)
    pub process_type: String,

    /// Identifier of the acting agent (e.g., did:synergy:eig-lead)
    pub agent_did: String,

    /// Score change, e.g. 0.10 (debate win) or -0.10 (audit fail)
    #[arg(allow_hyphen_values = true)]
    pub score_change: String,

    /// Attestation VC URI
    pub attestation_uri: String,
}

/// Arguments for the record command.
#[derive(Debug, Parser)]
pub struct RecordArgs {
    /// Claim ID
    pub id: String,

    /// Protocol outcome (osd-victory, osd-loss, audit-pass, audit-fail,
    /// malicious-attestation, final-approval)
    pub outcome: ProtocolOutcome,

    /// Identifier of the acting agent
    pub agent_did: String,

    /// Attestation VC URI
    pub attestation_uri: String,
}

/// Arguments for the status command.
#[derive(Debug, Parser)]
pub struct StatusArgs {
    /// Claim ID
    pub id: String,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Minimum current confidence
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Maximum number of results
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Write a default configuration file if none exists
    Init,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
