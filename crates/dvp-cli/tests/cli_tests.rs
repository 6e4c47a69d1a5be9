//! End-to-end tests for the CLI command layer
//!
//! Arguments are parsed with clap exactly as the binary does, then executed
//! against a ledger file in a temporary directory.

use clap::Parser;
use dvp_cli::commands;
use dvp_cli::config::OutputFormat;
use dvp_cli::{Cli, CliError, Command, Formatter};
use dvp_service::{ClaimService, ServiceError};
use dvp_store::JsonFileStore;
use tempfile::TempDir;

fn run(service: &ClaimService<JsonFileStore>, formatter: &Formatter, args: &[&str]) -> dvp_cli::Result<String> {
    let cli = Cli::parse_from(std::iter::once("dvp").chain(args.iter().copied()));
    match cli.command {
        Command::Create(args) => commands::execute_create(args, service, formatter),
        Command::AddEvent(args) => commands::execute_add_event(args, service, formatter),
        Command::Record(args) => commands::execute_record(args, service, formatter),
        Command::Status(args) => commands::execute_status(args, service, formatter),
        Command::List(args) => commands::execute_list(args, service, formatter),
        other => panic!("Unexpected command in test: {:?}", other),
    }
}

fn setup() -> (TempDir, ClaimService<JsonFileStore>, Formatter) {
    let dir = TempDir::new().unwrap();
    let service = ClaimService::new(JsonFileStore::new(dir.path().join("ledger.json")));
    (dir, service, Formatter::new(OutputFormat::Quiet, false))
}

#[test]
fn test_create_add_event_status_flow() {
    let (_dir, service, quiet) = setup();

    let id = run(&service, &quiet, &["create", "The Synergy Ledger will solve Civil Unrest."]).unwrap();
    assert_eq!(id.len(), 64);

    let confidence = run(
        &service,
        &quiet,
        &["add-event", &id, "OxfordDebate", "did:synergy:eig-lead", "0.10", "https://ledger.com/vc/osd-001"],
    )
    .unwrap();
    assert_eq!(confidence, "0.60");

    let confidence = run(
        &service,
        &quiet,
        &["add_step", &id, "FunctionalAudit", "did:synergy:ffg-node-a", "-0.10", "https://ledger.com/vc/audit-002"],
    )
    .unwrap();
    assert_eq!(confidence, "0.50");

    let json = Formatter::new(OutputFormat::Json, false);
    let status = run(&service, &json, &["status", &id]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&status).unwrap();
    assert_eq!(value["id"], id.as_str());
    assert_eq!(value["lineage"].as_array().unwrap().len(), 2);
    assert_eq!(value["lineage"][1]["step_id"], format!("functionalaudit-{}-2", id));
}

#[test]
fn test_record_then_list() {
    let (_dir, service, quiet) = setup();

    let id = run(&service, &quiet, &["create", "motion", "--confidence", "0.95"]).unwrap();
    let confidence = run(&service, &quiet, &["record", &id, "final-approval", "did:synergy:council", "uri:final"]).unwrap();
    assert_eq!(confidence, "1.00");

    let listed = run(&service, &quiet, &["list", "--min-confidence", "0.9"]).unwrap();
    assert_eq!(listed, id);
}

#[test]
fn test_failures_are_typed() {
    let (_dir, service, quiet) = setup();

    let missing = run(&service, &quiet, &["status", "nope"]);
    assert!(matches!(missing, Err(CliError::Service(ServiceError::NotFound(_)))));

    let id = run(&service, &quiet, &["create", "motion"]).unwrap();
    let bad_score = run(&service, &quiet, &["add-event", &id, "Audit", "did:a", "lots", "uri"]);
    assert!(matches!(bad_score, Err(CliError::Service(ServiceError::Validation(_)))));

    let bad_confidence = run(&service, &quiet, &["create", "other", "--confidence", "7"]);
    assert!(matches!(bad_confidence, Err(CliError::Service(ServiceError::Validation(_)))));
}

#[test]
fn test_error_message_format() {
    let (_dir, service, quiet) = setup();
    let err = run(&service, &quiet, &["status", "deadbeef"]).unwrap_err();
    assert_eq!(err.to_string(), "Claim not found: deadbeef");
}
