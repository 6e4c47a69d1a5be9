//! Add-event and record command implementations.

use crate::cli::{AddEventArgs, RecordArgs};
use crate::error::Result;
use crate::output::Formatter;
use dvp_domain::{parse_score_delta, ClaimId};
use dvp_service::{ClaimService, EventRequest};
use dvp_store::LedgerStore;

/// Execute the add-event command.
///
/// The score change is parsed before the ledger is loaded, so a malformed
/// number never touches storage.
pub fn execute_add_event<S: LedgerStore>(
    args: AddEventArgs,
    service: &ClaimService<S>,
    formatter: &Formatter,
) -> Result<String> {
    let score_change = parse_score_delta(&args.score_change)?;
    let request = EventRequest::new(
        args.process_type,
        args.agent_did,
        score_change,
        args.attestation_uri,
    );

    let outcome = service.append_event(&ClaimId::new(args.id), request)?;
    formatter.event_appended(&outcome)
}

/// Execute the record command.
pub fn execute_record<S: LedgerStore>(
    args: RecordArgs,
    service: &ClaimService<S>,
    formatter: &Formatter,
) -> Result<String> {
    let request = EventRequest::from_outcome(args.outcome, args.agent_did, args.attestation_uri);
    let outcome = service.append_event(&ClaimId::new(args.id), request)?;
    formatter.event_appended(&outcome)
}
