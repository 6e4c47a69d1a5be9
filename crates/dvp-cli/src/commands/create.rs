//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::Result;
use crate::output::Formatter;
use dvp_service::ClaimService;
use dvp_store::LedgerStore;

/// Execute the create command.
pub fn execute_create<S: LedgerStore>(
    args: CreateArgs,
    service: &ClaimService<S>,
    formatter: &Formatter,
) -> Result<String> {
    let id = service.create_claim(&args.claim_text, args.confidence)?;
    formatter.claim_created(&id)
}
