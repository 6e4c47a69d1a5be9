//! List command implementation.

use crate::cli::ListArgs;
use crate::error::Result;
use crate::output::Formatter;
use dvp_service::{ClaimFilter, ClaimService};
use dvp_store::LedgerStore;

/// Execute the list command.
pub fn execute_list<S: LedgerStore>(
    args: ListArgs,
    service: &ClaimService<S>,
    formatter: &Formatter,
) -> Result<String> {
    let filter = ClaimFilter {
        min_confidence: args.min_confidence,
        limit: args.limit,
    };
    let claims = service.list_claims(&filter)?;
    formatter.format_claims(&claims)
}
