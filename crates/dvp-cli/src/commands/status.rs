//! Status command implementation.

use crate::cli::StatusArgs;
use crate::error::Result;
use crate::output::Formatter;
use dvp_domain::ClaimId;
use dvp_service::ClaimService;
use dvp_store::LedgerStore;

/// Execute the status command.
pub fn execute_status<S: LedgerStore>(
    args: StatusArgs,
    service: &ClaimService<S>,
    formatter: &Formatter,
) -> Result<String> {
    let claim = service.get_status(&ClaimId::new(args.id))?;
    formatter.format_claim(&claim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::service;
    use crate::config::OutputFormat;

    #[test]
    fn test_status_of_fresh_claim() {
        let service = service();
        let id = service.create_claim("motion", None).unwrap();
        let formatter = Formatter::new(OutputFormat::Json, false);

        let output = execute_status(StatusArgs { id: id.to_string() }, &service, &formatter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["current_confidence"], 0.5);
        assert_eq!(value["lineage"].as_array().unwrap().len(), 0);
    }
}
