//! Durable ledger document format
//!
//! Current layout (schema version 1):
//!
//! ```json
//! { "schema_version": 1, "revision": 3, "claims": { "<id>": { ... } } }
//! ```
//!
//! Ledgers written before versioning are a bare `{ "<id>": { ... } }` map.
//! They are read as revision 0 and upgraded on the next save.

use crate::StoreError;
use dvp_domain::{ClaimId, ClaimRecord, Ledger};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Schema version written by this build
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const SCHEMA_KEY: &str = "schema_version";

#[derive(Serialize)]
struct DocumentOut<'a> {
    schema_version: u32,
    revision: u64,
    claims: &'a BTreeMap<ClaimId, ClaimRecord>,
}

#[derive(Deserialize)]
struct DocumentIn {
    schema_version: u32,
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    claims: BTreeMap<ClaimId, ClaimRecord>,
}

/// Serialize `ledger` as it will be stored at `revision`
pub(crate) fn encode(ledger: &Ledger, revision: u64) -> Result<Vec<u8>, StoreError> {
    let document = DocumentOut {
        schema_version: CURRENT_SCHEMA_VERSION,
        revision,
        claims: ledger.as_map(),
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}

/// Parse a stored document into a ledger
pub(crate) fn decode(bytes: &[u8]) -> Result<Ledger, StoreError> {
    let value = parse_value(bytes)?;

    let (revision, claims) = if is_versioned(&value) {
        let document: DocumentIn =
            serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        check_schema(document.schema_version)?;
        (document.revision, document.claims)
    } else {
        let claims: BTreeMap<ClaimId, ClaimRecord> =
            serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        (0, claims)
    };

    for (key, claim) in &claims {
        if key != claim.id() {
            return Err(StoreError::Corrupt(format!(
                "ledger key {} does not match claim id {}",
                key,
                claim.id()
            )));
        }
    }

    Ok(Ledger::from_parts(revision, claims))
}

/// Read only the revision of a stored document
pub(crate) fn peek_revision(bytes: &[u8]) -> Result<u64, StoreError> {
    let value = parse_value(bytes)?;
    if !is_versioned(&value) {
        return Ok(0);
    }

    let version = value
        .get(SCHEMA_KEY)
        .and_then(Value::as_u64)
        .ok_or_else(|| StoreError::Corrupt("schema_version is not an integer".to_string()))?;
    check_schema(u32::try_from(version).unwrap_or(u32::MAX))?;

    match value.get("revision") {
        None => Ok(0),
        Some(revision) => revision
            .as_u64()
            .ok_or_else(|| StoreError::Corrupt("revision is not an integer".to_string())),
    }
}

fn parse_value(bytes: &[u8]) -> Result<Value, StoreError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?;
    if !value.is_object() {
        return Err(StoreError::Corrupt("ledger root must be a JSON object".to_string()));
    }
    Ok(value)
}

fn is_versioned(value: &Value) -> bool {
    value.get(SCHEMA_KEY).is_some()
}

fn check_schema(found: u32) -> Result<(), StoreError> {
    if found > CURRENT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found,
            supported: CURRENT_SCHEMA_VERSION,
        });
    }
    Ok(())
}
