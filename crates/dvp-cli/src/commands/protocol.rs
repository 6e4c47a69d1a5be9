//! Protocol command implementation.

use crate::error::Result;
use crate::output::Formatter;

/// Execute the protocol command.
pub fn execute_protocol(formatter: &Formatter) -> Result<String> {
    formatter.protocol_table()
}
