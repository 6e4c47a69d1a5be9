//! Command implementations.
//!
//! Each command returns the text to print; `main` writes it to stdout.

pub mod add_event;
pub mod config;
pub mod create;
pub mod list;
pub mod protocol;
pub mod status;

pub use self::add_event::{execute_add_event, execute_record};
pub use self::config::execute_config;
pub use self::create::execute_create;
pub use self::list::execute_list;
pub use self::protocol::execute_protocol;
pub use self::status::execute_status;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::OutputFormat;
    use crate::output::Formatter;
    use dvp_service::ClaimService;
    use dvp_store::InMemoryStore;

    pub fn service() -> ClaimService<InMemoryStore> {
        ClaimService::new(InMemoryStore::new())
    }

    pub fn quiet() -> Formatter {
        Formatter::new(OutputFormat::Quiet, false)
    }
}
