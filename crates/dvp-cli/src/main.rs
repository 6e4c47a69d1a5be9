//! DVP CLI - Command-line interface for the Synergy Ledger.

use clap::Parser;
use dvp_cli::commands;
use dvp_cli::{Cli, Command, Config, Formatter};
use dvp_service::ClaimService;
use dvp_store::JsonFileStore;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    // Log to stderr so stdout stays machine-readable
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> dvp_cli::Result<String> {
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Commands that never touch the ledger
    let command = match cli.command {
        Command::Protocol => return commands::execute_protocol(&formatter),
        Command::Config(args) => {
            return commands::execute_config(args, &config, &config_path, &formatter)
        }
        other => other,
    };

    let ledger_path = config.ledger_path(cli.ledger.as_deref());
    tracing::debug!(ledger = %ledger_path.display(), "using ledger");
    let service = ClaimService::new(JsonFileStore::new(ledger_path));

    match command {
        Command::Create(args) => commands::execute_create(args, &service, &formatter),
        Command::AddEvent(args) => commands::execute_add_event(args, &service, &formatter),
        Command::Record(args) => commands::execute_record(args, &service, &formatter),
        Command::Status(args) => commands::execute_status(args, &service, &formatter),
        Command::List(args) => commands::execute_list(args, &service, &formatter),
        Command::Protocol | Command::Config(_) => unreachable!("handled above"),
    }
}
