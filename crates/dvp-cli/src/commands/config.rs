//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
pub fn execute_config(
    args: ConfigArgs,
    config: &Config,
    config_path: &Path,
    formatter: &Formatter,
) -> Result<String> {
    match args.action {
        ConfigAction::Show => {
            let contents = toml::to_string_pretty(config)
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
            Ok(format!("# {}\n{}", config_path.display(), contents))
        }
        ConfigAction::Init => {
            if config_path.exists() {
                return Ok(formatter.info(&format!(
                    "Configuration already exists at {}",
                    config_path.display()
                )));
            }
            Config::default().save_to(config_path)?;
            Ok(formatter.success(&format!("Wrote {}", config_path.display())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::quiet;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_show() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let init = ConfigArgs {
            action: ConfigAction::Init,
        };
        execute_config(init, &Config::default(), &path, &quiet()).unwrap();
        assert!(path.exists());

        let show = ConfigArgs {
            action: ConfigAction::Show,
        };
        let output = execute_config(show, &Config::load_from(&path).unwrap(), &path, &quiet()).unwrap();
        assert!(output.contains("ledger_path = \"data/ledger.json\""));
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "ledger_path = \"custom.json\"\n").unwrap();

        let init = ConfigArgs {
            action: ConfigAction::Init,
        };
        execute_config(init, &Config::default(), &path, &quiet()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ledger_path = \"custom.json\"\n");
    }
}
