//! `stackforge config`: inspect the loaded configuration.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// `explicit` is the `--config` path, if one was given.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    explicit: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| CliError::ConfigError {
                message: format!(
                    "Unknown config key '{key}'. Known keys: {}",
                    AppConfig::KEYS.join(", ")
                ),
                source: None,
            })?;
            // Bare value so it can be captured in scripts.
            println!("{value}");
        }

        ConfigCommands::List => {
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.header("Current configuration:")?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            let path = explicit.unwrap_or_else(AppConfig::config_path);
            println!("{}", path.display());
        }
    }

    Ok(())
}
