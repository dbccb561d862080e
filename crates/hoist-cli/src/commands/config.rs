//! `hoist config`: inspect the effective configuration.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            output.print(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let optional = |v: Option<String>| v.unwrap_or_else(|| "(unset)".into());

    match key {
        "install.node_program" => Ok(config.install.node_program.clone()),
        "install.front_end_program" => Ok(config.install.front_end_program.clone()),
        "install.assume_yes" => Ok(optional(config.install.assume_yes.map(|b| b.to_string()))),
        "registry.program" => Ok(config.registry.program.clone()),
        "templates.local_path" => Ok(optional(
            config
                .templates
                .local_path
                .as_ref()
                .map(|p| p.display().to_string()),
        )),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        _ => Err(CliError::UnknownConfigKey { key: key.into() }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
