//! `hoist templates`: list the blueprints `setup` draws from.

use hoist_core::application::ports::TemplateStore;

use crate::{commands::Adapters, config::AppConfig, error::CliResult, output::OutputManager};

pub fn execute(config: AppConfig, output: OutputManager) -> CliResult<()> {
    let adapters = Adapters::new(&config)?;
    let ids = adapters.store.list()?;

    output.header("Available Blueprints:")?;
    for id in &ids {
        output.print(&format!("  {id}"))?;
    }
    if let Some(dir) = &config.templates.local_path {
        output.info(&format!("Overrides from {}", dir.display()))?;
    }

    Ok(())
}
