//! Implementation of the `hoist install` command.

use std::sync::Arc;

use tracing::instrument;

use hoist_core::application::{InstallCommand, InstallOrchestrator, run_command};

use crate::{
    cli::InstallArgs,
    commands::{Adapters, current_dir},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
    prompt::TerminalPrompt,
};

#[instrument(skip_all)]
pub fn execute(args: InstallArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = current_dir()?;
    let run_config = config.run_config(cwd.clone(), args.answer());
    let adapters = Adapters::new(&config)?;

    let orchestrator = InstallOrchestrator::new(
        adapters.resolver(cwd),
        adapters.merger(),
        adapters.executor(),
        Arc::new(TerminalPrompt::new()),
    );
    let mut command = InstallCommand::new(orchestrator);
    run_command(&mut command, &run_config)?;

    let Some(report) = command.report() else {
        return Ok(());
    };

    if report.declined() {
        output.warning("Install cancelled, nothing was changed")?;
        return Ok(());
    }

    output.success(&format!(
        "Linked '{}' from {}",
        report.host.name,
        report.host.dir.display()
    ))?;

    if output.is_verbose() {
        if let Some(manifest) = &report.manifest {
            output.print("Dependencies:")?;
            for (name, version) in manifest.dependencies() {
                output.print(&format!("  {name} {version}"))?;
            }
        }
    }

    Ok(())
}
