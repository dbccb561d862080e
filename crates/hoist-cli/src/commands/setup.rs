//! Implementation of the `hoist setup` command.
//!
//! Responsibility: translate CLI arguments into a `SetupRequest`, run the
//! core setup command, and display results.

use tracing::{info, instrument};

use hoist_core::{
    application::{SetupCommand, SetupRequest, run_command},
    domain::ScaffoldPlan,
};

use crate::{
    cli::SetupArgs,
    commands::{Adapters, current_dir},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(module = %args.name))]
pub fn execute(args: SetupArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let run_config = config.run_config(current_dir()?, None);
    let adapters = Adapters::new(&config)?;

    let request = SetupRequest {
        name: args.name,
        plugin: args.plugin,
        bower_only: args.bower_only,
        node_only: args.node_only,
        dry_run: args.dry_run,
    };
    let name = request.name.clone();
    let mut command = SetupCommand::new(request, adapters.executor(), adapters.filesystem.clone());

    let spinner = output.spinner(&format!("Creating '{name}'..."));
    let result = run_command(&mut command, &run_config);
    spinner.finish_and_clear();
    result?;

    if args.dry_run {
        if let Some(plan) = command.plan() {
            show_plan(plan, &output)?;
        }
        return Ok(());
    }

    let root = command
        .root()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| name.clone());
    info!(module = %name, root = %root, "Module created");

    output.success(&format!("Module '{name}' created at {root}"))?;
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {name}"))?;
    if !args.plugin && !args.bower_only && !args.node_only {
        output.print("  cd app && hoist install")?;
    } else {
        output.print("  cd test && hoist install")?;
    }

    Ok(())
}

fn show_plan(plan: &ScaffoldPlan, output: &OutputManager) -> CliResult<()> {
    output.info(&format!(
        "Dry run: would create '{}' with {} entries",
        plan.root(),
        plan.action_count()
    ))?;
    for action in plan.actions() {
        output.print(&format!("  {action}"))?;
    }
    Ok(())
}
