//! Driving port: the command pipeline.
//!
//! The host calls the three stages in a fixed order through [`run_command`].
//! Nothing is registered against lifecycle events; ordering is explicit.

use tracing::{debug, instrument};

use crate::application::config::RunConfig;
use crate::error::HoistResult;

/// What the host should do once a command finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Hand control back; the host may keep going.
    Continue,
    /// The command is terminal; the host should exit cleanly (status 0).
    Exit,
}

pub trait Command {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Turn raw input into checked values. No side effects.
    fn configure(&mut self, _config: &RunConfig) -> HoistResult<()> {
        Ok(())
    }

    /// Check preconditions against the environment. Read-only.
    fn validate(&self, _config: &RunConfig) -> HoistResult<()> {
        Ok(())
    }

    /// Perform the work.
    fn execute(&mut self, config: &RunConfig) -> HoistResult<Completion>;
}

/// Run `configure`, `validate` and `execute` in order, stopping at the first
/// error.
#[instrument(skip_all, fields(command = command.name()))]
pub fn run_command(command: &mut dyn Command, config: &RunConfig) -> HoistResult<Completion> {
    debug!("configure");
    command.configure(config)?;
    debug!("validate");
    command.validate(config)?;
    debug!("execute");
    let completion = command.execute(config)?;
    debug!(?completion, "finished");
    Ok(completion)
}
