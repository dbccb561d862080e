//! `hoist setup <name>` - plan and write a new module tree.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError, RunConfig,
        command::{Command, Completion},
        ports::Filesystem,
        services::{ScaffoldExecutor, ScaffoldPlanner},
    },
    domain::{DomainValidator, ModeFlags, ModuleName, ScaffoldPlan},
    error::{HoistError, HoistResult},
};

/// Raw `setup` arguments, as parsed by the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupRequest {
    pub name: String,
    pub plugin: bool,
    pub bower_only: bool,
    pub node_only: bool,
    /// Plan only; touch nothing.
    pub dry_run: bool,
}

pub struct SetupCommand {
    request: SetupRequest,
    executor: ScaffoldExecutor,
    filesystem: Arc<dyn Filesystem>,
    plan: Option<ScaffoldPlan>,
    root: Option<PathBuf>,
}

impl SetupCommand {
    pub fn new(
        request: SetupRequest,
        executor: ScaffoldExecutor,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            request,
            executor,
            filesystem,
            plan: None,
            root: None,
        }
    }

    /// Available once `configure` has run.
    pub fn plan(&self) -> Option<&ScaffoldPlan> {
        self.plan.as_ref()
    }

    /// Where the module was written; `None` on a dry run.
    pub fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }

    fn planned(&self) -> HoistResult<&ScaffoldPlan> {
        self.plan.as_ref().ok_or_else(|| HoistError::Internal {
            message: "setup executed before configure".into(),
        })
    }
}

impl Command for SetupCommand {
    fn name(&self) -> &'static str {
        "setup"
    }

    /// Flags and name are checked here, before any plan exists.
    fn configure(&mut self, _config: &RunConfig) -> HoistResult<()> {
        let r = &self.request;
        let flags = ModeFlags::new(r.plugin, r.bower_only, r.node_only)?;
        let name = ModuleName::parse(r.name.as_str())?;

        info!(module = %name, mode = %flags, "Planning scaffold");
        self.plan = Some(ScaffoldPlanner::plan(&name, flags));
        Ok(())
    }

    fn validate(&self, config: &RunConfig) -> HoistResult<()> {
        let plan = self.planned()?;
        DomainValidator::validate_plan(plan)?;

        let root = plan.root().under(config.working_dir());
        if !self.request.dry_run && self.filesystem.exists(&root) {
            return Err(ApplicationError::PathExists { path: root }.into());
        }
        Ok(())
    }

    #[instrument(skip_all, fields(module = %self.request.name, dry_run = self.request.dry_run))]
    fn execute(&mut self, config: &RunConfig) -> HoistResult<Completion> {
        if self.request.dry_run {
            info!("Dry run, nothing written");
            return Ok(Completion::Continue);
        }

        let root = self.executor.execute(self.planned()?, config.working_dir())?;
        self.root = Some(root);
        Ok(Completion::Continue)
    }
}
