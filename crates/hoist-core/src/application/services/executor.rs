//! Scaffold Executor - applies plans and attaches modules to their host.
//!
//! Actions run strictly in plan order. The module root is created with
//! `create_dir`, so an existing directory stops the run before anything is
//! written. There is no rollback: a failure part-way leaves what was written.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError, RunConfig,
        ports::{CommandRunner, Filesystem, Invocation, TemplateStore},
    },
    domain::{FileAction, RenderContext, ScaffoldPlan, TemplateId},
    error::{HoistError, HoistResult},
};

/// Directory a module's node packages are installed into.
pub const NODE_MODULES: &str = "node_modules";
/// Directory a module's bower packages are installed into.
pub const BOWER_COMPONENTS: &str = "bower_components";

/// The module an application or test tree is attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostModule {
    /// Link name under `node_modules/` and `bower_components/`.
    pub name: String,
    /// Link target.
    pub dir: PathBuf,
}

impl HostModule {
    /// Host named after its directory, as package managers resolve it.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Option<Self> {
        let dir = dir.into();
        let name = dir.file_name()?.to_str()?.to_string();
        Some(Self { name, dir })
    }
}

pub struct ScaffoldExecutor {
    filesystem: Arc<dyn Filesystem>,
    store: Arc<dyn TemplateStore>,
    runner: Arc<dyn CommandRunner>,
}

impl ScaffoldExecutor {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        store: Arc<dyn TemplateStore>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            filesystem,
            store,
            runner,
        }
    }

    /// Materialize `plan` under `base`. Returns the module root.
    #[instrument(skip_all, fields(root = %plan.root(), base = %base.display()))]
    pub fn execute(&self, plan: &ScaffoldPlan, base: &Path) -> HoistResult<PathBuf> {
        let root = plan.root().under(base);
        self.filesystem.create_dir(&root)?;

        for action in plan.actions() {
            let dest = action.dest().under(&root);
            debug!(%action, "Applying");

            match action {
                FileAction::MakeDir(_) => self.filesystem.create_dir(&dest)?,
                FileAction::RenderTemplate {
                    template, context, ..
                } => {
                    let source = self.template_text(template)?;
                    let rendered = context.render(&source, |id| self.template_text(id))?;
                    self.filesystem.write_file(&dest, &rendered)?;
                }
                FileAction::WriteJson {
                    template,
                    overrides,
                    ..
                } => {
                    let mut document = self
                        .store
                        .get(template)?
                        .as_json()
                        .cloned()
                        .ok_or_else(|| rendering_failed(template, "not a JSON blueprint"))?;
                    for o in overrides {
                        o.apply(&mut document);
                    }
                    let mut content = serde_json::to_string_pretty(&Value::Object(document))
                        .map_err(|e| rendering_failed(template, &e.to_string()))?;
                    content.push('\n');
                    self.filesystem.write_file(&dest, &content)?;
                }
            }
        }

        info!(actions = plan.action_count(), "Scaffold written");
        Ok(root)
    }

    /// Render a single text blueprint to `dest`, leaving an existing file
    /// untouched. Returns whether the file was written.
    pub fn render_if_absent(
        &self,
        template: &TemplateId,
        context: &RenderContext,
        dest: &Path,
    ) -> HoistResult<bool> {
        if self.filesystem.exists(dest) {
            debug!(path = %dest.display(), "Exists, not overwriting");
            return Ok(false);
        }
        let source = self.template_text(template)?;
        let rendered = context.render(&source, |id| self.template_text(id))?;
        self.filesystem.write_file(dest, &rendered)?;
        Ok(true)
    }

    // ── Attach to host ────────────────────────────────────────────────

    /// Node install, then the front-end install.
    pub fn install_packages(&self, dir: &Path, config: &RunConfig) -> HoistResult<()> {
        self.install_node(dir, config)?;
        self.install_front_end(dir, config)
    }

    pub fn install_node(&self, dir: &Path, config: &RunConfig) -> HoistResult<()> {
        self.run_install(config.node_program(), dir)
    }

    /// Skipped when `dir` has no `bower.json`.
    pub fn install_front_end(&self, dir: &Path, config: &RunConfig) -> HoistResult<()> {
        if !self.filesystem.exists(&dir.join("bower.json")) {
            info!(dir = %dir.display(), "No bower.json, skipping front-end install");
            return Ok(());
        }
        self.run_install(config.front_end_program(), dir)
    }

    /// Link `host` into both package directories of `dir`.
    pub fn link_host(&self, dir: &Path, host: &HostModule) -> HoistResult<()> {
        for packages in [NODE_MODULES, BOWER_COMPONENTS] {
            self.link(&host.dir, &dir.join(packages).join(&host.name))?;
        }
        Ok(())
    }

    /// Create `link -> target`, creating the link's parent if needed.
    /// An occupied link path counts as success.
    pub fn link(&self, target: &Path, link: &Path) -> HoistResult<()> {
        if let Some(parent) = link.parent() {
            self.filesystem.create_dir_all(parent)?;
        }

        info!(link = %link.display(), target = %target.display(), "Symlinking");
        match self.filesystem.symlink(target, link) {
            Err(HoistError::Application(ApplicationError::PathExists { .. })) => {
                debug!(link = %link.display(), "Link already present");
                Ok(())
            }
            other => other,
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run_install(&self, program: &str, dir: &Path) -> HoistResult<()> {
        let invocation = Invocation::new(program, dir).arg("install").inherit_stdio();
        info!(command = %invocation, dir = %dir.display(), "Running");
        self.runner.run(&invocation)?.check(&invocation)?;
        Ok(())
    }

    fn template_text(&self, id: &TemplateId) -> HoistResult<String> {
        let template = self.store.get(id)?;
        template
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| rendering_failed(id, "not a text blueprint"))
    }
}

fn rendering_failed(id: &TemplateId, reason: &str) -> HoistError {
    ApplicationError::RenderingFailed {
        reason: format!("{id}: {reason}"),
    }
    .into()
}
