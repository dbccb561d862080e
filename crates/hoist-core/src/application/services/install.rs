//! Install Orchestrator - attaches an application or test tree to its host.
//!
//! ## States
//!
//! ```text
//! Idle ─┬─> ConfirmingLocation ─┬─> Resolving -> Merging -> Persisting
//!       │                       └─> Declined
//!       └─> Resolving (cwd is `app/` or `test/`)
//!
//! Persisting -> InstallingDependencies -> LinkingHost -> Done
//! ```
//!
//! The host is the parent of the working directory. Any error aborts the
//! remaining states; earlier writes stay on disk.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError, RunConfig,
        command::{Command, Completion},
        ports::Prompt,
        services::{DependencyResolver, HostModule, ManifestMerger, ScaffoldExecutor},
    },
    domain::Manifest,
    error::{HoistError, HoistResult},
};

pub const PACKAGE_JSON: &str = "package.json";
pub const BOWER_JSON: &str = "bower.json";

/// Directory names from which `install` runs without asking.
const EXPECTED_DIRS: [&str; 2] = ["app", "test"];

const LOCATION_QUESTION: &str = "You are running \"install\" outside of the \"test\" or \"app\" \
directory; this is not recommended.\nProceed?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    Idle,
    ConfirmingLocation,
    Resolving,
    Merging,
    Persisting,
    InstallingDependencies,
    LinkingHost,
    Done,
    Declined,
}

impl InstallState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Declined)
    }
}

impl fmt::Display for InstallState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::ConfirmingLocation => "confirming-location",
            Self::Resolving => "resolving",
            Self::Merging => "merging",
            Self::Persisting => "persisting",
            Self::InstallingDependencies => "installing-dependencies",
            Self::LinkingHost => "linking-host",
            Self::Done => "done",
            Self::Declined => "declined",
        };
        f.write_str(s)
    }
}

/// What an install run did.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallReport {
    /// Every state visited, in order, ending in a terminal one.
    pub states: Vec<InstallState>,
    pub host: HostModule,
    /// The application manifest as persisted; `None` when declined.
    pub manifest: Option<Manifest>,
}

impl InstallReport {
    pub fn declined(&self) -> bool {
        self.states.last() == Some(&InstallState::Declined)
    }
}

/// Manifests carried between states.
struct Working {
    host: Manifest,
    app: Manifest,
    /// The host manifest was the app's own (no `package.json` one level up).
    shared: bool,
}

pub struct InstallOrchestrator {
    resolver: DependencyResolver,
    merger: ManifestMerger,
    executor: ScaffoldExecutor,
    prompt: Arc<dyn Prompt>,
}

impl InstallOrchestrator {
    pub fn new(
        resolver: DependencyResolver,
        merger: ManifestMerger,
        executor: ScaffoldExecutor,
        prompt: Arc<dyn Prompt>,
    ) -> Self {
        Self {
            resolver,
            merger,
            executor,
            prompt,
        }
    }

    /// Whether running from `dir` needs the operator's go-ahead.
    pub fn needs_confirmation(dir: &Path) -> bool {
        dir.file_name()
            .and_then(|n| n.to_str())
            .is_none_or(|n| !EXPECTED_DIRS.contains(&n))
    }

    #[instrument(skip_all, fields(dir = %config.working_dir().display()))]
    pub fn run(&self, config: &RunConfig) -> HoistResult<InstallReport> {
        let app_dir = config.working_dir().to_path_buf();
        let host = host_of(&app_dir)?;

        let mut state = InstallState::Idle;
        let mut states = vec![state];
        let mut working: Option<Working> = None;

        while !state.is_terminal() {
            state = match state {
                InstallState::Idle => {
                    if Self::needs_confirmation(&app_dir) {
                        InstallState::ConfirmingLocation
                    } else {
                        InstallState::Resolving
                    }
                }
                InstallState::ConfirmingLocation => {
                    if self.confirm(config)? {
                        InstallState::Resolving
                    } else {
                        InstallState::Declined
                    }
                }
                InstallState::Resolving => {
                    let (mut host_manifest, shared) =
                        self.load_host_manifest(&host.dir, &app_dir)?;
                    let app = self.merger.load(&app_dir.join(PACKAGE_JSON))?;
                    self.resolver.resolve_peers(&mut host_manifest)?;
                    working = Some(Working {
                        host: host_manifest,
                        app,
                        shared,
                    });
                    InstallState::Merging
                }
                InstallState::Merging => {
                    let w = in_progress(&mut working)?;
                    w.host = ManifestMerger::merge_into_dependencies(w.host.clone());
                    if w.shared {
                        w.app = w.host.clone();
                    } else {
                        w.app.absorb_dependencies(w.host.dependencies());
                    }
                    InstallState::Persisting
                }
                InstallState::Persisting => {
                    let w = in_progress(&mut working)?;
                    self.merger.persist(&app_dir.join(PACKAGE_JSON), &w.app)?;
                    self.copy_bower_dependencies(&host.dir, &app_dir)?;
                    InstallState::InstallingDependencies
                }
                InstallState::InstallingDependencies => {
                    self.executor.install_packages(&app_dir, config)?;
                    InstallState::LinkingHost
                }
                InstallState::LinkingHost => {
                    self.executor.link_host(&app_dir, &host)?;
                    InstallState::Done
                }
                InstallState::Done | InstallState::Declined => state,
            };
            info!(%state, "Install state");
            states.push(state);
        }

        Ok(InstallReport {
            states,
            host,
            manifest: working.map(|w| w.app),
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn confirm(&self, config: &RunConfig) -> HoistResult<bool> {
        match config.assume_yes() {
            Some(answer) => {
                info!(answer, "Location prompt pre-answered");
                Ok(answer)
            }
            None => self.prompt.confirm(LOCATION_QUESTION),
        }
    }

    /// `<host>/package.json`, falling back to the app's own manifest. The
    /// flag is set when the fallback was taken.
    fn load_host_manifest(
        &self,
        host_dir: &Path,
        app_dir: &Path,
    ) -> HoistResult<(Manifest, bool)> {
        match self.merger.load(&host_dir.join(PACKAGE_JSON)) {
            Ok(manifest) => Ok((manifest, false)),
            Err(HoistError::Application(ApplicationError::ManifestNotFound { path })) => {
                warn!(path = %path.display(), "Host manifest missing, using the local one");
                Ok((self.merger.load(&app_dir.join(PACKAGE_JSON))?, true))
            }
            Err(e) => Err(e),
        }
    }

    fn copy_bower_dependencies(&self, host_dir: &Path, app_dir: &Path) -> HoistResult<()> {
        let host = self.merger.load_optional(&host_dir.join(BOWER_JSON))?;
        let target = app_dir.join(BOWER_JSON);
        let app = self.merger.load_optional(&target)?;

        match (host, app) {
            (Some(host), Some(mut app)) => {
                info!(dir = %app_dir.display(), "Copying bower.json dependencies");
                app.absorb_dependencies(host.dependencies());
                self.merger.persist(&target, &app)
            }
            _ => {
                info!("No bower.json file found");
                Ok(())
            }
        }
    }
}

fn host_of(app_dir: &Path) -> HoistResult<HostModule> {
    app_dir
        .parent()
        .and_then(HostModule::from_dir)
        .ok_or_else(|| {
            ApplicationError::InvalidLayout {
                path: app_dir.to_path_buf(),
                reason: "no parent directory to attach to".into(),
            }
            .into()
        })
}

fn in_progress(working: &mut Option<Working>) -> HoistResult<&mut Working> {
    working.as_mut().ok_or_else(|| HoistError::Internal {
        message: "install state reached without loaded manifests".into(),
    })
}

// ============================================================================
// Command
// ============================================================================

/// `hoist install`.
pub struct InstallCommand {
    orchestrator: InstallOrchestrator,
    report: Option<InstallReport>,
}

impl InstallCommand {
    pub fn new(orchestrator: InstallOrchestrator) -> Self {
        Self {
            orchestrator,
            report: None,
        }
    }

    pub fn report(&self) -> Option<&InstallReport> {
        self.report.as_ref()
    }
}

impl Command for InstallCommand {
    fn name(&self) -> &'static str {
        "install"
    }

    fn validate(&self, config: &RunConfig) -> HoistResult<()> {
        host_of(config.working_dir()).map(|_| ())
    }

    fn execute(&mut self, config: &RunConfig) -> HoistResult<Completion> {
        let report = self.orchestrator.run(config)?;
        if report.declined() {
            info!("Install declined, nothing changed");
        }
        self.report = Some(report);
        Ok(Completion::Exit)
    }
}
