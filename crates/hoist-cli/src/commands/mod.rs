//! Command handlers.
//!
//! Each handler wires adapters into a core command, runs it through
//! `run_command`, and reports the result. No business logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use hoist_adapters::{BlueprintStore, LocalFilesystem, NpmRegistry, ProcessRunner};
use hoist_core::application::{DependencyResolver, ManifestMerger, ScaffoldExecutor};
use tracing::debug;

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod install;
pub mod setup;
pub mod templates;

/// Real adapters shared by the handlers of one invocation.
pub(crate) struct Adapters {
    pub filesystem: Arc<LocalFilesystem>,
    pub store: Arc<BlueprintStore>,
    pub runner: Arc<ProcessRunner>,
    registry_program: String,
}

impl Adapters {
    pub fn new(config: &AppConfig) -> CliResult<Self> {
        let store = match &config.templates.local_path {
            Some(dir) => {
                debug!(dir = %dir.display(), "Loading blueprint overrides");
                BlueprintStore::with_overrides(dir)?
            }
            None => BlueprintStore::with_builtin()?,
        };

        Ok(Self {
            filesystem: Arc::new(LocalFilesystem::new()),
            store: Arc::new(store),
            runner: Arc::new(ProcessRunner::new()),
            registry_program: config.registry.program.clone(),
        })
    }

    pub fn executor(&self) -> ScaffoldExecutor {
        ScaffoldExecutor::new(
            self.filesystem.clone(),
            self.store.clone(),
            self.runner.clone(),
        )
    }

    pub fn merger(&self) -> ManifestMerger {
        ManifestMerger::new(self.filesystem.clone())
    }

    /// Registry queries run from `cwd` so its `.npmrc` applies.
    pub fn resolver(&self, cwd: PathBuf) -> DependencyResolver {
        DependencyResolver::new(Arc::new(NpmRegistry::new(
            self.runner.clone(),
            self.registry_program.clone(),
            cwd,
        )))
    }
}

pub(crate) fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().map_err(|e| crate::error::CliError::IoError {
        message: "cannot determine the current directory".into(),
        source: e,
    })
}
