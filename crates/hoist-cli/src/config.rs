//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the [`RunConfig`]
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `HOIST_<SECTION>__<KEY>`, e.g.
//!    `HOIST_INSTALL__ASSUME_YES=true` (a `.env` file is read first)
//! 3. Config file: `--config FILE`, or the platform config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use hoist_core::application::{
    RunConfig,
    config::{DEFAULT_FRONT_END_PROGRAM, DEFAULT_NODE_PROGRAM},
};

use crate::error::{CliError, CliResult};

const ENV_PREFIX: &str = "HOIST";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// External package managers and the location prompt.
    pub install: InstallConfig,
    /// Registry client settings.
    pub registry: RegistryConfig,
    /// Blueprint settings.
    pub templates: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub node_program: String,
    pub front_end_program: String,
    /// Pre-answer for the location prompt in non-interactive environments.
    pub assume_yes: Option<bool>,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            node_program: DEFAULT_NODE_PROGRAM.into(),
            front_end_program: DEFAULT_FRONT_END_PROGRAM.into(),
            assume_yes: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Binary used for `view` queries.
    pub program: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_NODE_PROGRAM.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Files here replace built-in blueprints with the same logical path.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the file, then the environment.
    ///
    /// A file named with `--config` must exist; the default one may not.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> CliResult<Self> {
        let settings = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(required))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| config_error(path, e))?;

        settings
            .try_deserialize()
            .map_err(|e| config_error(path, e))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.hoist.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "hoist", "hoist")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".hoist.toml"))
    }

    /// The per-invocation settings handed to every core command.
    pub fn run_config(&self, working_dir: PathBuf, assume_yes: Option<bool>) -> RunConfig {
        RunConfig::new(working_dir)
            .with_node_program(&self.install.node_program)
            .with_front_end_program(&self.install.front_end_program)
            .with_assume_yes(assume_yes.or(self.install.assume_yes))
    }
}

fn config_error(path: &Path, e: config::ConfigError) -> CliError {
    CliError::ConfigError {
        message: format!("{} ({})", e, path.display()),
        source: Some(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn defaults_name_npm_and_bower() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.install.node_program, "npm");
        assert_eq!(cfg.install.front_end_program, "bower");
        assert_eq!(cfg.registry.program, "npm");
        assert_eq!(cfg.install.assume_yes, None);
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&dir.path().join("absent.toml"), false).unwrap();
        assert_eq!(cfg.install, InstallConfig::default());
    }

    #[test]
    fn missing_required_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::load(Some(&path)),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hoist.toml");
        fs::write(
            &path,
            "[install]\nnode_program = \"pnpm\"\nassume_yes = true\n\n\
             [templates]\nlocal_path = \"/srv/blueprints\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.install.node_program, "pnpm");
        assert_eq!(cfg.install.front_end_program, "bower");
        assert_eq!(cfg.install.assume_yes, Some(true));
        assert_eq!(
            cfg.templates.local_path,
            Some(PathBuf::from("/srv/blueprints"))
        );
    }

    #[test]
    fn flag_answer_wins_over_configured_one() {
        let mut cfg = AppConfig::default();
        cfg.install.assume_yes = Some(false);

        let run = cfg.run_config(PathBuf::from("/work"), Some(true));
        assert_eq!(run.assume_yes(), Some(true));

        let run = cfg.run_config(PathBuf::from("/work"), None);
        assert_eq!(run.assume_yes(), Some(false));
        assert_eq!(run.node_program(), "npm");
        assert_eq!(run.working_dir(), Path::new("/work"));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
