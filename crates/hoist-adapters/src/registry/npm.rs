//! Registry client backed by the `npm` CLI.
//!
//! Two lookups per query:
//!
//! 1. `npm view <name>@<range> version --json` - every published version in
//!    the range (a bare string when there is exactly one). The last is taken.
//! 2. `npm view <name>@<version> --json` - that version's manifest, for its
//!    `peerDependencies`.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use hoist_core::{
    application::{
        ApplicationError,
        ports::{CommandRunner, Invocation, RegistryClient},
    },
    domain::{DependencyMap, PeerRecord},
    error::{HoistError, HoistResult},
};

#[derive(Debug, Error)]
enum NpmViewError {
    #[error("no matching version")]
    NoMatch,

    #[error("{0}")]
    Failed(String),

    #[error("unexpected npm output: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl NpmViewError {
    fn into_hoist(self, package: &str, range: &str) -> HoistError {
        match self {
            Self::NoMatch => ApplicationError::RegistryNotFound {
                package: package.into(),
                range: range.into(),
            },
            other => ApplicationError::RegistryUnavailable {
                package: package.into(),
                reason: other.to_string(),
            },
        }
        .into()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Versions {
    One(String),
    Many(Vec<String>),
}

impl Versions {
    fn latest(self) -> Option<String> {
        match self {
            Self::One(v) => Some(v),
            Self::Many(vs) => vs.into_iter().last(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct PublishedManifest {
    version: String,
    #[serde(default, rename = "peerDependencies")]
    peer_dependencies: DependencyMap,
}

pub struct NpmRegistry {
    runner: Arc<dyn CommandRunner>,
    program: String,
    cwd: PathBuf,
}

impl NpmRegistry {
    /// `program` is normally `npm`; `cwd` decides which `.npmrc` applies.
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        program: impl Into<String>,
        cwd: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            cwd: cwd.into(),
        }
    }

    fn view(&self, spec: String, extra: &[&str]) -> Result<String, NpmViewError> {
        let invocation = Invocation::new(&self.program, &self.cwd)
            .arg("view")
            .arg(spec)
            .args(extra.iter().copied());

        let output = self
            .runner
            .run(&invocation)
            .map_err(|e| NpmViewError::Failed(e.to_string()))?;

        if !output.is_success() {
            if output.stdout.contains("E404") || output.stderr.contains("E404") {
                return Err(NpmViewError::NoMatch);
            }
            let detail = output.stderr.trim();
            return Err(NpmViewError::Failed(if detail.is_empty() {
                format!("{} exited with {:?}", invocation, output.status)
            } else {
                detail.to_string()
            }));
        }

        let stdout = output.stdout.trim().to_string();
        if stdout.is_empty() {
            return Err(NpmViewError::NoMatch);
        }
        Ok(stdout)
    }

    fn latest_version(&self, name: &str, range: &str) -> Result<String, NpmViewError> {
        let raw = self.view(format!("{name}@{range}"), &["version", "--json"])?;
        serde_json::from_str::<Versions>(&raw)?
            .latest()
            .ok_or(NpmViewError::NoMatch)
    }

    fn manifest(&self, name: &str, version: &str) -> Result<PublishedManifest, NpmViewError> {
        let raw = self.view(format!("{name}@{version}"), &["--json"])?;
        Ok(serde_json::from_str(&raw)?)
    }
}

impl RegistryClient for NpmRegistry {
    #[instrument(skip(self))]
    fn query(&self, name: &str, range: &str) -> HoistResult<PeerRecord> {
        let version = self
            .latest_version(name, range)
            .map_err(|e| e.into_hoist(name, range))?;
        debug!(%version, "Latest matching version");

        let manifest = self
            .manifest(name, &version)
            .map_err(|e| e.into_hoist(name, range))?;

        Ok(PeerRecord {
            name: name.to_string(),
            version: manifest.version,
            peer_dependencies: manifest.peer_dependencies,
        })
    }
}
