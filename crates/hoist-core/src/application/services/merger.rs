//! Manifest Merger - folds resolved peers into direct dependencies.
//!
//! The fold itself is pure. Loading and persisting go through the
//! [`Filesystem`] port so the same service serves `install` and
//! `setup-tests`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::Manifest,
    error::HoistResult,
};

pub struct ManifestMerger {
    filesystem: Arc<dyn Filesystem>,
}

impl ManifestMerger {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Copy each resolved peer into `dependencies` unless the name is
    /// already there, then clear `peerDependencies`.
    ///
    /// Existing direct dependencies win. Applying this twice gives the same
    /// `dependencies` as applying it once.
    pub fn merge_into_dependencies(mut manifest: Manifest) -> Manifest {
        let peers = std::mem::take(manifest.peer_dependencies_mut());
        let dependencies = manifest.dependencies_mut();

        for (name, version) in peers {
            if dependencies.contains_key(&name) {
                // TODO: report when the existing range excludes the resolved version.
                debug!(peer = %name, "Already a direct dependency, keeping it");
                continue;
            }
            dependencies.insert(name, version);
        }
        manifest
    }

    /// Read and parse a manifest; a missing file is `ManifestNotFound`.
    pub fn load(&self, path: &Path) -> HoistResult<Manifest> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::ManifestNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let source = self.filesystem.read_to_string(path)?;
        Ok(Manifest::from_json_str(&source)?)
    }

    /// Like [`load`](Self::load) but `None` when the file does not exist.
    pub fn load_optional(&self, path: &Path) -> HoistResult<Option<Manifest>> {
        if self.filesystem.exists(path) {
            self.load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    #[instrument(skip(self, manifest), fields(path = %path.display()))]
    pub fn persist(&self, path: &Path, manifest: &Manifest) -> HoistResult<()> {
        self.filesystem.write_file(path, &manifest.to_json_pretty())?;
        info!("Manifest written");
        Ok(())
    }
}
