//! Dependency Resolver - recursive peer-dependency expansion.
//!
//! ## Algorithm
//!
//! Depth-first over the manifest's `peerDependencies`:
//!
//! 1. Each seed entry is queried and its range replaced by the resolved version.
//! 2. For every peer the resolved record declares:
//!    - already on the current expansion path: `DependencyCycle`
//!    - already in the map: re-queried, version overwritten, **not** expanded
//!    - new: inserted with the resolved version, then expanded
//!
//! The map is mutated in place; callers clone first if they need the
//! pre-resolution snapshot.

use std::sync::Arc;

use tracing::{debug, info, instrument, trace};

use crate::{
    application::ports::RegistryClient,
    domain::{DependencyMap, DomainError, Manifest, PeerRecord},
    error::HoistResult,
};

pub struct DependencyResolver {
    registry: Arc<dyn RegistryClient>,
}

impl DependencyResolver {
    pub fn new(registry: Arc<dyn RegistryClient>) -> Self {
        Self { registry }
    }

    /// Expand `manifest.peerDependencies` transitively, in place.
    #[instrument(skip_all, fields(manifest = manifest.name().unwrap_or("<unnamed>")))]
    pub fn resolve_peers(&self, manifest: &mut Manifest) -> HoistResult<()> {
        let seeds = manifest.peer_dependencies().clone();
        if seeds.is_empty() {
            debug!("No peer dependencies to resolve");
            return Ok(());
        }

        let peers = manifest.peer_dependencies_mut();
        for (name, range) in &seeds {
            let record = self.query(name, range)?;
            peers.insert(name.clone(), record.version.clone());

            let mut path = vec![name.clone()];
            self.expand(&record, peers, &mut path)?;
        }

        info!(count = peers.len(), "Peer dependencies resolved");
        Ok(())
    }

    fn expand(
        &self,
        record: &PeerRecord,
        peers: &mut DependencyMap,
        path: &mut Vec<String>,
    ) -> HoistResult<()> {
        for (child, range) in &record.peer_dependencies {
            if path.contains(child) {
                let mut chain = path.clone();
                chain.push(child.clone());
                return Err(DomainError::DependencyCycle { chain }.into());
            }

            let resolved = self.query(child, range)?;

            if peers.contains_key(child) {
                trace!(peer = %child, version = %resolved.version, "Already present, overwriting");
                peers.insert(child.clone(), resolved.version);
                continue;
            }

            peers.insert(child.clone(), resolved.version.clone());
            path.push(child.clone());
            self.expand(&resolved, peers, path)?;
            path.pop();
        }
        Ok(())
    }

    fn query(&self, name: &str, range: &str) -> HoistResult<PeerRecord> {
        debug!(peer = name, range, "Querying registry");
        self.registry.query(name, range)
    }
}
