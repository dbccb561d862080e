//! In-memory registry for tests and offline runs.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use hoist_core::{
    application::{ApplicationError, ports::RegistryClient},
    domain::PeerRecord,
    error::{HoistError, HoistResult},
};

/// Published records per package, in publish order.
///
/// A range that names an exact published version selects it; any other range
/// selects the most recently published record. There is no range solving.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    packages: HashMap<String, Vec<PeerRecord>>,
    queries: Vec<(String, String)>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(self, record: PeerRecord) -> Self {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .packages
                .entry(record.name.clone())
                .or_default()
                .push(record);
        }
        self
    }

    /// Every `(name, range)` asked so far, in order.
    pub fn queries(&self) -> Vec<(String, String)> {
        self.inner
            .read()
            .map(|i| i.queries.clone())
            .unwrap_or_default()
    }
}

impl RegistryClient for InMemoryRegistry {
    fn query(&self, name: &str, range: &str) -> HoistResult<PeerRecord> {
        let mut inner = self.inner.write().map_err(|_| HoistError::Internal {
            message: "registry lock poisoned".into(),
        })?;
        inner.queries.push((name.to_string(), range.to_string()));

        let published = inner.packages.get(name).map(Vec::as_slice).unwrap_or(&[]);
        published
            .iter()
            .find(|r| r.version == range)
            .or_else(|| published.last())
            .cloned()
            .ok_or_else(|| {
                ApplicationError::RegistryNotFound {
                    package: name.to_string(),
                    range: range.to_string(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_version_wins_over_latest() {
        let registry = InMemoryRegistry::new()
            .publish(PeerRecord::new("a", "1.0.0"))
            .publish(PeerRecord::new("a", "2.0.0"));

        assert_eq!(registry.query("a", "1.0.0").unwrap().version, "1.0.0");
        assert_eq!(registry.query("a", "^1.0.0").unwrap().version, "2.0.0");
        assert_eq!(registry.queries().len(), 2);
    }

    #[test]
    fn unknown_package_is_not_found() {
        let err = InMemoryRegistry::new().query("ghost", "*").unwrap_err();
        assert!(matches!(
            err,
            HoistError::Application(ApplicationError::RegistryNotFound { .. })
        ));
    }
}
