//! Package manifests (`package.json` / `bower.json`).
//!
//! A [`Manifest`] keeps the whole JSON document it was parsed from so that
//! unknown fields and their order survive a read-modify-write cycle. The
//! three fields hoist reasons about (`name`, `dependencies`,
//! `peerDependencies`) are held as typed views and written back in place.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Package name -> version range (or resolved version), in declaration order.
pub type DependencyMap = IndexMap<String, String>;

const NAME: &str = "name";
const DEPENDENCIES: &str = "dependencies";
const PEER_DEPENDENCIES: &str = "peerDependencies";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Manifest {
    name: Option<String>,
    dependencies: DependencyMap,
    peer_dependencies: DependencyMap,
    /// Original document; typed fields above take precedence on write.
    document: Map<String, Value>,
}

impl Manifest {
    /// An empty manifest with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut document = Map::new();
        document.insert(NAME.into(), Value::String(name.clone()));
        Self {
            name: Some(name),
            dependencies: DependencyMap::new(),
            peer_dependencies: DependencyMap::new(),
            document,
        }
    }

    pub fn from_json_str(source: &str) -> Result<Self, DomainError> {
        serde_json::from_str(source).map_err(|e| DomainError::InvalidManifest(e.to_string()))
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_json_pretty(&self) -> String {
        let value = Value::Object(self.clone().into());
        let mut out = serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".into());
        out.push('\n');
        out
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut DependencyMap {
        &mut self.dependencies
    }

    pub fn peer_dependencies(&self) -> &DependencyMap {
        &self.peer_dependencies
    }

    /// Peer map, mutated in place by the resolver.
    pub fn peer_dependencies_mut(&mut self) -> &mut DependencyMap {
        &mut self.peer_dependencies
    }

    pub fn with_dependency(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.dependencies.insert(name.into(), range.into());
        self
    }

    pub fn with_peer(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.peer_dependencies.insert(name.into(), range.into());
        self
    }

    /// Copy every dependency of `other` into `self`, overwriting entries
    /// that already exist.
    pub fn absorb_dependencies(&mut self, other: &DependencyMap) {
        for (name, version) in other {
            self.dependencies.insert(name.clone(), version.clone());
        }
    }

    /// Read an arbitrary top-level field of the document.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }
}

impl TryFrom<Map<String, Value>> for Manifest {
    type Error = DomainError;

    fn try_from(document: Map<String, Value>) -> Result<Self, Self::Error> {
        let name = match document.get(NAME) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(DomainError::InvalidManifest(format!(
                    "'name' must be a string, found {other}"
                )));
            }
        };

        Ok(Self {
            name,
            dependencies: dependency_map(&document, DEPENDENCIES)?,
            peer_dependencies: dependency_map(&document, PEER_DEPENDENCIES)?,
            document,
        })
    }
}

impl From<Manifest> for Map<String, Value> {
    fn from(manifest: Manifest) -> Self {
        let mut document = manifest.document;

        if let Some(name) = manifest.name {
            document.insert(NAME.into(), Value::String(name));
        }

        if !manifest.dependencies.is_empty() || document.contains_key(DEPENDENCIES) {
            document.insert(DEPENDENCIES.into(), to_object(&manifest.dependencies));
        }

        // An emptied peer map has been folded into `dependencies`; drop it.
        if manifest.peer_dependencies.is_empty() {
            document.shift_remove(PEER_DEPENDENCIES);
        } else {
            document.insert(
                PEER_DEPENDENCIES.into(),
                to_object(&manifest.peer_dependencies),
            );
        }

        document
    }
}

fn dependency_map(document: &Map<String, Value>, key: &str) -> Result<DependencyMap, DomainError> {
    let Some(value) = document.get(key) else {
        return Ok(DependencyMap::new());
    };

    let object = value.as_object().ok_or_else(|| {
        DomainError::InvalidManifest(format!("'{key}' must be an object"))
    })?;

    object
        .iter()
        .map(|(name, range)| {
            range
                .as_str()
                .map(|r| (name.clone(), r.to_string()))
                .ok_or_else(|| {
                    DomainError::InvalidManifest(format!(
                        "'{key}.{name}' must be a version string"
                    ))
                })
        })
        .collect()
}

fn to_object(map: &DependencyMap) -> Value {
    Value::Object(
        map.iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
}

/// One registry answer: the best published match for a name and range.
///
/// Ephemeral; lives only for the duration of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRecord {
    pub name: String,
    pub version: String,
    pub peer_dependencies: DependencyMap,
}

impl PeerRecord {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            peer_dependencies: DependencyMap::new(),
        }
    }

    pub fn with_peer(mut self, name: impl Into<String>, range: impl Into<String>) -> Self {
        self.peer_dependencies.insert(name.into(), range.into());
        self
    }
}
