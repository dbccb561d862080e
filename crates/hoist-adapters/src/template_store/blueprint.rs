//! In-memory blueprint store seeded with the built-in blueprints.

use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::info;

use hoist_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{DomainValidator as validator, Template, TemplateId},
    error::{HoistError, HoistResult},
};

use crate::{blueprint_loader::FilesystemBlueprintLoader, builtin_blueprints};

/// Thread-safe blueprint store keyed by logical path.
#[derive(Debug, Clone, Default)]
pub struct BlueprintStore {
    inner: Arc<RwLock<HashMap<TemplateId, Template>>>,
}

impl BlueprintStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the built-in blueprints loaded.
    pub fn with_builtin() -> HoistResult<Self> {
        let store = Self::new();
        for template in builtin_blueprints::all_blueprints()? {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Built-ins, with files from `dir` replacing them by logical path.
    pub fn with_overrides(dir: &Path) -> HoistResult<Self> {
        let store = Self::with_builtin()?;
        let overrides = FilesystemBlueprintLoader::new(dir).load_all()?;
        info!(
            count = overrides.len(),
            dir = %dir.display(),
            "Blueprint overrides loaded"
        );
        for template in overrides {
            store.insert(template)?;
        }
        Ok(store)
    }

    /// Insert or replace a blueprint.
    pub fn insert(&self, template: Template) -> HoistResult<()> {
        validator::validate_template(&template)?;
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        inner.insert(template.id.clone(), template);
        Ok(())
    }

    /// Get the number of blueprints.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateStore for BlueprintStore {
    fn get(&self, id: &TemplateId) -> HoistResult<Template> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        inner.get(id).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound { id: id.to_string() }.into()
        })
    }

    fn list(&self) -> HoistResult<Vec<TemplateId>> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;
        let mut ids: Vec<_> = inner.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

fn lock_poisoned() -> HoistError {
    HoistError::Internal {
        message: "blueprint store lock poisoned".into(),
    }
}
