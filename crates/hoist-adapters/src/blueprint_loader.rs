//! Filesystem-based blueprint loader.
//!
//! Reads a local override directory whose layout mirrors the built-in
//! `blueprints/` tree. Every regular file becomes a [`Template`] whose id is
//! its path relative to the root, with `/` separators.
//!
//! # Directory layout expected
//!
//! ```text
//! my-blueprints/
//! ├── README.md              ← replaces the built-in README
//! ├── lib/
//! │   └── index.js
//! └── test/
//!     └── package.json       ← must hold a JSON object
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use hoist_core::domain::{DomainError, DomainValidator, Template, TemplateId};

/// Loads blueprints from one directory tree.
#[derive(Debug, Clone)]
pub struct FilesystemBlueprintLoader {
    root: PathBuf,
}

impl FilesystemBlueprintLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load every blueprint under the root.
    ///
    /// A missing or unreadable root is an error. Individual files that are
    /// not UTF-8 or not valid JSON (for `.json` ids) are skipped with a
    /// warning, so one broken override does not hide the others.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> Result<Vec<Template>, DomainError> {
        if !self.root.is_dir() {
            return Err(DomainError::InvalidTemplate {
                id: self.root.display().to_string(),
                reason: "blueprint directory does not exist".into(),
            });
        }

        let mut templates = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| DomainError::InvalidTemplate {
                id: self.root.display().to_string(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            match self.load_file(entry.path()) {
                Ok(template) => {
                    debug!(id = %template.id, "Loaded blueprint override");
                    templates.push(template);
                }
                Err(e) => warn!(path = %entry.path().display(), error = %e, "Skipping blueprint"),
            }
        }

        Ok(templates)
    }

    fn load_file(&self, path: &Path) -> Result<Template, DomainError> {
        let id = self.id_for(path)?;
        let source = std::fs::read_to_string(path).map_err(|e| DomainError::InvalidTemplate {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        let template = Template::from_source(id, &source)?;
        DomainValidator::validate_template(&template)?;
        Ok(template)
    }

    fn id_for(&self, path: &Path) -> Result<TemplateId, DomainError> {
        let relative = path
            .strip_prefix(&self.root)
            .map_err(|e| DomainError::InvalidTemplate {
                id: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if segments.is_empty() {
            return Err(DomainError::InvalidTemplate {
                id: path.display().to_string(),
                reason: "empty blueprint path".into(),
            });
        }
        Ok(TemplateId::new(segments.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_nested_files_with_slash_ids() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("lib")).unwrap();
        fs::write(tmp.path().join("lib/index.js"), "// $MODULE_NAME").unwrap();
        fs::write(tmp.path().join("bower.json"), r#"{"name":""}"#).unwrap();

        let templates = FilesystemBlueprintLoader::new(tmp.path()).load_all().unwrap();
        let ids: Vec<_> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["bower.json", "lib/index.js"]);
        assert!(templates[0].as_json().is_some());
    }

    #[test]
    fn broken_json_is_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("package.json"), "[1, 2]").unwrap();
        fs::write(tmp.path().join("README.md"), "# $MODULE_NAME").unwrap();

        let templates = FilesystemBlueprintLoader::new(tmp.path()).load_all().unwrap();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].id.as_str(), "README.md");
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let loader = FilesystemBlueprintLoader::new(tmp.path().join("absent"));
        assert!(loader.load_all().is_err());
    }
}
