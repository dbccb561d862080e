//! In-memory filesystem adapter for testing.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use hoist_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HoistError, HoistResult},
};

/// One entry in a [`MemoryFilesystem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory,
    File(String),
    Symlink(PathBuf),
}

/// In-memory filesystem for testing.
///
/// Clones share the same tree, so a test can keep a handle while the
/// services own another.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<BTreeMap<PathBuf, Node>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories (testing helper).
    pub fn with_file(self, path: impl AsRef<Path>, content: &str) -> Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            let _ = self.create_dir_all(parent);
        }
        let _ = self.write_file(path, content);
        self
    }

    /// Add a directory and its parents (testing helper).
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        let _ = self.create_dir_all(path.as_ref());
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: impl AsRef<Path>) -> Option<String> {
        match self.node(path)? {
            Node::File(content) => Some(content),
            _ => None,
        }
    }

    pub fn node(&self, path: impl AsRef<Path>) -> Option<Node> {
        let inner = self.inner.read().ok()?;
        inner.get(path.as_ref()).cloned()
    }

    /// Target of a symlink, if `path` is one.
    pub fn link_target(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        match self.node(path)? {
            Node::Symlink(target) => Some(target),
            _ => None,
        }
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| {
                inner
                    .iter()
                    .filter(|(_, n)| matches!(n, Node::File(_)))
                    .map(|(p, _)| p.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every path in the tree, sorted.
    pub fn list_all(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl Filesystem for MemoryFilesystem {
    fn exists(&self, path: &Path) -> bool {
        is_root(path) || self.node(path).is_some()
    }

    fn read_to_string(&self, path: &Path) -> HoistResult<String> {
        self.read_file(path).ok_or_else(|| {
            ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "No such file".into(),
            }
            .into()
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> HoistResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        ensure_parent(&inner, path)?;

        if matches!(inner.get(path), Some(Node::Directory)) {
            return Err(fs_error(path, "Is a directory"));
        }
        inner.insert(path.to_path_buf(), Node::File(content.to_string()));
        Ok(())
    }

    fn create_dir(&self, path: &Path) -> HoistResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if is_root(path) || inner.contains_key(path) {
            return Err(ApplicationError::PathExists {
                path: path.to_path_buf(),
            }
            .into());
        }
        ensure_parent(&inner, path)?;
        inner.insert(path.to_path_buf(), Node::Directory);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> HoistResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            if is_root(&current) {
                continue;
            }
            match inner.get(&current) {
                None => {
                    inner.insert(current.clone(), Node::Directory);
                }
                Some(Node::Directory) | Some(Node::Symlink(_)) => {}
                Some(Node::File(_)) => return Err(fs_error(&current, "Not a directory")),
            }
        }

        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> HoistResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;
        if inner.contains_key(link) {
            return Err(ApplicationError::PathExists {
                path: link.to_path_buf(),
            }
            .into());
        }
        ensure_parent(&inner, link)?;
        inner.insert(link.to_path_buf(), Node::Symlink(target.to_path_buf()));
        Ok(())
    }
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.parent().is_none()
}

fn ensure_parent(inner: &BTreeMap<PathBuf, Node>, path: &Path) -> HoistResult<()> {
    match path.parent() {
        Some(parent) if !is_root(parent) && !inner.contains_key(parent) => {
            Err(fs_error(path, "Parent directory does not exist"))
        }
        _ => Ok(()),
    }
}

fn fs_error(path: &Path, reason: &str) -> HoistError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

fn lock_poisoned() -> HoistError {
    HoistError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}
