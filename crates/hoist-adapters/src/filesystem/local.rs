//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use hoist_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{HoistError, HoistResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as occupied
        path.symlink_metadata().is_ok()
    }

    fn read_to_string(&self, path: &Path) -> HoistResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> HoistResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir(&self, path: &Path) -> HoistResult<()> {
        std::fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn create_dir_all(&self, path: &Path) -> HoistResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn symlink(&self, target: &Path, link: &Path) -> HoistResult<()> {
        #[cfg(unix)]
        let result = std::os::unix::fs::symlink(target, link);
        #[cfg(windows)]
        let result = std::os::windows::fs::symlink_dir(target, link);

        result.map_err(|e| map_io_error(link, e, "create symlink"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> HoistError {
    if e.kind() == io::ErrorKind::AlreadyExists {
        return ApplicationError::PathExists {
            path: path.to_path_buf(),
        }
        .into();
    }

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
