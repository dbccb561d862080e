//! Application layer errors.
//!
//! These errors represent failures talking to the outside world, not broken
//! invariants. Invariant violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// No published version of the package matches the range.
    #[error("No published version of '{package}' matches '{range}'")]
    RegistryNotFound { package: String, range: String },

    /// The registry could not be queried.
    #[error("Registry unavailable while resolving '{package}': {reason}")]
    RegistryUnavailable { package: String, reason: String },

    /// A blueprint is missing from the template store.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// A required manifest file is missing.
    #[error("Manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// The path is already occupied.
    #[error("Path already exists: {path}")]
    PathExists { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// An external command exited unsuccessfully or could not be started.
    #[error("External command failed: {command}{}", code.map(|c| format!(" (exit code {c})")).unwrap_or_default())]
    ExternalProcessFailed { command: String, code: Option<i32> },

    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// The working directory does not fit the command.
    #[error("Invalid directory layout at {path}: {reason}")]
    InvalidLayout { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RegistryNotFound { package, range } => vec![
                format!("Check that {}@{} is published", package, range),
                format!("Try: npm view {} versions", package),
            ],
            Self::RegistryUnavailable { .. } => vec![
                "Check your network connection and npm registry settings".into(),
                "Try again in a moment".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("Expected a manifest at {}", path.display()),
                "A package.json must be present to run this command".into(),
            ],
            Self::PathExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different module name".into(),
                format!("Or remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ExternalProcessFailed { command, .. } => vec![
                format!("'{}' did not succeed", command),
                "Ensure the command is installed and in your PATH".into(),
                "Check the command output above for details".into(),
            ],
            Self::InvalidLayout { .. } => vec![
                "Run install from the module's app/ or test/ directory".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RegistryNotFound { .. }
            | Self::TemplateNotFound { .. }
            | Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
            Self::RegistryUnavailable { .. } | Self::ExternalProcessFailed { .. } => {
                ErrorCategory::ExternalProcess
            }
            Self::PathExists { .. } | Self::FilesystemError { .. } => ErrorCategory::Filesystem,
            Self::InvalidLayout { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. } => ErrorCategory::Internal,
        }
    }
}
