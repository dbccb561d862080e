// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they travel through the command pipeline by value)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid module name '{name}': {reason}")]
    InvalidModuleName { name: String, reason: String },

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Invalid template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    #[error("Duplicate path in scaffold plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Conflict Errors
    // ========================================================================
    #[error("Mode flags conflict: {first} and {second} cannot be combined")]
    ConflictingModes {
        first: &'static str,
        second: &'static str,
    },

    #[error("Peer dependency cycle: {}", chain.join(" -> "))]
    DependencyCycle { chain: Vec<String> },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidModuleName { name, reason } => vec![
                format!("Module name '{}' is invalid: {}", name, reason),
                "Use letters, digits, hyphens and underscores".into(),
                "Examples: my-module, bedrock-views, widgets_2".into(),
            ],
            Self::ConflictingModes { first, second } => vec![
                format!("--{} and --{} describe opposite layouts", first, second),
                "Pick one, or pass neither for a full module".into(),
            ],
            Self::DependencyCycle { chain } => vec![
                format!(
                    "'{}' is reachable from itself through its peers",
                    chain.first().map(String::as_str).unwrap_or("?")
                ),
                "Break the cycle in the published peerDependencies".into(),
            ],
            Self::InvalidManifest(msg) => vec![
                format!("Details: {}", msg),
                "Check that package.json is a JSON object".into(),
                "Dependency maps must map package names to version strings".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConflictingModes { .. } | Self::DependencyCycle { .. } => {
                ErrorCategory::Conflict
            }
            Self::InvalidTemplate { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    Internal,
}
