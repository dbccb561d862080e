//! Application layer for Hoist.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (resolver, merger, planner,
//!   executor, install orchestrator, test harness)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Command pipeline**: `configure` / `validate` / `execute`
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod command;
pub mod config;
pub mod error;
pub mod ports;
pub mod services;

pub use command::{Command, Completion, run_command};
pub use config::RunConfig;
pub use error::ApplicationError;

// Re-export main services
pub use services::{
    DependencyResolver, HarnessReport, HostModule, InstallCommand, InstallOrchestrator,
    InstallReport, InstallState, ManifestMerger, ScaffoldExecutor, ScaffoldPlanner, SetupCommand,
    SetupRequest, SetupTestsCommand, TestHarness,
};

// Re-export port traits (for adapter implementation)
pub use ports::{CommandRunner, Filesystem, Prompt, RegistryClient, TemplateStore};
