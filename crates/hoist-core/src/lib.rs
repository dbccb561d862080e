//! Hoist Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Hoist
//! module scaffolder and peer-dependency installer, following hexagonal
//! (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            hoist-cli (CLI)              │
//! │   (Builds RunConfig, drives Commands)   │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (Resolver, Merger, Planner, Executor,   │
//! │  InstallOrchestrator, TestHarness)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, TemplateStore, Registry,   │
//! │  CommandRunner, Prompt)                 │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    hoist-adapters (Infrastructure)      │
//! │ (LocalFilesystem, BlueprintStore, npm)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Manifest, ModeFlags, ScaffoldPlan)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hoist_core::{
//!     application::{RunConfig, ScaffoldPlanner},
//!     domain::{ModeFlags, ModuleName},
//! };
//!
//! let name = ModuleName::parse("my-module").unwrap();
//! let flags = ModeFlags::new(false, false, true).unwrap();
//! let plan = ScaffoldPlanner::plan(&name, flags);
//!
//! // Executing it needs adapters:
//! // ScaffoldExecutor::new(filesystem, store, runner).execute(&plan, cwd)
//! # let _ = (plan, RunConfig::new("."));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Command, Completion, DependencyResolver, InstallCommand, InstallOrchestrator,
        ManifestMerger, RunConfig, ScaffoldExecutor, ScaffoldPlanner, SetupCommand, SetupRequest,
        SetupTestsCommand, TestHarness, run_command,
        ports::{CommandRunner, Filesystem, Prompt, RegistryClient, TemplateStore},
    };
    pub use crate::domain::{
        DependencyMap, Manifest, ModeFlags, ModuleName, PeerRecord, ScaffoldPlan, Template,
        TemplateId,
    };
    pub use crate::error::{HoistError, HoistResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
