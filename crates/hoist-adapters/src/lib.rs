//! Infrastructure adapters for Hoist.
//!
//! This crate implements the ports defined in `hoist-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod blueprint_loader;
pub mod builtin_blueprints;
pub mod filesystem;
pub mod process;
pub mod registry;
pub mod template_store;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::ProcessRunner;
pub use registry::{InMemoryRegistry, NpmRegistry};
pub use template_store::BlueprintStore;
