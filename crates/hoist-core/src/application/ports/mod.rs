//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `hoist-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File, directory and symlink operations
//!   - `TemplateStore`: Blueprint retrieval
//!   - `RegistryClient`: Package registry lookups
//!   - `CommandRunner`: External package-manager processes
//!   - `Prompt`: Operator confirmation
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `Command` (see `crate::application::command`)

pub mod output;

pub use output::{
    CommandOutput, CommandRunner, Filesystem, Invocation, Prompt, RegistryClient, StdioMode,
    TemplateStore,
};

#[cfg(test)]
pub use output::{
    MockCommandRunner, MockFilesystem, MockPrompt, MockRegistryClient, MockTemplateStore,
};
