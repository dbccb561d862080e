//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the
//! high-level use cases: resolve peers, plan and write a scaffold, attach a
//! module to its host, prepare a test harness.

pub mod executor;
pub mod install;
pub mod merger;
pub mod planner;
pub mod resolver;
pub mod setup;
pub mod test_harness;

#[cfg(test)]
pub(crate) mod test_support;

pub use executor::{HostModule, ScaffoldExecutor};
pub use install::{InstallCommand, InstallOrchestrator, InstallReport, InstallState};
pub use merger::ManifestMerger;
pub use planner::ScaffoldPlanner;
pub use resolver::DependencyResolver;
pub use setup::{SetupCommand, SetupRequest};
pub use test_harness::{HarnessReport, SetupTestsCommand, TestHarness};
