// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Hoist.
//!
//! This module contains pure logic with no I/O. Filesystem, registry and
//! process access are handled via ports (traits) defined in the application
//! layer.
//!
//! - **No I/O**: manifests are parsed from and rendered to strings
//! - **Immutable values**: plans, templates and contexts are Clone + PartialEq
//! - **Invariants at construction**: `ModeFlags`, `ModuleName`, `RelativePath`
pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    common::{ModuleName, RelativePath},
    manifest::{DependencyMap, Manifest, PeerRecord},
    mode::ModeFlags,
    plan::{FileAction, ScaffoldPlan},
    template::{JsonOverride, RenderContext, Substitution, Template, TemplateBody, TemplateId},
};

pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;
