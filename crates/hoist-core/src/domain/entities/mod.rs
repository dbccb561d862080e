pub mod common;
pub mod manifest;
pub mod mode;
pub mod plan;
pub mod template;

pub use crate::domain::DomainError;
pub use manifest::Manifest;
pub use mode::ModeFlags;
pub use plan::ScaffoldPlan;
pub use template::Template;
