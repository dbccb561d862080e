//! Package registry adapters.

mod memory;
mod npm;

pub use memory::InMemoryRegistry;
pub use npm::NpmRegistry;
