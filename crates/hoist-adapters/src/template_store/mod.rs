//! Template store adapters.

mod blueprint;

pub use blueprint::BlueprintStore;
