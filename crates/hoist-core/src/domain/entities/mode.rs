use std::fmt;

use crate::domain::error::DomainError;

/// Layout switches for `setup`, read once at dispatch time.
///
/// Invariant: `bower_only` and `node_only` are never both set. Enforced by
/// [`ModeFlags::new`]; the fields are private so a conflicting value cannot
/// be built any other way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    plugin: bool,
    bower_only: bool,
    node_only: bool,
}

impl ModeFlags {
    pub fn new(plugin: bool, bower_only: bool, node_only: bool) -> Result<Self, DomainError> {
        if bower_only && node_only {
            return Err(DomainError::ConflictingModes {
                first: "bower-only",
                second: "node-only",
            });
        }
        Ok(Self {
            plugin,
            bower_only,
            node_only,
        })
    }

    pub const fn plugin(&self) -> bool {
        self.plugin
    }

    pub const fn bower_only(&self) -> bool {
        self.bower_only
    }

    pub const fn node_only(&self) -> bool {
        self.node_only
    }

    /// `lib/` and the root `package.json`.
    pub const fn includes_node(&self) -> bool {
        !self.bower_only
    }

    /// `bower.json`, `bedrock.json` and the front-end entry point.
    pub const fn includes_bower(&self) -> bool {
        !self.node_only
    }

    /// The runnable `app/` tree. Plugins never get one.
    pub const fn includes_app(&self) -> bool {
        !self.plugin && !self.bower_only && !self.node_only
    }

    /// Bower-only modules keep `main.js` at the root instead of `components/`.
    pub const fn flattens_components(&self) -> bool {
        self.bower_only
    }
}

impl fmt::Display for ModeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.plugin {
            parts.push("plugin");
        }
        if self.bower_only {
            parts.push("bower-only");
        }
        if self.node_only {
            parts.push("node-only");
        }
        if parts.is_empty() {
            f.write_str("default")
        } else {
            f.write_str(&parts.join("+"))
        }
    }
}
