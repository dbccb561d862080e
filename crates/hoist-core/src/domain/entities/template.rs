//! Blueprint templates and variable substitution.
//!
//! ## Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Template                                                   │
//! │  ├── TemplateId (logical path, e.g. "lib/index.js")         │
//! │  └── TemplateBody                                           │
//! │       ├── Text  - `$VARIABLE` placeholders                  │
//! │       └── Json  - skeleton patched with JsonOverride        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  RenderContext (Value Object)                               │
//! │  └── `$MODULE_NAME` -> "my-module"                          │
//! │      `$PSEUDO_BOWER` -> text of another template, or ""     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown placeholders are left verbatim. Substitution is a single pass, so
//! text injected by one variable is never re-scanned for others.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::domain::error::DomainError;

/// Logical path of a blueprint inside the template store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(String);

impl TemplateId {
    /// # Panics
    /// Panics on an empty id or one with a leading `/`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        assert!(
            !path.is_empty() && !path.starts_with('/'),
            "TemplateId must be a non-empty relative path: {path:?}"
        );
        Self(path)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the blueprint is a JSON skeleton (by extension).
    pub fn is_json(&self) -> bool {
        self.0.ends_with(".json")
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateBody {
    /// Text with `$VARIABLE` placeholders.
    Text(String),
    /// JSON skeleton; always an object.
    Json(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: TemplateId,
    pub body: TemplateBody,
}

impl Template {
    pub fn text(id: impl Into<TemplateId>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: TemplateBody::Text(source.into()),
        }
    }

    /// Parse a JSON skeleton. The top level must be an object.
    pub fn json(id: impl Into<TemplateId>, source: &str) -> Result<Self, DomainError> {
        let id = id.into();
        let value: Value = serde_json::from_str(source).map_err(|e| DomainError::InvalidTemplate {
            id: id.to_string(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(map) => Ok(Self {
                id,
                body: TemplateBody::Json(map),
            }),
            _ => Err(DomainError::InvalidTemplate {
                id: id.to_string(),
                reason: "JSON blueprint must be an object".into(),
            }),
        }
    }

    /// Build from raw file content, picking the body kind by extension.
    pub fn from_source(id: impl Into<TemplateId>, source: &str) -> Result<Self, DomainError> {
        let id = id.into();
        if id.is_json() {
            Self::json(id, source)
        } else {
            Ok(Self::text(id, source))
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            TemplateBody::Text(s) => Some(s),
            TemplateBody::Json(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<&Map<String, Value>> {
        match &self.body {
            TemplateBody::Json(m) => Some(m),
            TemplateBody::Text(_) => None,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Value bound to a placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    Text(String),
    /// Contents of another text template, resolved at execution time.
    Template(TemplateId),
}

/// Variables for one render.
///
/// ## Built-in Variables
///
/// | Variable | Example | Source |
/// |----------|---------|--------|
/// | `MODULE_NAME` | "my-module" | `setup <name>` |
/// | `PSEUDO_BOWER` | shim source or "" | planner |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, Substitution>,
}

impl RenderContext {
    pub const MODULE_NAME: &'static str = "MODULE_NAME";
    pub const PSEUDO_BOWER: &'static str = "PSEUDO_BOWER";

    pub fn new(module_name: impl Into<String>) -> Self {
        let mut variables = BTreeMap::new();
        variables.insert(
            Self::MODULE_NAME.to_string(),
            Substitution::Text(module_name.into()),
        );
        Self { variables }
    }

    pub fn with_text(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables
            .insert(key.into(), Substitution::Text(value.into()));
        self
    }

    pub fn with_template(mut self, key: impl Into<String>, id: impl Into<TemplateId>) -> Self {
        self.variables
            .insert(key.into(), Substitution::Template(id.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Substitution> {
        self.variables.get(key)
    }

    /// Templates this context pulls in, so callers can check them up front.
    pub fn referenced_templates(&self) -> impl Iterator<Item = &TemplateId> {
        self.variables.values().filter_map(|s| match s {
            Substitution::Template(id) => Some(id),
            Substitution::Text(_) => None,
        })
    }

    /// Replace every `$NAME` token whose name is bound in this context.
    ///
    /// A token is `$` followed by the longest run of `[A-Za-z0-9_]`; it must
    /// match a variable exactly, so `$MODULE_NAMES` is left alone.
    /// `lookup` supplies the text of [`Substitution::Template`] bindings.
    pub fn render<E>(
        &self,
        source: &str,
        mut lookup: impl FnMut(&TemplateId) -> Result<String, E>,
    ) -> Result<String, E> {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(dollar) = rest.find('$') {
            out.push_str(&rest[..dollar]);
            let after = &rest[dollar + 1..];
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            let token = &after[..len];

            match self.variables.get(token) {
                Some(Substitution::Text(value)) if !token.is_empty() => out.push_str(value),
                Some(Substitution::Template(id)) if !token.is_empty() => {
                    out.push_str(&lookup(id)?)
                }
                _ => {
                    out.push('$');
                    out.push_str(token);
                }
            }
            rest = &after[len..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// A single field assignment applied to a JSON skeleton.
///
/// `path` walks nested objects from the top; missing objects on the way are
/// created, non-object values on the way are replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonOverride {
    pub path: Vec<String>,
    pub value: Value,
}

impl JsonOverride {
    pub fn set<I, S>(path: I, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            value: value.into(),
        }
    }

    pub fn apply(&self, document: &mut Map<String, Value>) {
        let Some((last, parents)) = self.path.split_last() else {
            return;
        };

        let mut current = document;
        for key in parents {
            let slot = current
                .entry(key.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            current = match slot {
                Value::Object(map) => map,
                _ => return,
            };
        }
        current.insert(last.clone(), self.value.clone());
    }
}

impl fmt::Display for JsonOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path.join("."), self.value)
    }
}
