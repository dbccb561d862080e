use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use crate::domain::{
    entities::{
        common::RelativePath,
        template::{JsonOverride, RenderContext, TemplateId},
    },
    error::DomainError,
};

/// One filesystem step of a scaffold.
///
/// Destination paths are relative to the plan root (the module directory).
#[derive(Debug, Clone, PartialEq)]
pub enum FileAction {
    MakeDir(RelativePath),
    RenderTemplate {
        template: TemplateId,
        dest: RelativePath,
        context: RenderContext,
    },
    WriteJson {
        template: TemplateId,
        dest: RelativePath,
        overrides: Vec<JsonOverride>,
    },
}

impl FileAction {
    pub fn dest(&self) -> &RelativePath {
        match self {
            Self::MakeDir(path) => path,
            Self::RenderTemplate { dest, .. } | Self::WriteJson { dest, .. } => dest,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Self::MakeDir(_))
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MakeDir(path) => write!(f, "mkdir  {path}/"),
            Self::RenderTemplate { template, dest, .. } => {
                write!(f, "render {dest}  (from {template})")
            }
            Self::WriteJson {
                template,
                dest,
                overrides,
            } => {
                write!(f, "json   {dest}  (from {template}")?;
                for o in overrides {
                    write!(f, "; {o}")?;
                }
                f.write_str(")")
            }
        }
    }
}

/// Ordered list of actions that materialize one module.
///
/// The root directory itself is not an action: the executor creates it first
/// and refuses to continue if it already exists.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldPlan {
    root: RelativePath,
    actions: Vec<FileAction>,
}

impl ScaffoldPlan {
    pub fn new(root: RelativePath) -> Self {
        Self {
            root,
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, action: FileAction) {
        self.actions.push(action);
    }

    pub fn root(&self) -> &RelativePath {
        &self.root
    }

    pub fn actions(&self) -> &[FileAction] {
        &self.actions
    }

    /// Every path the plan touches, prefixed with the root.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.actions
            .iter()
            .map(|a| self.root.as_path().join(a.dest()))
    }

    pub fn contains(&self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        self.paths().any(|p| p == path)
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    /// Checks that no path repeats and that every file's directory is
    /// created before it (or is the root).
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        let mut dirs: HashSet<PathBuf> = HashSet::new();
        dirs.insert(PathBuf::new());

        for action in &self.actions {
            let dest = action.dest().as_path().to_path_buf();
            if !seen.insert(dest.clone()) {
                return Err(DomainError::DuplicatePath {
                    path: dest.display().to_string(),
                });
            }

            let parent = dest.parent().map(PathBuf::from).unwrap_or_default();
            if !dirs.contains(&parent) {
                return Err(DomainError::InvalidTemplate {
                    id: dest.display().to_string(),
                    reason: format!("directory '{}' is not created first", parent.display()),
                });
            }

            if action.is_dir() {
                dirs.insert(dest);
            }
        }

        Ok(())
    }
}
