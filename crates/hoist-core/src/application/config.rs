//! Per-invocation run configuration.
//!
//! Built once by the host (the CLI) and passed by reference through every
//! command stage. There is no ambient global state.

use std::path::{Path, PathBuf};

pub const DEFAULT_NODE_PROGRAM: &str = "npm";
pub const DEFAULT_FRONT_END_PROGRAM: &str = "bower";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    working_dir: PathBuf,
    node_program: String,
    front_end_program: String,
    assume_yes: Option<bool>,
}

impl RunConfig {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            node_program: DEFAULT_NODE_PROGRAM.into(),
            front_end_program: DEFAULT_FRONT_END_PROGRAM.into(),
            assume_yes: None,
        }
    }

    pub fn with_node_program(mut self, program: impl Into<String>) -> Self {
        self.node_program = program.into();
        self
    }

    pub fn with_front_end_program(mut self, program: impl Into<String>) -> Self {
        self.front_end_program = program.into();
        self
    }

    /// Pre-answer the install location prompt (`Some(true)` proceeds,
    /// `Some(false)` declines, `None` asks).
    pub fn with_assume_yes(mut self, answer: Option<bool>) -> Self {
        self.assume_yes = answer;
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn node_program(&self) -> &str {
        &self.node_program
    }

    pub fn front_end_program(&self) -> &str {
        &self.front_end_program
    }

    pub fn assume_yes(&self) -> Option<bool> {
        self.assume_yes
    }
}
