//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `hoist-adapters` crate provides implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::domain::{PeerRecord, Template, TemplateId};
use crate::error::HoistResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `hoist_adapters::filesystem::LocalFilesystem` (production)
/// - `hoist_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - `create_dir` and `symlink` fail with `ApplicationError::PathExists`
///   when the path is occupied; callers match on that variant to tolerate it
/// - `write_file` always overwrites
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (symlinks count, even dangling ones).
    fn exists(&self, path: &Path) -> bool;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> HoistResult<String>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> HoistResult<()>;

    /// Create a single directory. The parent must exist.
    fn create_dir(&self, path: &Path) -> HoistResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> HoistResult<()>;

    /// Create `link` pointing at `target`.
    fn symlink(&self, target: &Path, link: &Path) -> HoistResult<()>;
}

/// Port for blueprint retrieval.
///
/// Implemented by:
/// - `hoist_adapters::template_store::BlueprintStore` (built-in blueprints,
///   optionally overridden from a local directory)
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Get a blueprint by logical path.
    fn get(&self, id: &TemplateId) -> HoistResult<Template>;

    /// List every logical path the store knows, sorted.
    fn list(&self) -> HoistResult<Vec<TemplateId>>;
}

/// Port for package registry lookups.
///
/// Implemented by:
/// - `hoist_adapters::registry::NpmRegistry` (shells out to `npm view`)
/// - `hoist_adapters::registry::InMemoryRegistry` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait RegistryClient: Send + Sync {
    /// Resolve the best published match for `name` within `range`.
    ///
    /// Fails with `ApplicationError::RegistryNotFound` when nothing matches
    /// and `ApplicationError::RegistryUnavailable` for any other failure.
    fn query(&self, name: &str, range: &str) -> HoistResult<PeerRecord>;
}

/// Port for running external programs.
///
/// Implemented by:
/// - `hoist_adapters::process::ProcessRunner` (std::process)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run to completion. A non-zero exit is reported in the output, not as
    /// an error; failing to start the program is an error.
    fn run(&self, invocation: &Invocation) -> HoistResult<CommandOutput>;
}

/// Port for operator confirmation.
#[cfg_attr(test, mockall::automock)]
pub trait Prompt: Send + Sync {
    /// Ask a yes/no question. Blocks until answered.
    fn confirm(&self, question: &str) -> HoistResult<bool>;
}

// ============================================================================
// Process invocation
// ============================================================================

/// Where a child process's stdout/stderr go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// Collected into [`CommandOutput`].
    Capture,
    /// Streamed to the terminal; output fields stay empty.
    Inherit,
}

/// One external command: program, arguments and working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub stdio: StdioMode,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            stdio: StdioMode::Capture,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn inherit_stdio(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }

    /// `program arg1 arg2 ...`, for logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success() -> Self {
        Self {
            status: Some(0),
            ..Self::default()
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = stdout.into();
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == Some(0)
    }

    /// Turn a non-zero exit into `ExternalProcessFailed` carrying its code.
    pub fn check(self, invocation: &Invocation) -> HoistResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApplicationError::ExternalProcessFailed {
                command: invocation.command_line(),
                code: self.status,
            }
            .into())
        }
    }
}
