//! External process adapter using `std::process`.

use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use hoist_core::{
    application::{
        ApplicationError,
        ports::{CommandOutput, CommandRunner, Invocation, StdioMode},
    },
    error::HoistResult,
};

/// Runs programs found on `PATH`, blocking until they exit.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessRunner {
    #[instrument(skip_all, fields(command = %invocation, cwd = %invocation.cwd.display()))]
    fn run(&self, invocation: &Invocation) -> HoistResult<CommandOutput> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).current_dir(&invocation.cwd);

        let spawn_failed = |e: std::io::Error| {
            debug!(error = %e, "Could not start process");
            ApplicationError::ExternalProcessFailed {
                command: format!("{} ({})", invocation.command_line(), e),
                code: None,
            }
        };

        let output = match invocation.stdio {
            StdioMode::Capture => {
                let out = command
                    .stdin(Stdio::null())
                    .output()
                    .map_err(spawn_failed)?;
                CommandOutput {
                    status: out.status.code(),
                    stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
                }
            }
            StdioMode::Inherit => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_failed)?;
                CommandOutput {
                    status: status.code(),
                    ..CommandOutput::default()
                }
            }
        };

        debug!(status = ?output.status, "Process finished");
        Ok(output)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use hoist_core::error::HoistError;
    use tempfile::TempDir;

    #[test]
    fn captures_stdout_and_status() {
        let tmp = TempDir::new().unwrap();
        let inv = Invocation::new("sh", tmp.path()).args(["-c", "echo hi; exit 4"]);

        let out = ProcessRunner::new().run(&inv).unwrap();
        assert_eq!(out.status, Some(4));
        assert_eq!(out.stdout.trim(), "hi");
        assert!(!out.is_success());
    }

    #[test]
    fn runs_in_requested_directory() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("marker"), "").unwrap();
        let inv = Invocation::new("ls", tmp.path());

        let out = ProcessRunner::new().run(&inv).unwrap();
        assert!(out.stdout.contains("marker"));
    }

    #[test]
    fn missing_program_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let inv = Invocation::new("definitely-not-a-real-program-xyz", tmp.path());

        let err = ProcessRunner::new().run(&inv).unwrap_err();
        assert!(matches!(
            err,
            HoistError::Application(ApplicationError::ExternalProcessFailed { code: None, .. })
        ));
    }
}
