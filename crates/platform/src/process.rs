//! Blocking process execution for host probes

use keg_errors::PlatformError;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Command builder for probe invocations
pub struct PlatformCommand {
    program: PathBuf,
    args: Vec<String>,
}

impl PlatformCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg<S: AsRef<str>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.as_ref().to_string());
        self
    }

    /// Run to completion and capture output
    ///
    /// # Errors
    ///
    /// Returns an error if the program cannot be spawned.
    pub fn output(&self) -> Result<CommandOutput, PlatformError> {
        tracing::debug!(program = %self.program.display(), args = ?self.args, "running probe");
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| PlatformError::ProcessExecutionFailed {
                command: self.program.display().to_string(),
                message: e.to_string(),
            })?;

        Ok(CommandOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Output from command execution
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// Stdout and stderr, lossily decoded
    #[must_use]
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}
