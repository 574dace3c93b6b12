//! jenkins-cli execution traits
//!
//! Every command reaches the server through [`JenkinsCli`], which keeps the
//! subprocess mechanics out of the command and credential logic.

use super::errors::ExecError;
use std::time::Duration;

/// Trait for running jenkins-cli commands against a server
#[allow(clippy::missing_errors_doc)]
pub trait JenkinsCli {
    /// Runs a jenkins-cli command with its arguments and optional stdin payload
    ///
    /// A non-zero exit code is not an error here: callers inspect
    /// [`CliOutput::is_success`] and decide how to report it.
    fn run(&self, command: &str, args: &[&str], stdin: Option<&str>)
    -> Result<CliOutput, ExecError>;

    /// Runs a Groovy script on the server
    ///
    /// The script is sent on stdin (`groovy =`) and `args` become the
    /// script's `args` array, so identifiers never have to be spliced into
    /// the script text.
    fn run_groovy(&self, script: &str, args: &[&str]) -> Result<CliOutput, ExecError> {
        let mut full_args = Vec::with_capacity(args.len() + 1);
        full_args.push("=");
        full_args.extend_from_slice(args);
        self.run("groovy", &full_args, Some(script))
    }
}

/// Result of a jenkins-cli invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOutput {
    /// Standard output
    pub stdout: String,

    /// Standard error
    pub stderr: String,

    /// Exit code
    pub exit_code: i32,

    /// Duration of execution
    pub duration: Duration,
}

impl CliOutput {
    /// Creates a successful output with the given stdout
    #[must_use]
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            ..Self::default()
        }
    }

    /// Creates a failed output with the given exit code and stderr
    #[must_use]
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stderr: stderr.into(),
            exit_code,
            ..Self::default()
        }
    }

    /// Returns true if command succeeded (exit code 0)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// Returns true if command failed
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.exit_code != 0
    }
}
