//! jenkins-cli.jar execution
//!
//! Runs `java -jar jenkins-cli.jar -s <url> ...` as a subprocess with captured
//! output. The jar is downloaded from the server on first use.
//!
//! With credentials configured the HTTP transport is used
//! (`-http -auth user:token`), otherwise `-webSocket`.

use super::errors::ExecError;
use super::traits::{CliOutput, JenkinsCli};
use crate::infrastructure::JenkinsConfig;
use std::fs;
use std::io::{self, Write};
use std::process::{Command, Stdio};
use std::time::Instant;

/// [`JenkinsCli`] backed by a local jenkins-cli.jar
#[derive(Debug, Clone)]
pub struct JarCli {
    config: JenkinsConfig,
}

impl JarCli {
    /// Creates a runner for a fully configured server
    pub fn new(config: JenkinsConfig) -> Result<Self, ExecError> {
        if !config.is_configured() {
            return Err(ExecError::NotConfigured);
        }
        Ok(Self { config })
    }

    /// Downloads jenkins-cli.jar if it is not cached yet
    pub fn ensure_cli_jar(&self) -> Result<(), ExecError> {
        let jar_path = &self.config.jar_path;
        if jar_path.exists() {
            return Ok(());
        }

        let url = self.config.cli_jar_url()?;
        if let Some(parent) = jar_path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(url = %url, path = %jar_path.display(), "Downloading jenkins-cli.jar");

        let download_error = |e: reqwest::Error| ExecError::JarDownload {
            url: url.to_string(),
            reason: e.to_string(),
        };
        let bytes = reqwest::blocking::get(url.clone())
            .and_then(reqwest::blocking::Response::error_for_status)
            .and_then(reqwest::blocking::Response::bytes)
            .map_err(download_error)?;

        // Never leave a truncated jar at the cached path
        let partial = jar_path.with_extension("jar.part");
        fs::write(&partial, &bytes)?;
        fs::rename(&partial, jar_path)?;

        Ok(())
    }

    /// Builds the full argument vector passed to `java`
    pub fn command_line(&self, command: &str, args: &[&str]) -> Result<Vec<String>, ExecError> {
        let url = self.config.base_url()?;

        let mut argv = vec![
            "-jar".to_string(),
            self.config.jar_path.to_string_lossy().to_string(),
            "-s".to_string(),
            url.to_string(),
        ];

        let auth_args = self.config.auth_args();
        if auth_args.is_empty() {
            argv.push("-webSocket".to_string());
        } else {
            argv.push("-http".to_string());
            argv.extend(auth_args);
        }

        argv.push(command.to_string());
        argv.extend(args.iter().map(|a| (*a).to_string()));
        Ok(argv)
    }
}

impl JenkinsCli for JarCli {
    fn run(
        &self,
        command: &str,
        args: &[&str],
        stdin: Option<&str>,
    ) -> Result<CliOutput, ExecError> {
        self.ensure_cli_jar()?;
        let argv = self.command_line(command, args)?;

        tracing::debug!(
            command = %format!("{} {}", self.config.java_bin, redacted(&argv)),
            stdin_bytes = stdin.map_or(0, str::len),
            "Running jenkins-cli"
        );

        let start = Instant::now();

        let mut cmd = Command::new(&self.config.java_bin);
        cmd.args(&argv);
        cmd.stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|e| ExecError::Spawn {
            program: self.config.java_bin.clone(),
            reason: e.to_string(),
        })?;

        // Stdin is fed concurrently with draining stdout
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => {
                let input = input.to_owned();
                Some(std::thread::spawn(move || pipe.write_all(input.as_bytes())))
            }
            _ => None,
        };

        let output = child.wait_with_output()?;

        if let Some(Ok(Err(e))) = writer.map(std::thread::JoinHandle::join)
            && e.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(e.into());
        }

        let result = CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        };

        tracing::debug!(
            command,
            exit_code = result.exit_code,
            duration_ms = result.duration.as_millis(),
            "jenkins-cli finished"
        );

        Ok(result)
    }
}

/// Shell-quoted command line with the `-auth` value masked
fn redacted(argv: &[String]) -> String {
    let mut masked = Vec::with_capacity(argv.len());
    let mut hide_next = false;
    for arg in argv {
        if hide_next {
            let user = arg.split_once(':').map_or("", |(user, _)| user);
            masked.push(format!("{user}:****"));
            hide_next = false;
        } else {
            hide_next = arg == "-auth";
            masked.push(arg.clone());
        }
    }
    shell_words::join(masked)
}
