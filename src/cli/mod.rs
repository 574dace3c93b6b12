//! Command-line interface for jenkee
//!
//! Each subcommand lives in its own module and returns the text destined for
//! stdout; this module parses arguments, builds the jenkins-cli runner and
//! prints. Diagnostics go to stderr through `tracing` and the error returned
//! to `main`.

pub mod auth;
pub mod builds;
pub mod completions;
pub mod credentials;
pub mod groovy;
pub mod jobs;
pub mod prompt;
pub mod views;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use jenkee::credentials::DEFAULT_STORE;
use jenkee::executor::{CliOutput, JarCli, JenkinsCli};
use jenkee::infrastructure::JenkinsConfig;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;

/// CLI arguments for jenkee
#[derive(Parser, Debug)]
#[command(name = "jenkee")]
#[command(author, version, about = "Inspect and manage a Jenkins server through jenkins-cli", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify Jenkins authentication
    Auth,

    /// List all Jenkins views
    ListViews,

    /// List jobs in a view or all jobs
    ListJobs {
        /// View to list
        #[arg(required_unless_present = "all")]
        view: Option<String>,
        /// List every job
        #[arg(short, long, conflicts_with = "view")]
        all: bool,
    },

    /// Get job XML configuration
    GetJob {
        /// Job name
        job: String,
    },

    /// Show job status and triggers
    JobStatus {
        /// Job name
        job: String,
    },

    /// List build history for a job
    ListBuilds {
        /// Job name
        job: String,
    },

    /// Get console output of a build
    Console {
        /// Job name
        job: String,
        /// Build number or permalink
        #[arg(default_value = "lastBuild")]
        build: String,
    },

    /// Compare two job configurations
    JobDiff {
        /// First job
        first: String,
        /// Second job
        second: String,
    },

    /// List Jenkins credentials metadata
    ListCredentials {
        /// Only show this domain
        domain: Option<String>,
        /// Credential store
        #[arg(long, default_value = DEFAULT_STORE)]
        store: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Describe a specific credential
    DescribeCredentials {
        /// Credential id
        id: String,
        /// Credential store
        #[arg(long, default_value = DEFAULT_STORE)]
        store: String,
        /// Only search this domain
        #[arg(long)]
        domain: Option<String>,
        /// Fetch and print the secret value
        #[arg(long)]
        show_secret: bool,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Add jobs to a view
    AddJobToView {
        /// View name
        view: String,
        /// Jobs to add
        #[arg(required = true)]
        jobs: Vec<String>,
    },

    /// Copy a job to a new job
    CopyJob {
        /// Existing job
        source: String,
        /// New job name
        destination: String,
    },

    /// Create a new job from XML configuration on stdin
    CreateJob {
        /// New job name
        job: String,
    },

    /// Update job configuration from XML on stdin
    UpdateJob {
        /// Job name
        job: String,
    },

    /// Delete one or more jobs (IRREVERSIBLE)
    DeleteJob {
        /// Jobs to delete
        #[arg(required = true)]
        jobs: Vec<String>,
    },

    /// Enable one or more jobs
    EnableJob {
        /// Jobs to enable
        #[arg(required = true)]
        jobs: Vec<String>,
    },

    /// Disable one or more jobs
    DisableJob {
        /// Jobs to disable
        #[arg(required = true)]
        jobs: Vec<String>,
    },

    /// Trigger a Jenkins job build
    Build {
        /// Job name
        job: String,
        /// Build parameter as KEY=VALUE (repeatable)
        #[arg(short = 'p', long = "param", value_parser = builds::parse_param)]
        params: Vec<String>,
        /// Wait until build completion
        #[arg(short, long)]
        sync: bool,
        /// Follow build progress (implies --sync)
        #[arg(short, long)]
        follow: bool,
        /// Print console output (with --sync or --follow)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Stop all running builds for job(s)
    StopBuilds {
        /// Jobs whose builds to stop
        #[arg(required = true)]
        jobs: Vec<String>,
    },

    /// Delete build records (IRREVERSIBLE)
    DeleteBuilds {
        /// Job name
        job: String,
        /// Build number `N` or range `N-M`
        #[arg(value_parser = builds::parse_range)]
        range: String,
    },

    /// Execute a Groovy script on the server
    Groovy {
        /// Script file (reads stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Display the agent guide for using jenkee
    Prompt,

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Output format of the credential commands
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let args = Args::parse();
    tracing::debug!(?args.command, "Parsed arguments");

    let output = match args.command {
        Command::Auth => {
            let config = JenkinsConfig::load();
            if !config.is_configured() {
                bail!("{}", auth::setup_instructions(&config));
            }
            auth::auth(&JarCli::new(config)?)?
        }
        Command::ListViews => views::list_views(&connect()?)?,
        Command::ListJobs { view, all } => {
            let view = if all { None } else { view };
            jobs::list_jobs(&connect()?, view.as_deref())?
        }
        Command::GetJob { job } => jobs::get_job(&connect()?, &job)?,
        Command::JobStatus { job } => jobs::job_status(&connect()?, &job)?,
        Command::ListBuilds { job } => builds::list_builds(&connect()?, &job)?,
        Command::Console { job, build } => builds::console(&connect()?, &job, &build)?,
        Command::JobDiff { first, second } => jobs::job_diff(&connect()?, &first, &second)?,
        Command::ListCredentials {
            domain,
            store,
            format,
        } => credentials::list_credentials(&connect()?, &store, domain.as_deref(), format)?,
        Command::DescribeCredentials {
            id,
            store,
            domain,
            show_secret,
            format,
        } => credentials::describe_credentials(
            &connect()?,
            &credentials::DescribeOptions {
                store: &store,
                id: &id,
                domain: domain.as_deref(),
                show_secret,
                format,
            },
        )?,
        Command::AddJobToView { view, jobs: names } => {
            views::add_job_to_view(&connect()?, &view, &names)?
        }
        Command::CopyJob {
            source,
            destination,
        } => jobs::copy_job(&connect()?, &source, &destination)?,
        Command::CreateJob { job } => {
            let xml = read_stdin("XML configuration")?;
            jobs::create_job(&connect()?, &job, &xml)?
        }
        Command::UpdateJob { job } => {
            let xml = read_stdin("XML configuration")?;
            jobs::update_job(&connect()?, &job, &xml)?
        }
        Command::DeleteJob { jobs: names } => {
            jobs::bulk(&connect()?, jobs::BulkAction::Delete, &names)?
        }
        Command::EnableJob { jobs: names } => {
            jobs::bulk(&connect()?, jobs::BulkAction::Enable, &names)?
        }
        Command::DisableJob { jobs: names } => {
            jobs::bulk(&connect()?, jobs::BulkAction::Disable, &names)?
        }
        Command::Build {
            job,
            params,
            sync,
            follow,
            verbose,
        } => builds::build(
            &connect()?,
            &job,
            &builds::BuildOptions {
                params,
                sync,
                follow,
                verbose,
            },
        )?,
        Command::StopBuilds { jobs: names } => builds::stop_builds(&connect()?, &names)?,
        Command::DeleteBuilds { job, range } => builds::delete_builds(&connect()?, &job, &range)?,
        Command::Groovy { file } => {
            let script = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Script file not found: {}", path.display()))?,
                None => read_stdin("Groovy script")?,
            };
            groovy::run_script(&connect()?, &script)?
        }
        Command::Prompt => prompt::guide(),
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;
            match output {
                Some(path) => {
                    completions::save_completions(&completions, &path)?;
                    String::new()
                }
                None => completions,
            }
        }
    };

    emit(&mut io::stdout().lock(), &output)
}

/// Writes command output; a reader that went away early is not an error
fn emit(out: &mut impl Write, output: &str) -> Result<()> {
    match out.write_all(output.as_bytes()).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("Failed to write output"),
    }
}

/// Builds the jenkins-cli runner from the user's configuration
fn connect() -> Result<JarCli> {
    let config = JenkinsConfig::load();
    if !config.is_configured() {
        bail!("Jenkins credentials not configured.\nRun 'jenkee auth' to configure credentials.");
    }
    Ok(JarCli::new(config)?)
}

/// Turns a failed jenkins-cli run into an error starting with `what`
pub(crate) fn ensure_success(output: CliOutput, what: impl std::fmt::Display) -> Result<CliOutput> {
    if output.is_success() {
        return Ok(output);
    }
    let stderr = output.stderr.trim();
    if stderr.is_empty() {
        bail!("{what}");
    }
    bail!("{what}\n{stderr}");
}

/// Runs one jenkins-cli command and fails with `what` if it exits non-zero
pub(crate) fn run_checked(
    cli: &dyn JenkinsCli,
    command: &str,
    args: &[&str],
    stdin: Option<&str>,
    what: impl std::fmt::Display,
) -> Result<CliOutput> {
    let output = cli.run(command, args, stdin)?;
    ensure_success(output, what)
}

/// Ensures a line-oriented output ends with a newline
pub(crate) fn line(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// Reads a payload piped on stdin
fn read_stdin(what: &str) -> Result<String> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        bail!("No {what} provided via stdin");
    }
    let mut payload = String::new();
    stdin
        .read_to_string(&mut payload)
        .with_context(|| format!("Failed to read {what} from stdin"))?;
    require_payload(payload, what)
}

fn require_payload(payload: String, what: &str) -> Result<String> {
    if payload.trim().is_empty() {
        bail!("{what} is empty");
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_describe_defaults() {
        let args = Args::try_parse_from(["jenkee", "describe-credentials", "f1"]).unwrap();
        match args.command {
            Command::DescribeCredentials {
                id,
                store,
                domain,
                show_secret,
                format,
            } => {
                assert_eq!(id, "f1");
                assert_eq!(store, DEFAULT_STORE);
                assert_eq!(domain, None);
                assert!(!show_secret);
                assert_eq!(format, OutputFormat::Text);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_list_jobs_requires_view_or_all() {
        assert!(Args::try_parse_from(["jenkee", "list-jobs"]).is_err());
        assert!(Args::try_parse_from(["jenkee", "list-jobs", "--all"]).is_ok());
        assert!(Args::try_parse_from(["jenkee", "list-jobs", "-a"]).is_ok());
        assert!(Args::try_parse_from(["jenkee", "list-jobs", "Backend"]).is_ok());
    }

    #[test]
    fn test_build_rejects_malformed_param() {
        assert!(Args::try_parse_from(["jenkee", "build", "app", "-p", "NOVALUE"]).is_err());
        let args =
            Args::try_parse_from(["jenkee", "build", "app", "-p", "A=1", "-p", "B=x=y", "-s"])
                .unwrap();
        match args.command {
            Command::Build { params, sync, .. } => {
                assert_eq!(params, vec!["A=1".to_string(), "B=x=y".to_string()]);
                assert!(sync);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_delete_builds_validates_range() {
        assert!(Args::try_parse_from(["jenkee", "delete-builds", "app", "12"]).is_ok());
        assert!(Args::try_parse_from(["jenkee", "delete-builds", "app", "10-20"]).is_ok());
        assert!(Args::try_parse_from(["jenkee", "delete-builds", "app", "latest"]).is_err());
    }

    #[test]
    fn test_console_defaults_to_last_build() {
        let args = Args::try_parse_from(["jenkee", "console", "app"]).unwrap();
        match args.command {
            Command::Console { build, .. } => assert_eq!(build, "lastBuild"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_ensure_success_appends_stderr() {
        let err = ensure_success(CliOutput::failure(1, "ERROR: No such job\n"), "Failed").unwrap_err();
        assert_eq!(err.to_string(), "Failed\nERROR: No such job");

        let quiet = ensure_success(CliOutput::failure(1, ""), "Failed").unwrap_err();
        assert_eq!(quiet.to_string(), "Failed");
    }

    #[test]
    fn test_require_payload_rejects_blank() {
        assert!(require_payload("  \n".to_string(), "XML configuration").is_err());
        assert_eq!(
            require_payload("<project/>".to_string(), "XML configuration").unwrap(),
            "<project/>"
        );
    }

    struct FailingWriter(io::ErrorKind);

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(self.0))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_writes_output() {
        let mut buf = Vec::new();
        emit(&mut buf, "a\nb\n").unwrap();
        assert_eq!(buf, b"a\nb\n");
    }

    #[test]
    fn test_emit_ignores_closed_pipe() {
        assert!(emit(&mut FailingWriter(io::ErrorKind::BrokenPipe), "guide\n").is_ok());
    }

    #[test]
    fn test_emit_reports_other_errors() {
        let err = emit(&mut FailingWriter(io::ErrorKind::PermissionDenied), "x").unwrap_err();
        assert_eq!(err.to_string(), "Failed to write output");
    }

    #[test]
    fn test_line_appends_newline() {
        assert_eq!(line("a"), "a\n");
        assert_eq!(line("a\n"), "a\n");
        assert_eq!(line(""), "");
    }
}
