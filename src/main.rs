//! jenkee - Inspect and manage a Jenkins server from the command line
//!
//! A front end for `jenkins-cli.jar` that reads its connection settings from
//! `~/.jenkins-inspector/.env`.
//!
//! ## Commands
//!
//! - `jenkee auth` - Verify the configured credentials
//! - `jenkee list-views` / `list-jobs` / `get-job` / `job-status` - Explore jobs
//! - `jenkee list-builds` / `console` / `build` / `stop-builds` - Work with builds
//! - `jenkee list-credentials` / `describe-credentials` - Inspect credentials
//! - `jenkee job-diff` - Compare two job configurations
//! - `jenkee prompt` - Print the guide for automated agents
//! - `jenkee completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Verify the connection
//! jenkee auth
//!
//! # Where is a credential used, and what is it?
//! jenkee list-credentials
//! jenkee describe-credentials deploy-key
//!
//! # Reveal the secret value
//! jenkee describe-credentials deploy-key --show-secret
//! ```
//!
//! ## Environment
//!
//! - `JENKEE_DEBUG` - log the jenkins-cli invocations to stderr
//! - `JENKEE_VERBOSE` - print the full error chain on failure
//! - `RUST_LOG` - override the log filter

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    // Initialize tracing for debugging
    if std::env::var("JENKEE_DEBUG").is_ok() {
        jenkee::init_logging("debug");
    }

    // Run the CLI
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if std::env::var("JENKEE_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
