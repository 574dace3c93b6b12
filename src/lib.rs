//! # jenkee - Inspect and manage Jenkins through jenkins-cli
//!
//! jenkee wraps `jenkins-cli.jar` with a set of read-mostly commands for
//! exploring views, jobs, builds and credentials of a Jenkins server.
//!
//! The heart of the crate is the credential subsystem: metadata is read with
//! `list-credentials-as-xml`, every credential type tag resolves to a
//! [`CredentialKind`] (or an explicit unknown fallback), and secret values are
//! only fetched on request by per-kind Groovy scripts that receive the
//! credential id as a script argument.
//!
//! ## Quick Start
//!
//! ```no_run
//! use jenkee::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cli = JarCli::new(JenkinsConfig::load())?;
//! let description = describe(&cli, DEFAULT_STORE, "deploy-key", false, None)?;
//! print!("{}", description.render());
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! Everything that talks to Jenkins goes through the [`JenkinsCli`] trait;
//! [`ScriptedCli`] replays canned outputs and records every call.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod credentials;
pub mod executor;
pub mod infrastructure;

// Prelude module for common imports
pub mod prelude;

// Re-export commonly used types
pub use credentials::{
    CredentialDescription, CredentialDomain, CredentialError, CredentialKind, CredentialRecord,
    DEFAULT_STORE, Descriptor, Secret, SecretOutcome, describe, list, render_list, resolve,
};
pub use executor::{CliOutput, ExecError, JarCli, JenkinsCli, ScriptedCli};
pub use infrastructure::{JenkinsConfig, init_logging};

/// Version of the jenkee crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
