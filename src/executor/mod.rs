//! jenkins-cli execution layer
//!
//! This module contains the [`JenkinsCli`] trait and its implementations.

mod errors;
mod jar_cli;
mod scripted;
mod traits;

pub use errors::ExecError;
pub use jar_cli::JarCli;
pub use scripted::{RecordedCall, ScriptedCli};
pub use traits::{CliOutput, JenkinsCli};
