//! Prelude module for common imports

// Credential inspection
pub use crate::credentials::{
    CredentialDescription, CredentialDomain, CredentialError, CredentialKind, CredentialRecord,
    DEFAULT_STORE, Descriptor, Secret, SecretOutcome, SecretScript, describe, list, render_list,
    resolve,
};

// jenkins-cli execution
pub use crate::executor::{CliOutput, ExecError, JarCli, JenkinsCli, ScriptedCli};

// Configuration
pub use crate::infrastructure::JenkinsConfig;
