//! Error types for the credentials domain

use crate::executor::ExecError;
use thiserror::Error;

/// Errors that abort a credential listing or description
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// No credential with this id after scanning every domain
    #[error("Credential '{id}' not found in store '{store}'")]
    NotFound {
        /// Requested credential id.
        id: String,
        /// Store that was searched.
        store: String,
    },

    /// A domain restriction matched no domain of the store
    #[error("Domain '{domain}' not found in store '{store}'")]
    DomainNotFound {
        /// Requested domain name.
        domain: String,
        /// Store that was searched.
        store: String,
    },

    /// `list-credentials-as-xml` exited with an error
    #[error("Failed to list credentials in store '{store}'{}", format_stderr(.stderr))]
    ListFailed {
        /// Store that was requested.
        store: String,
        /// Standard error output from jenkins-cli.
        stderr: String,
    },

    /// The credential listing is not well-formed XML
    #[error("Failed to parse XML: {0}")]
    MalformedResponse(String),

    /// jenkins-cli could not be run at all
    #[error(transparent)]
    Exec(#[from] ExecError),
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}
