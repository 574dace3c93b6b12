//! Error types for jenkins-cli execution

use thiserror::Error;

/// Errors that can occur while invoking jenkins-cli.jar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    /// `JENKINS_URL`, `JENKINS_USER_ID` or `JENKINS_API_TOKEN` is missing
    #[error("Jenkins credentials not configured")]
    NotConfigured,

    /// `JENKINS_URL` is not a usable base URL
    #[error("Invalid JENKINS_URL '{url}': {reason}")]
    InvalidUrl {
        /// The configured value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// jenkins-cli.jar could not be fetched from the server
    #[error("Error downloading jenkins-cli.jar from {url}: {reason}")]
    JarDownload {
        /// Download location.
        url: String,
        /// Error message describing the failure.
        reason: String,
    },

    /// The java process could not be started
    #[error("Failed to start '{program}': {reason}")]
    Spawn {
        /// Program that was launched.
        program: String,
        /// Error message describing the failure.
        reason: String,
    },

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExecError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
