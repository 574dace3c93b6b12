//! Configuration management
//!
//! Connection settings live in `~/.jenkins-inspector/.env`:
//!
//! ```text
//! JENKINS_URL=http://your-jenkins-server:8080/
//! JENKINS_USER_ID=your_email@example.com
//! JENKINS_API_TOKEN=your_api_token
//! ```
//!
//! Values from the file take precedence over the process environment. A file
//! left at the legacy location `~/.jenkins-studio/.env` is detected so the
//! user can be told to move it, but it is never read.

use crate::executor::ExecError;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

/// Directory under `$HOME` holding the `.env` file
pub const CONFIG_DIR: &str = ".jenkins-inspector";

/// Directory of the pre-rename tool, never loaded
pub const LEGACY_CONFIG_DIR: &str = ".jenkins-studio";

/// Where jenkins-cli.jar is cached unless `JENKINS_CLI_JAR` says otherwise
pub const DEFAULT_JAR_PATH: &str = "/tmp/jenkins-inspector/jenkins-cli.jar";

const JAR_DOWNLOAD_PATH: &str = "jnlpJars/jenkins-cli.jar";

const CONFIG_KEYS: [&str; 5] = [
    "JENKINS_URL",
    "JENKINS_USER_ID",
    "JENKINS_API_TOKEN",
    "JENKINS_CLI_JAR",
    "JENKEE_JAVA",
];

/// Jenkins connection configuration
#[derive(Clone)]
pub struct JenkinsConfig {
    /// Server base URL (`JENKINS_URL`)
    pub jenkins_url: Option<String>,
    /// User id (`JENKINS_USER_ID`)
    pub user_id: Option<String>,
    /// API token (`JENKINS_API_TOKEN`)
    pub api_token: Option<String>,
    /// The `.env` file this configuration was read from
    pub env_path: PathBuf,
    /// Legacy `.env` location
    pub legacy_env_path: PathBuf,
    /// Local path of jenkins-cli.jar
    pub jar_path: PathBuf,
    /// Java executable
    pub java_bin: String,
}

impl JenkinsConfig {
    /// Loads configuration for the current user
    #[must_use]
    pub fn load() -> Self {
        let home = dirs::home_dir().unwrap_or_default();
        Self::load_from_home(&home)
    }

    /// Loads configuration using `home` as the user's home directory
    #[must_use]
    pub fn load_from_home(home: &Path) -> Self {
        let env_path = home.join(CONFIG_DIR).join(".env");
        let legacy_env_path = home.join(LEGACY_CONFIG_DIR).join(".env");

        let mut values: HashMap<String, String> = std::env::vars()
            .filter(|(key, _)| CONFIG_KEYS.contains(&key.as_str()))
            .collect();

        match read_env_file(&env_path) {
            Ok(file_values) => values.extend(file_values),
            Err(e) => {
                tracing::warn!(path = %env_path.display(), error = %e, "Ignoring unreadable .env file");
            }
        }

        Self::from_values(&values, env_path, legacy_env_path)
    }

    /// Builds a configuration from already collected key/value pairs
    #[must_use]
    pub fn from_values(
        values: &HashMap<String, String>,
        env_path: PathBuf,
        legacy_env_path: PathBuf,
    ) -> Self {
        let get = |key: &str| values.get(key).filter(|v| !v.trim().is_empty()).cloned();

        Self {
            jenkins_url: get("JENKINS_URL"),
            user_id: get("JENKINS_USER_ID"),
            api_token: get("JENKINS_API_TOKEN"),
            env_path,
            legacy_env_path,
            jar_path: get("JENKINS_CLI_JAR").map_or_else(|| PathBuf::from(DEFAULT_JAR_PATH), PathBuf::from),
            java_bin: get("JENKEE_JAVA").unwrap_or_else(|| "java".to_string()),
        }
    }

    /// Returns true when URL, user id and API token are all set
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.jenkins_url.is_some() && self.user_id.is_some() && self.api_token.is_some()
    }

    /// Returns true when only the legacy `.env` file exists
    #[must_use]
    pub fn has_legacy_config(&self) -> bool {
        self.legacy_env_path.exists() && !self.env_path.exists()
    }

    /// Authentication arguments for jenkins-cli (`-auth user:token`)
    #[must_use]
    pub fn auth_args(&self) -> Vec<String> {
        match (&self.user_id, &self.api_token) {
            (Some(user), Some(token)) if self.is_configured() => {
                vec!["-auth".to_string(), format!("{user}:{token}")]
            }
            _ => Vec::new(),
        }
    }

    /// Parsed server URL, normalized to end with `/`
    pub fn base_url(&self) -> Result<Url, ExecError> {
        let raw = self.jenkins_url.as_deref().ok_or(ExecError::NotConfigured)?;
        let mut url = Url::parse(raw).map_err(|e| ExecError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;
        if url.cannot_be_a_base() {
            return Err(ExecError::InvalidUrl {
                url: raw.to_string(),
                reason: "not a base URL".to_string(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Download URL of jenkins-cli.jar on the configured server
    pub fn cli_jar_url(&self) -> Result<Url, ExecError> {
        let base = self.base_url()?;
        base.join(JAR_DOWNLOAD_PATH).map_err(|e| ExecError::InvalidUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })
    }
}

impl fmt::Debug for JenkinsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JenkinsConfig")
            .field("jenkins_url", &self.jenkins_url)
            .field("user_id", &self.user_id)
            .field("api_token", &self.api_token.as_ref().map(|_| "****"))
            .field("env_path", &self.env_path)
            .field("jar_path", &self.jar_path)
            .field("java_bin", &self.java_bin)
            .finish_non_exhaustive()
    }
}

fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, dotenvy::Error> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    dotenvy::from_path_iter(path)?.collect()
}
