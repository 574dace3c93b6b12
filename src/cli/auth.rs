//! `jenkee auth` - Verify Jenkins authentication
//!
//! Runs `who-am-i` with the configured credentials. When nothing is
//! configured yet the error carries setup instructions instead.

use super::ensure_success;
use anyhow::Result;
use jenkee::executor::JenkinsCli;
use jenkee::infrastructure::JenkinsConfig;
use std::fmt::Write as _;

/// Instructions shown when the `.env` file is missing or incomplete
pub fn setup_instructions(config: &JenkinsConfig) -> String {
    let mut text = String::from("Jenkins credentials not configured.\n\n");
    let _ = writeln!(
        text,
        "Please create a .env file at: {}",
        config.env_path.display()
    );
    if config.has_legacy_config() {
        let _ = write!(
            text,
            "\nDetected legacy config at: {}\nPlease move it to: {}\n",
            config.legacy_env_path.display(),
            config.env_path.display()
        );
    }
    text.push_str(
        "\nContent:
  JENKINS_URL=http://your-jenkins-server:8080/
  JENKINS_USER_ID=your_email@example.com
  JENKINS_API_TOKEN=your_api_token

You can get your API token from:
  Jenkins > User > Configure > API Token",
    );
    text
}

/// Verifies the credentials by running `who-am-i`
pub fn auth(cli: &dyn JenkinsCli) -> Result<String> {
    tracing::info!("Verifying authentication");

    let output = ensure_success(cli.run("who-am-i", &[], None)?, "✗ Authentication failed")?;
    let lines: Vec<&str> = output
        .stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut text = String::from("Verifying authentication...\n");
    match lines.split_first() {
        None => text.push_str("✓ Authentication successful\n"),
        Some((first, rest)) => {
            if first.starts_with("Authenticated as:") {
                let _ = writeln!(text, "✓ {first}");
            } else {
                let _ = writeln!(text, "✓ Authenticated as: {first}");
            }
            for line in rest {
                let _ = writeln!(text, "{line}");
            }
        }
    }
    Ok(text)
}
