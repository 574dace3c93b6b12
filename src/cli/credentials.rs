//! `jenkee list-credentials` and `jenkee describe-credentials`

use super::OutputFormat;
use anyhow::{Context, Result};
use jenkee::credentials;
use jenkee::executor::JenkinsCli;
use serde::Serialize;

/// Arguments of `describe-credentials`
#[derive(Debug, Clone, Copy)]
pub struct DescribeOptions<'a> {
    /// Credential store
    pub store: &'a str,
    /// Credential id
    pub id: &'a str,
    /// Restrict the search to this domain
    pub domain: Option<&'a str>,
    /// Fetch the secret value
    pub show_secret: bool,
    /// Output format
    pub format: OutputFormat,
}

/// Lists credential metadata of a store
pub fn list_credentials(
    cli: &dyn JenkinsCli,
    store: &str,
    domain: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let domains = credentials::list(cli, store, domain)?;
    render(format, &domains, || credentials::render_list(&domains))
}

/// Describes one credential, optionally with its secret
pub fn describe_credentials(cli: &dyn JenkinsCli, options: &DescribeOptions<'_>) -> Result<String> {
    if options.show_secret {
        tracing::warn!(id = options.id, "Secret values will be printed");
    }

    let description = credentials::describe(
        cli,
        options.store,
        options.id,
        options.show_secret,
        options.domain,
    )?;
    render(options.format, &description.report(), || description.render())
}

fn render<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to encode JSON")?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to encode YAML"),
    }
}
