//! Credential listing and description
//!
//! Both operations read the store's metadata once. `describe` additionally
//! runs the kind's retrieval script, but only when the caller asked for the
//! secret and the kind supports it.

use super::errors::CredentialError;
use super::kind::{Descriptor, resolve};
use super::metadata::fetch_domains;
use super::secret::Secret;
use super::types::{CredentialDomain, CredentialRecord};
use crate::executor::JenkinsCli;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// What happened to the secret during a description
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretOutcome {
    /// Secret was not requested
    NotRequested,
    /// Kind has no retrieval script
    Unsupported,
    /// Script ran; the secret may still be empty
    Fetched(Secret),
    /// Script could not be run or exited with an error
    Unavailable,
}

impl SecretOutcome {
    /// The secret to render, if one was fetched
    #[must_use]
    pub fn secret(&self) -> Option<&Secret> {
        match self {
            Self::Fetched(secret) => Some(secret),
            _ => None,
        }
    }

    fn status(&self) -> &'static str {
        match self {
            Self::NotRequested => "not_requested",
            Self::Unsupported => "unsupported",
            Self::Fetched(secret) if secret.is_empty() => "empty",
            Self::Fetched(_) => "fetched",
            Self::Unavailable => "unavailable",
        }
    }
}

/// A located credential with its descriptor and secret outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDescription {
    /// Store that was searched
    pub store_id: String,
    /// Domain the credential was found in
    pub domain_name: String,
    /// Description of that domain
    pub domain_description: Option<String>,
    /// Credential metadata
    pub record: CredentialRecord,
    /// Registry lookup result for the record's type tag
    pub descriptor: Descriptor,
    /// Secret retrieval result
    pub secret: SecretOutcome,
}

impl CredentialDescription {
    /// Renders the human-readable description
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Domain: {} ===", self.domain_name);
        if let Some(description) = &self.domain_description {
            let _ = writeln!(out, "Description: {description}");
        }
        out.push('\n');

        let _ = writeln!(out, "ID: {}", self.record.display_id());
        let _ = writeln!(out, "Type: {}", self.record.type_tag());
        let _ = writeln!(out, "Scope: {}", self.record.display_scope());
        let _ = writeln!(out, "Description: {}", self.record.display_description());
        out.push('\n');

        if self.secret == SecretOutcome::Unsupported {
            let _ = writeln!(
                out,
                "Note: Secret retrieval is not supported for credential type '{}'\n",
                self.record.type_tag()
            );
        }

        out.push_str(
            &self
                .descriptor
                .render_details(&self.record, self.secret.secret()),
        );
        out
    }

    /// Structured form for JSON/YAML output
    #[must_use]
    pub fn report(&self) -> DescriptionReport<'_> {
        DescriptionReport {
            store: &self.store_id,
            domain: &self.domain_name,
            domain_description: self.domain_description.as_deref(),
            credential: &self.record,
            descriptor: &self.descriptor,
            secret_status: self.secret.status(),
            secret: self
                .secret
                .secret()
                .map(|s| s.fields().into_iter().collect()),
        }
    }
}

/// Serializable view of a [`CredentialDescription`]
#[derive(Debug, Serialize)]
pub struct DescriptionReport<'a> {
    store: &'a str,
    domain: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    domain_description: Option<&'a str>,
    credential: &'a CredentialRecord,
    descriptor: &'a Descriptor,
    secret_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret: Option<BTreeMap<&'static str, &'a str>>,
}

/// Finds the first credential with `credential_id`, scanning domains in order
///
/// `domain` restricts the scan to the domain with that exact name.
pub fn find_credential<'a>(
    domains: &'a [CredentialDomain],
    store_id: &str,
    credential_id: &str,
    domain: Option<&str>,
) -> Result<(&'a CredentialDomain, &'a CredentialRecord), CredentialError> {
    let mut candidates = domains
        .iter()
        .filter(|d| domain.is_none_or(|name| d.name == name))
        .peekable();

    if let Some(name) = domain
        && candidates.peek().is_none()
    {
        return Err(CredentialError::DomainNotFound {
            domain: name.to_string(),
            store: store_id.to_string(),
        });
    }

    candidates
        .find_map(|d| d.find(credential_id).map(|record| (d, record)))
        .ok_or_else(|| CredentialError::NotFound {
            id: credential_id.to_string(),
            store: store_id.to_string(),
        })
}

/// Locates a credential and, when `reveal` is set, fetches its secret
pub fn describe(
    cli: &dyn JenkinsCli,
    store_id: &str,
    credential_id: &str,
    reveal: bool,
    domain: Option<&str>,
) -> Result<CredentialDescription, CredentialError> {
    let domains = fetch_domains(cli, store_id)?;
    let (found_in, record) = find_credential(&domains, store_id, credential_id, domain)?;
    let descriptor = resolve(record.type_tag());

    tracing::debug!(
        id = credential_id,
        domain = %found_in.name,
        type_tag = record.type_tag(),
        "Credential located"
    );

    let secret = match (&descriptor, reveal) {
        (_, false) | (Descriptor::Unknown { .. }, true) => SecretOutcome::NotRequested,
        (Descriptor::Known { kind }, true) => match kind.secret_script(credential_id) {
            None => SecretOutcome::Unsupported,
            Some(script) => match cli.run_groovy(&script.body, &script.arg_refs()) {
                Ok(output) if output.is_success() => kind
                    .parse_secret(&output.stdout)
                    .map_or(SecretOutcome::Unsupported, SecretOutcome::Fetched),
                Ok(output) => {
                    tracing::warn!(
                        exit_code = output.exit_code,
                        stderr = output.stderr.trim(),
                        "Secret retrieval script failed"
                    );
                    SecretOutcome::Unavailable
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Secret retrieval script could not run");
                    SecretOutcome::Unavailable
                }
            },
        },
    };

    Ok(CredentialDescription {
        store_id: store_id.to_string(),
        domain_name: found_in.name.clone(),
        domain_description: found_in.description.clone(),
        record: record.clone(),
        descriptor,
        secret,
    })
}

/// Lists the store's domains, optionally only the one named `domain_filter`
///
/// A filter that matches nothing yields an empty list.
pub fn list(
    cli: &dyn JenkinsCli,
    store_id: &str,
    domain_filter: Option<&str>,
) -> Result<Vec<CredentialDomain>, CredentialError> {
    let domains = fetch_domains(cli, store_id)?;
    Ok(match domain_filter.filter(|f| !f.is_empty()) {
        Some(name) => domains.into_iter().filter(|d| d.name == name).collect(),
        None => domains,
    })
}

/// Renders the listing text for `domains`
#[must_use]
pub fn render_list(domains: &[CredentialDomain]) -> String {
    let mut out = String::new();
    for domain in domains {
        let _ = writeln!(out, "\n=== Domain: {} ===", domain.name);
        if let Some(description) = &domain.description {
            let _ = writeln!(out, "Description: {description}");
        }
        out.push('\n');

        if domain.credentials.is_empty() {
            out.push_str("  (no credentials)\n");
            continue;
        }
        for record in &domain.credentials {
            render_summary(&mut out, record);
        }
    }
    out
}

fn render_summary(out: &mut String, record: &CredentialRecord) {
    let _ = writeln!(out, "ID: {}", record.display_id());
    let _ = writeln!(out, "  Type: {}", record.type_tag());
    let _ = writeln!(out, "  Scope: {}", record.display_scope());
    let _ = writeln!(out, "  Description: {}", record.display_description());

    let extra = match record.type_tag() {
        "FileCredentialsImpl" => Some(("File Name", "fileName")),
        "BasicSSHUserPrivateKey"
        | "UsernamePasswordCredentialsImpl"
        | "BrowserStackCredentials" => Some(("Username", "username")),
        "GoogleRobotPrivateKeyCredentials" => Some(("Project ID", "projectId")),
        "AzureStorageAccount" => Some(("Storage Account", "storageData.storageAccountName")),
        _ => None,
    };
    if let Some((label, value)) = extra.and_then(|(label, name)| Some((label, record.field(name)?)))
    {
        let _ = writeln!(out, "  {label}: {value}");
    }
    out.push('\n');
}
