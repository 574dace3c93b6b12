//! Credential kinds and the type-tag registry

use super::render;
use super::scripts::{self, SecretScript};
use super::secret::Secret;
use super::types::CredentialRecord;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::fmt;

/// Credential types this tool knows how to describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CredentialKind {
    /// `FileCredentialsImpl`
    FileSecret,
    /// `BasicSSHUserPrivateKey`
    SshPrivateKey,
    /// `UsernamePasswordCredentialsImpl`
    UsernamePassword,
    /// `StringCredentialsImpl`
    SecretText,
    /// `GoogleRobotPrivateKeyCredentials`
    GcpServiceAccount,
    /// `AzureStorageAccount`
    AzureStorageAccount,
    /// `AzureCredentials`
    AzureServicePrincipal,
    /// `BrowserStackCredentials`
    BrowserStack,
    /// `GitLabApiTokenImpl`
    GitLabToken,
}

impl CredentialKind {
    /// Every known kind
    pub const ALL: [Self; 9] = [
        Self::FileSecret,
        Self::SshPrivateKey,
        Self::UsernamePassword,
        Self::SecretText,
        Self::GcpServiceAccount,
        Self::AzureStorageAccount,
        Self::AzureServicePrincipal,
        Self::BrowserStack,
        Self::GitLabToken,
    ];

    /// Type tag as it appears in the credential listing
    #[must_use]
    pub const fn type_tag(self) -> &'static str {
        match self {
            Self::FileSecret => "FileCredentialsImpl",
            Self::SshPrivateKey => "BasicSSHUserPrivateKey",
            Self::UsernamePassword => "UsernamePasswordCredentialsImpl",
            Self::SecretText => "StringCredentialsImpl",
            Self::GcpServiceAccount => "GoogleRobotPrivateKeyCredentials",
            Self::AzureStorageAccount => "AzureStorageAccount",
            Self::AzureServicePrincipal => "AzureCredentials",
            Self::BrowserStack => "BrowserStackCredentials",
            Self::GitLabToken => "GitLabApiTokenImpl",
        }
    }

    /// Returns true if the secret of this kind can be fetched
    #[must_use]
    pub fn supports_secret(self) -> bool {
        self.secret_script("").is_some()
    }

    /// Groovy script that prints the secret of `credential_id`
    #[must_use]
    pub fn secret_script(self, credential_id: &str) -> Option<SecretScript> {
        scripts::secret_script(self, credential_id)
    }

    /// Decodes the output of [`secret_script`](Self::secret_script)
    #[must_use]
    pub fn parse_secret(self, raw: &str) -> Option<Secret> {
        Secret::parse(self, raw)
    }

    /// Renders the `Details:` and `Usage in Job:` sections
    ///
    /// Secret values are shown only when `secret` carries them; otherwise a
    /// protected placeholder stands in.
    #[must_use]
    pub fn render_details(self, record: &CredentialRecord, secret: Option<&Secret>) -> String {
        render::details(self, record, secret)
    }
}

impl fmt::Display for CredentialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_tag())
    }
}

/// Result of looking a type tag up in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Descriptor {
    /// A kind with its own details and retrieval logic
    Known {
        /// The matched kind
        kind: CredentialKind,
    },
    /// A type this tool has no descriptor for
    Unknown {
        /// Tag as reported by the server
        type_tag: String,
    },
}

impl Descriptor {
    /// The known kind, if any
    #[must_use]
    pub fn kind(&self) -> Option<CredentialKind> {
        match self {
            Self::Known { kind } => Some(*kind),
            Self::Unknown { .. } => None,
        }
    }

    /// Renders the details section, with a fallback for unknown types
    #[must_use]
    pub fn render_details(&self, record: &CredentialRecord, secret: Option<&Secret>) -> String {
        match self {
            Self::Known { kind } => kind.render_details(record, secret),
            Self::Unknown { type_tag } => {
                format!("Details:\n  (Unknown credential type: {type_tag})\n\n")
            }
        }
    }
}

static REGISTRY: Lazy<AHashMap<&'static str, CredentialKind>> = Lazy::new(|| {
    CredentialKind::ALL
        .into_iter()
        .map(|kind| (kind.type_tag(), kind))
        .collect()
});

/// Looks up the descriptor for a type tag (exact match)
#[must_use]
pub fn resolve(type_tag: &str) -> Descriptor {
    REGISTRY.get(type_tag).map_or_else(
        || Descriptor::Unknown {
            type_tag: type_tag.to_string(),
        },
        |&kind| Descriptor::Known { kind },
    )
}
