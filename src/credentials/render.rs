//! Per-kind `Details:` text

use super::kind::CredentialKind;
use super::secret::Secret;
use super::types::CredentialRecord;
use std::fmt::Write as _;

const RULE_WIDTH: usize = 60;

/// Writes a labelled multi-line secret framed by `=` rules
pub(crate) fn secret_block(out: &mut String, label: &str, content: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "  {label}:\n{rule}\n{content}\n{rule}");
}

/// Writes the placeholder shown instead of a secret
pub(crate) fn protected(out: &mut String, label: &str) {
    let _ = writeln!(out, "  {label}: [PROTECTED - Use --show-secret to display]");
}

fn field(out: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let _ = writeln!(out, "  {label}: {value}");
    }
}

fn usage(out: &mut String, lines: &[&str]) {
    out.push('\n');
    out.push_str("Usage in Job:\n");
    for line in lines {
        let _ = writeln!(out, "  {line}");
    }
    out.push('\n');
}

pub(crate) fn details(
    kind: CredentialKind,
    record: &CredentialRecord,
    secret: Option<&Secret>,
) -> String {
    let mut out = String::from("Details:\n");

    match kind {
        CredentialKind::FileSecret => {
            field(&mut out, "File Name", record.field("fileName"));
            match secret.and_then(Secret::file_content) {
                Some(content) => secret_block(&mut out, "Content", content),
                None => protected(&mut out, "Content"),
            }
            usage(
                &mut out,
                &[
                    "Use 'Secret file' credential binding in job configuration",
                    "The file will be available at a temporary path during build",
                ],
            );
        }
        CredentialKind::SshPrivateKey => {
            let username = record
                .field("username")
                .or_else(|| secret.and_then(Secret::username));
            field(&mut out, "Username", username);
            let source = record
                .field("privateKeySource@class")
                .map(|class| class.rsplit('.').next().unwrap_or(class));
            field(&mut out, "Private Key Source", source);
            match secret.and_then(Secret::private_key) {
                Some(key) => secret_block(&mut out, "Private Key", key),
                None => protected(&mut out, "Private Key"),
            }
            usage(
                &mut out,
                &[
                    "Use 'SSH User Private Key' credential binding",
                    "Or use in SSH-based SCM configurations",
                ],
            );
        }
        CredentialKind::UsernamePassword => {
            let username = record
                .field("username")
                .or_else(|| secret.and_then(Secret::username));
            field(&mut out, "Username", username);
            match secret.and_then(Secret::password) {
                Some(password) => {
                    let _ = writeln!(out, "  Password: {password}");
                }
                None => protected(&mut out, "Password"),
            }
            usage(
                &mut out,
                &[
                    "Use 'Username and password' credential binding",
                    "Separate variables for username and password can be specified",
                ],
            );
        }
        CredentialKind::SecretText => {
            match secret.and_then(Secret::secret_text) {
                Some(text) => {
                    let _ = writeln!(out, "  Secret Text: {text}");
                }
                None => protected(&mut out, "Secret Text"),
            }
            usage(
                &mut out,
                &[
                    "Use 'Secret text' credential binding",
                    "The secret will be available as an environment variable",
                ],
            );
        }
        CredentialKind::GcpServiceAccount => {
            let project_id = record
                .field("projectId")
                .or_else(|| secret.and_then(Secret::project_id));
            field(&mut out, "Project ID", project_id);
            match secret.and_then(Secret::service_account_key) {
                Some(key) => secret_block(&mut out, "Service Account Key", key),
                None => protected(&mut out, "Service Account Key"),
            }
            usage(
                &mut out,
                &[
                    "Use with Google Cloud Build Wrapper",
                    "Or use 'Google Service Account from private key' credential binding",
                ],
            );
        }
        CredentialKind::AzureStorageAccount => {
            field(
                &mut out,
                "Storage Account Name",
                record.field("storageData.storageAccountName"),
            );
            field(
                &mut out,
                "Blob Endpoint URL",
                record.field("storageData.blobEndpointURL"),
            );
            protected(&mut out, "Access Key");
            usage(
                &mut out,
                &[
                    "Use with Azure Storage plugin",
                    "For uploading/downloading artifacts to Azure Blob Storage",
                ],
            );
        }
        CredentialKind::AzureServicePrincipal => {
            field(&mut out, "Subscription ID", record.field("subscriptionId"));
            field(&mut out, "Client ID", record.field("clientId"));
            field(&mut out, "Tenant", record.field("tenant"));
            protected(&mut out, "Client Secret");
            usage(
                &mut out,
                &["Use with Azure plugins for service principal authentication"],
            );
        }
        CredentialKind::BrowserStack => {
            field(&mut out, "Username", record.field("username"));
            protected(&mut out, "Access Key");
            usage(
                &mut out,
                &["Use with BrowserStack plugin for automated testing"],
            );
        }
        CredentialKind::GitLabToken => {
            protected(&mut out, "API Token");
            usage(
                &mut out,
                &[
                    "Use with GitLab plugin for API authentication",
                    "Typically used for merge request status updates",
                ],
            );
        }
    }

    out
}
