//! Groovy retrieval scripts
//!
//! Each script looks the credential up by the id passed as `args[0]`, checks
//! its concrete class and prints the secret using the line protocol decoded
//! by [`SecretOutput`](super::secret::SecretOutput). A credential of the
//! wrong class prints nothing.

use super::kind::CredentialKind;
use super::secret::{
    FILE_CONTENT, PASSWORD, PRIVATE_KEY, PROJECT_ID, SECRET, SERVICE_ACCOUNT_KEY, USERNAME,
};

/// A Groovy program plus the arguments it expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretScript {
    /// Script source, sent on stdin
    pub body: String,
    /// Script arguments, the credential id first
    pub args: Vec<String>,
}

impl SecretScript {
    /// Arguments as string slices, ready for [`JenkinsCli::run_groovy`](crate::executor::JenkinsCli::run_groovy)
    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

/// Builds the retrieval script for `kind`, or `None` when retrieval is unsupported
pub(crate) fn secret_script(kind: CredentialKind, credential_id: &str) -> Option<SecretScript> {
    let (class, body) = match kind {
        CredentialKind::FileSecret => (
            "org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl",
            block(
                FILE_CONTENT,
                "new String(cred.secretBytes.plainData, \"UTF-8\")",
            ),
        ),
        CredentialKind::SshPrivateKey => (
            "com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey",
            format!(
                "{}{}",
                value(USERNAME, "cred.username"),
                block(PRIVATE_KEY, "cred.privateKey")
            ),
        ),
        CredentialKind::UsernamePassword => (
            "com.cloudbees.plugins.credentials.impl.UsernamePasswordCredentialsImpl",
            format!(
                "{}{}",
                value(USERNAME, "cred.username"),
                value(PASSWORD, "cred.password.plainText")
            ),
        ),
        CredentialKind::SecretText => (
            "org.jenkinsci.plugins.plaincredentials.impl.StringCredentialsImpl",
            value(SECRET, "cred.secret.plainText"),
        ),
        CredentialKind::GcpServiceAccount => (
            "com.google.jenkins.plugins.credentials.oauth.GoogleRobotPrivateKeyCredentials",
            format!(
                "{}    def key = cred.serviceAccountConfig?.secretJsonKey\n    if (key != null) {{\n    {}    }}\n",
                value(PROJECT_ID, "cred.projectId"),
                block(SERVICE_ACCOUNT_KEY, "new String(key.plainData, \"UTF-8\")")
                    .replace("\n    ", "\n        ")
            ),
        ),
        CredentialKind::AzureStorageAccount
        | CredentialKind::AzureServicePrincipal
        | CredentialKind::BrowserStack
        | CredentialKind::GitLabToken => return None,
    };

    Some(SecretScript {
        body: lookup(class, &body),
        args: vec![credential_id.to_string()],
    })
}

fn lookup(class: &str, body: &str) -> String {
    format!(
        "import com.cloudbees.plugins.credentials.Credentials
import com.cloudbees.plugins.credentials.CredentialsProvider
import jenkins.model.Jenkins
import {class}

def credId = args[0]
def cred = CredentialsProvider.lookupCredentials(Credentials.class, Jenkins.instance).find {{ it.id == credId }}

if (cred instanceof {short}) {{
{body}}}
",
        short = class.rsplit('.').next().unwrap_or(class),
    )
}

fn value(key: &str, expr: &str) -> String {
    format!("    println \"{key}:${{{expr}}}\"\n")
}

fn block(name: &str, expr: &str) -> String {
    format!("    println \"{name}_START\"\n    println {expr}\n    println \"{name}_END\"\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_passed_as_argument() {
        let id = "it's\"${evil}";
        let script = secret_script(CredentialKind::SecretText, id).unwrap();
        assert_eq!(script.args, vec![id.to_string()]);
        assert!(!script.body.contains(id));
        assert!(script.body.contains("def credId = args[0]"));
    }

    #[test]
    fn test_first_match_lookup() {
        let script = secret_script(CredentialKind::FileSecret, "f1").unwrap();
        assert!(script.body.contains(".find { it.id == credId }"));
        assert!(
            script
                .body
                .contains("import org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl")
        );
        assert!(script.body.contains("if (cred instanceof FileCredentialsImpl) {"));
    }

    #[test]
    fn test_scripts_print_protocol_markers() {
        let ssh = secret_script(CredentialKind::SshPrivateKey, "k").unwrap();
        assert!(ssh.body.contains("println \"USERNAME:${cred.username}\""));
        assert!(ssh.body.contains("println \"PRIVATE_KEY_START\""));
        assert!(ssh.body.contains("println \"PRIVATE_KEY_END\""));

        let up = secret_script(CredentialKind::UsernamePassword, "u").unwrap();
        assert!(up.body.contains("PASSWORD:${cred.password.plainText}"));

        let gcp = secret_script(CredentialKind::GcpServiceAccount, "g").unwrap();
        assert!(gcp.body.contains("PROJECT_ID:${cred.projectId}"));
        assert!(gcp.body.contains("SERVICE_ACCOUNT_KEY_START"));
        assert!(gcp.body.contains("if (key != null) {"));
    }

    #[test]
    fn test_unsupported_kinds_have_no_script() {
        for kind in [
            CredentialKind::AzureStorageAccount,
            CredentialKind::AzureServicePrincipal,
            CredentialKind::BrowserStack,
            CredentialKind::GitLabToken,
        ] {
            assert!(secret_script(kind, "x").is_none());
        }
    }

    #[test]
    fn test_arg_refs() {
        let script = secret_script(CredentialKind::SecretText, "token").unwrap();
        assert_eq!(script.arg_refs(), vec!["token"]);
    }
}
