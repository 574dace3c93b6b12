//! Credential metadata source
//!
//! Reads the document printed by `jenkins-cli list-credentials-as-xml <store>`:
//!
//! ```xml
//! <list-credentials-as-xml>
//!   <com.cloudbees.plugins.credentials.domains.DomainCredentials>
//!     <domain><name>ci</name></domain>
//!     <credentials>
//!       <org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl>
//!         <scope>GLOBAL</scope>
//!         <id>f1</id>
//!         <fileName>deploy.pem</fileName>
//!       </org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl>
//!     </credentials>
//!   </com.cloudbees.plugins.credentials.domains.DomainCredentials>
//! </list-credentials-as-xml>
//! ```

use super::errors::CredentialError;
use super::types::{CredentialDomain, CredentialRecord, GLOBAL_DOMAIN};
use super::xml::XmlElement;
use crate::executor::JenkinsCli;
use std::collections::BTreeMap;

/// Store searched when none is given
pub const DEFAULT_STORE: &str = "system::system::jenkins";

const DOMAIN_CREDENTIALS: &str = "com.cloudbees.plugins.credentials.domains.DomainCredentials";

/// Elements that map to the common record fields rather than `fields`
const COMMON_FIELDS: [&str; 3] = ["id", "description", "scope"];

/// Fetches and parses every domain of a store
pub fn fetch_domains(
    cli: &dyn JenkinsCli,
    store_id: &str,
) -> Result<Vec<CredentialDomain>, CredentialError> {
    tracing::debug!(store = store_id, "Listing credentials");

    let output = cli.run("list-credentials-as-xml", &[store_id], None)?;
    if output.is_failure() {
        return Err(CredentialError::ListFailed {
            store: store_id.to_string(),
            stderr: output.stderr.trim().to_string(),
        });
    }

    parse_credentials_xml(&output.stdout)
}

/// Parses a credential listing into domains, in document order
pub fn parse_credentials_xml(xml: &str) -> Result<Vec<CredentialDomain>, CredentialError> {
    let root = XmlElement::parse(xml)?;
    Ok(root
        .descendants_named(DOMAIN_CREDENTIALS)
        .into_iter()
        .map(domain_from_element)
        .collect())
}

fn domain_from_element(element: &XmlElement) -> CredentialDomain {
    let domain = element.child("domain");
    let name = domain
        .and_then(|d| d.child_text("name"))
        .unwrap_or(GLOBAL_DOMAIN);

    CredentialDomain {
        name: name.to_string(),
        description: domain
            .and_then(|d| d.child_text("description"))
            .map(str::to_string),
        credentials: element
            .child("credentials")
            .map(|list| list.children.iter().map(record_from_element).collect())
            .unwrap_or_default(),
    }
}

fn record_from_element(element: &XmlElement) -> CredentialRecord {
    let mut record = CredentialRecord::new(element.name.clone());
    record.id = element.child_text("id").map(str::to_string);
    record.description = element.child_text("description").map(str::to_string);
    record.scope = element.child_text("scope").map(str::to_string);

    for child in element
        .children
        .iter()
        .filter(|c| !COMMON_FIELDS.contains(&c.name.as_str()))
    {
        collect_fields(child, &child.name, &mut record.fields);
    }
    record
}

fn collect_fields(element: &XmlElement, path: &str, fields: &mut BTreeMap<String, String>) {
    for (key, value) in &element.attributes {
        fields.insert(format!("{path}@{key}"), value.clone());
    }
    if !element.text.is_empty() {
        fields.insert(path.to_string(), element.text.clone());
    }
    for child in &element.children {
        collect_fields(child, &format!("{path}.{}", child.name), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{CliOutput, ScriptedCli};

    const LISTING: &str = r#"<list-credentials-as-xml>
  <com.cloudbees.plugins.credentials.domains.DomainCredentials>
    <domain>
      <specifications/>
    </domain>
    <credentials>
      <com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey>
        <scope>GLOBAL</scope>
        <id>git-ssh</id>
        <description>Git checkout key</description>
        <username>git</username>
        <privateKeySource class="com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey$DirectEntryPrivateKeySource">
          <privateKey>
            <secret-redacted/>
          </privateKey>
        </privateKeySource>
      </com.cloudbees.jenkins.plugins.sshcredentials.impl.BasicSSHUserPrivateKey>
    </credentials>
  </com.cloudbees.plugins.credentials.domains.DomainCredentials>
  <com.cloudbees.plugins.credentials.domains.DomainCredentials>
    <domain>
      <name>azure</name>
      <description>Cloud accounts</description>
    </domain>
    <credentials>
      <com.microsoftopentechnologies.windowsazurestorage.helper.AzureStorageAccount>
        <scope>SYSTEM</scope>
        <id>blob</id>
        <storageData>
          <storageAccountName>artifacts</storageAccountName>
          <blobEndpointURL>https://artifacts.blob.core.windows.net/</blobEndpointURL>
        </storageData>
      </com.microsoftopentechnologies.windowsazurestorage.helper.AzureStorageAccount>
    </credentials>
  </com.cloudbees.plugins.credentials.domains.DomainCredentials>
  <com.cloudbees.plugins.credentials.domains.DomainCredentials>
    <domain><name>empty</name></domain>
    <credentials/>
  </com.cloudbees.plugins.credentials.domains.DomainCredentials>
</list-credentials-as-xml>"#;

    #[test]
    fn test_parse_domains_in_order() {
        let domains = parse_credentials_xml(LISTING).unwrap();
        let names: Vec<_> = domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec![GLOBAL_DOMAIN, "azure", "empty"]);
        assert_eq!(domains[1].description.as_deref(), Some("Cloud accounts"));
        assert!(domains[2].credentials.is_empty());
    }

    #[test]
    fn test_parse_record_common_fields() {
        let domains = parse_credentials_xml(LISTING).unwrap();
        let record = &domains[0].credentials[0];
        assert_eq!(record.type_tag(), "BasicSSHUserPrivateKey");
        assert_eq!(record.id.as_deref(), Some("git-ssh"));
        assert_eq!(record.description.as_deref(), Some("Git checkout key"));
        assert_eq!(record.scope.as_deref(), Some("GLOBAL"));
        assert!(!record.fields.contains_key("id"));
    }

    #[test]
    fn test_parse_nested_and_attribute_fields() {
        let domains = parse_credentials_xml(LISTING).unwrap();
        let ssh = &domains[0].credentials[0];
        assert_eq!(ssh.field("username"), Some("git"));
        assert!(
            ssh.field("privateKeySource@class")
                .unwrap()
                .ends_with("DirectEntryPrivateKeySource")
        );

        let azure = &domains[1].credentials[0];
        assert_eq!(azure.field("storageData.storageAccountName"), Some("artifacts"));
        assert_eq!(
            azure.field("storageData.blobEndpointURL"),
            Some("https://artifacts.blob.core.windows.net/")
        );
    }

    #[test]
    fn test_malformed_listing() {
        let err = parse_credentials_xml("<list-credentials-as-xml>").unwrap_err();
        assert!(matches!(err, CredentialError::MalformedResponse(_)));
    }

    #[test]
    fn test_fetch_domains_reports_cli_failure() {
        let cli = ScriptedCli::new().respond(
            "list-credentials-as-xml",
            CliOutput::failure(3, "ERROR: No such store\n"),
        );
        let err = fetch_domains(&cli, "bogus::store").unwrap_err();
        assert_eq!(
            err,
            CredentialError::ListFailed {
                store: "bogus::store".to_string(),
                stderr: "ERROR: No such store".to_string(),
            }
        );
    }

    #[test]
    fn test_fetch_domains_passes_store() {
        let cli = ScriptedCli::new().respond("list-credentials-as-xml", CliOutput::success(LISTING));
        fetch_domains(&cli, DEFAULT_STORE).unwrap();
        assert_eq!(cli.calls()[0].args, vec![DEFAULT_STORE.to_string()]);
    }
}
