//! Credential metadata types
//!
//! Snapshots of what `list-credentials-as-xml` reports. Nothing here holds a
//! secret value; secrets only ever live in [`Secret`](super::Secret).

use serde::Serialize;
use std::collections::BTreeMap;

/// Name shown for the unnamed default domain
pub const GLOBAL_DOMAIN: &str = "(global)";

/// One credential entry of a domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialRecord {
    /// Fully qualified type name, e.g. `org.jenkinsci.plugins.plaincredentials.impl.FileCredentialsImpl`
    pub type_name: String,
    /// Last dotted segment of `type_name`
    pub type_tag: String,
    /// Credential id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Scope such as `GLOBAL` or `SYSTEM`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Type-specific metadata
    ///
    /// Nested elements use dotted paths (`storageData.storageAccountName`),
    /// attributes use `@` (`privateKeySource@class`).
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
}

impl CredentialRecord {
    /// Creates a record of the given type
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let type_tag = type_name
            .rsplit('.')
            .next()
            .unwrap_or(type_name.as_str())
            .to_string();
        Self {
            type_name,
            type_tag,
            id: None,
            description: None,
            scope: None,
            fields: BTreeMap::new(),
        }
    }

    /// Looks up a type-specific field; empty values count as absent
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// The type tag used for descriptor lookup
    #[must_use]
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Returns true if this record has the given id
    #[must_use]
    pub fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    /// Id for display
    #[must_use]
    pub fn display_id(&self) -> &str {
        self.id.as_deref().unwrap_or("(no id)")
    }

    /// Description for display
    #[must_use]
    pub fn display_description(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("(no description)")
    }

    /// Scope for display
    #[must_use]
    pub fn display_scope(&self) -> &str {
        self.scope.as_deref().unwrap_or("UNKNOWN")
    }
}

#[cfg(test)]
impl CredentialRecord {
    pub(crate) fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub(crate) fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }
}

/// A named group of credentials within a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialDomain {
    /// Domain name, [`GLOBAL_DOMAIN`] when unnamed
    pub name: String,
    /// Domain description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Credentials in source order
    pub credentials: Vec<CredentialRecord>,
}

impl CredentialDomain {
    /// First credential with the given id
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&CredentialRecord> {
        self.credentials.iter().find(|record| record.has_id(id))
    }
}
