//! Credential inspection
//!
//! Metadata comes from `list-credentials-as-xml`; secrets are fetched on
//! demand by per-kind Groovy scripts. A type tag resolves to a
//! [`CredentialKind`] through [`resolve`], and unknown tags are still
//! described, just without details.

mod describe;
mod errors;
mod kind;
mod metadata;
mod render;
mod scripts;
mod secret;
mod types;
mod xml;

pub use describe::{
    CredentialDescription, DescriptionReport, SecretOutcome, describe, find_credential, list,
    render_list,
};
pub use errors::CredentialError;
pub use kind::{CredentialKind, Descriptor, resolve};
pub use metadata::{DEFAULT_STORE, fetch_domains, parse_credentials_xml};
pub use scripts::SecretScript;
pub use secret::{Secret, SecretOutput};
pub use types::{CredentialDomain, CredentialRecord, GLOBAL_DOMAIN};
pub use xml::XmlElement;
