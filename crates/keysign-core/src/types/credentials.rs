//! Signing credential types

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sources::{SourceError, SourceResult};

/// One of the four values a signing identity is made of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialField {
    KeystorePath,
    StorePassword,
    KeyAlias,
    KeyPassword,
}

impl CredentialField {
    /// All fields, in declaration order
    pub const ALL: [CredentialField; 4] = [
        CredentialField::KeystorePath,
        CredentialField::StorePassword,
        CredentialField::KeyAlias,
        CredentialField::KeyPassword,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialField::KeystorePath => "keystore_path",
            CredentialField::StorePassword => "store_password",
            CredentialField::KeyAlias => "key_alias",
            CredentialField::KeyPassword => "key_password",
        }
    }
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved signing identity
///
/// Every field is always populated. When the resolver could not find a
/// production source the values are the well-known debug keystore and
/// `is_debug_fallback` is set.
///
/// `Debug` output never contains the passwords; `Serialize` does, since the
/// serialized form is what gets handed to the signer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    /// Path to the keystore file
    pub keystore_path: PathBuf,
    /// Password protecting the keystore
    pub store_password: String,
    /// Alias of the key entry inside the keystore
    pub key_alias: String,
    /// Password protecting the key entry
    pub key_password: String,
    /// Whether debug/default values were used
    pub is_debug_fallback: bool,
}

impl CredentialBundle {
    /// Whether this bundle is safe to sign a distributable artifact with
    pub fn is_production(&self) -> bool {
        !self.is_debug_fallback
    }
}

impl fmt::Debug for CredentialBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialBundle")
            .field("keystore_path", &self.keystore_path)
            .field("store_password", &"<redacted>")
            .field("key_alias", &self.key_alias)
            .field("key_password", &"<redacted>")
            .field("is_debug_fallback", &self.is_debug_fallback)
            .finish()
    }
}

/// Whatever a single source managed to find
///
/// A source may fill any subset of the fields. Only a complete set is
/// turned into a [`CredentialBundle`]; fields are never merged across sources.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PartialCredentials {
    pub keystore_path: Option<PathBuf>,
    pub store_password: Option<String>,
    pub key_alias: Option<String>,
    pub key_password: Option<String>,
}

impl PartialCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keystore_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.keystore_path = Some(path.into());
        self
    }

    pub fn with_store_password(mut self, password: impl Into<String>) -> Self {
        self.store_password = Some(password.into());
        self
    }

    pub fn with_key_alias(mut self, alias: impl Into<String>) -> Self {
        self.key_alias = Some(alias.into());
        self
    }

    pub fn with_key_password(mut self, password: impl Into<String>) -> Self {
        self.key_password = Some(password.into());
        self
    }

    /// Fields that are absent or empty
    pub fn missing_fields(&self) -> Vec<CredentialField> {
        CredentialField::ALL
            .into_iter()
            .filter(|field| !self.has(*field))
            .collect()
    }

    /// Check whether a field is present and non-empty
    pub fn has(&self, field: CredentialField) -> bool {
        match field {
            CredentialField::KeystorePath => self
                .keystore_path
                .as_ref()
                .is_some_and(|p| !p.as_os_str().is_empty()),
            CredentialField::StorePassword => non_empty(&self.store_password),
            CredentialField::KeyAlias => non_empty(&self.key_alias),
            CredentialField::KeyPassword => non_empty(&self.key_password),
        }
    }

    /// Whether no field is set at all
    pub fn is_empty(&self) -> bool {
        self.missing_fields().len() == CredentialField::ALL.len()
    }

    /// Turn into a bundle, all-or-nothing
    ///
    /// Returns `SourceError::Incomplete` naming the missing fields if any
    /// field is absent or empty.
    pub fn complete(self, source_name: &str, is_debug_fallback: bool) -> SourceResult<CredentialBundle> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(SourceError::Incomplete {
                source_name: source_name.to_string(),
                missing,
            });
        }

        match (self.keystore_path, self.store_password, self.key_alias, self.key_password) {
            (Some(keystore_path), Some(store_password), Some(key_alias), Some(key_password)) => {
                Ok(CredentialBundle {
                    keystore_path,
                    store_password,
                    key_alias,
                    key_password,
                    is_debug_fallback,
                })
            }
            _ => Err(SourceError::Incomplete {
                source_name: source_name.to_string(),
                missing: CredentialField::ALL.to_vec(),
            }),
        }
    }
}

impl fmt::Debug for PartialCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("PartialCredentials")
            .field("keystore_path", &self.keystore_path)
            .field("store_password", &redact(&self.store_password))
            .field("key_alias", &self.key_alias)
            .field("key_password", &redact(&self.key_password))
            .finish()
    }
}

fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> PartialCredentials {
        PartialCredentials::new()
            .with_keystore_path("/keys/rel.jks")
            .with_store_password("secret1")
            .with_key_alias("relkey")
            .with_key_password("secret2")
    }

    #[test]
    fn test_complete_all_fields() {
        let bundle = full().complete("test", false).unwrap();
        assert_eq!(bundle.keystore_path, PathBuf::from("/keys/rel.jks"));
        assert_eq!(bundle.store_password, "secret1");
        assert_eq!(bundle.key_alias, "relkey");
        assert_eq!(bundle.key_password, "secret2");
        assert!(!bundle.is_debug_fallback);
        assert!(bundle.is_production());
    }

    #[test]
    fn test_complete_rejects_missing_field() {
        let mut partial = full();
        partial.key_alias = None;

        match partial.complete("props", false) {
            Err(SourceError::Incomplete { source_name, missing }) => {
                assert_eq!(source_name, "props");
                assert_eq!(missing, vec![CredentialField::KeyAlias]);
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let partial = full().with_store_password("");
        assert_eq!(partial.missing_fields(), vec![CredentialField::StorePassword]);

        let partial = full().with_keystore_path("");
        assert_eq!(partial.missing_fields(), vec![CredentialField::KeystorePath]);
    }

    #[test]
    fn test_is_empty() {
        assert!(PartialCredentials::new().is_empty());
        assert!(!PartialCredentials::new().with_key_alias("a").is_empty());
    }

    #[test]
    fn test_debug_redacts_passwords() {
        let bundle = full().complete("test", false).unwrap();
        let rendered = format!("{:?}", bundle);
        assert!(!rendered.contains("secret1"));
        assert!(!rendered.contains("secret2"));
        assert!(rendered.contains("relkey"));

        let rendered = format!("{:?}", full());
        assert!(!rendered.contains("secret1"));
        assert!(rendered.contains("<redacted>"));
    }
}
