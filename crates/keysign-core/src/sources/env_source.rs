//! Environment variable credential source

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use once_cell::sync::Lazy;

use crate::types::{CredentialField, PartialCredentials};
use super::traits::{CredentialSource, SourceError, SourceResult};

/// Variable names, in field order
pub const ENV_VARS: [&str; 4] = [
    "RELEASE_STORE_FILE",
    "RELEASE_STORE_PASSWORD",
    "RELEASE_KEY_ALIAS",
    "RELEASE_KEY_PASSWORD",
];

/// Mapping from credential fields to environment variable names
static ENV_VAR_MAP: Lazy<HashMap<CredentialField, &'static str>> = Lazy::new(|| {
    CredentialField::ALL.into_iter().zip(ENV_VARS).collect()
});

/// Reads credentials from the `RELEASE_*` environment variables
///
/// Variables are captured when the source is built, so one resolution sees
/// a single consistent snapshot. Empty values count as unset. A relative
/// `RELEASE_STORE_FILE` is resolved against the base directory when one is set.
///
/// # Example
///
/// ```
/// use keysign_core::sources::{CredentialSource, EnvironmentSource};
///
/// let source = EnvironmentSource::from_vars([
///     ("RELEASE_STORE_FILE", "/keys/rel.jks"),
///     ("RELEASE_STORE_PASSWORD", "secret1"),
///     ("RELEASE_KEY_ALIAS", "relkey"),
///     ("RELEASE_KEY_PASSWORD", "secret2"),
/// ]);
/// assert_eq!(source.resolve().unwrap().key_alias, "relkey");
/// ```
#[derive(Clone, Default)]
pub struct EnvironmentSource {
    values: HashMap<CredentialField, String>,
    base_dir: Option<PathBuf>,
}

impl EnvironmentSource {
    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        let values = ENV_VAR_MAP
            .iter()
            .filter_map(|(field, var)| env::var(var).ok().map(|v| (*field, v)))
            .collect();
        Self { values, base_dir: None }
    }

    /// Build from explicit name/value pairs
    ///
    /// Names other than the four `RELEASE_*` variables are ignored.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = vars
            .into_iter()
            .filter_map(|(name, value)| {
                Self::field_for_var(name.as_ref()).map(|field| (field, value.into()))
            })
            .collect();
        Self { values, base_dir: None }
    }

    /// Anchor a relative keystore path to `dir`
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Get the environment variable name for a field
    pub fn var_for_field(field: CredentialField) -> &'static str {
        ENV_VAR_MAP[&field]
    }

    fn field_for_var(name: &str) -> Option<CredentialField> {
        ENV_VAR_MAP
            .iter()
            .find(|(_, var)| **var == name)
            .map(|(field, _)| *field)
    }

    fn value(&self, field: CredentialField) -> Option<String> {
        self.values.get(&field).filter(|v| !v.is_empty()).cloned()
    }

    fn keystore_path(&self, raw: String) -> PathBuf {
        let keystore = PathBuf::from(raw);
        match &self.base_dir {
            Some(dir) if keystore.is_relative() => dir.join(keystore),
            _ => keystore,
        }
    }
}

impl CredentialSource for EnvironmentSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn describe(&self) -> String {
        format!("environment ({})", ENV_VARS.join(", "))
    }

    fn load(&self) -> SourceResult<PartialCredentials> {
        let partial = PartialCredentials {
            keystore_path: self
                .value(CredentialField::KeystorePath)
                .map(|raw| self.keystore_path(raw)),
            store_password: self.value(CredentialField::StorePassword),
            key_alias: self.value(CredentialField::KeyAlias),
            key_password: self.value(CredentialField::KeyPassword),
        };

        if partial.is_empty() {
            return Err(SourceError::Unavailable(format!(
                "{} not set",
                Self::var_for_field(CredentialField::KeystorePath)
            )));
        }

        Ok(partial)
    }
}

// Values are secrets; only show which variables were captured
impl std::fmt::Debug for EnvironmentSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut captured: Vec<&str> = self
            .values
            .keys()
            .map(|field| Self::var_for_field(*field))
            .collect();
        captured.sort_unstable();
        f.debug_struct("EnvironmentSource")
            .field("captured", &captured)
            .field("base_dir", &self.base_dir)
            .finish()
    }
}
