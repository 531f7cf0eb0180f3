//! `local.properties` credential source

use std::fs;
use std::path::{Path, PathBuf};

use crate::properties::Properties;
use crate::types::PartialCredentials;
use super::traits::{CredentialSource, SourceError, SourceResult};

/// Default file name, looked up in the project root
pub const LOCAL_PROPERTIES: &str = "local.properties";

/// Recognized keys: path, store password, key alias, key password
pub const PROPERTY_KEYS: [&str; 4] = [
    "keystore.path",
    "keystore.password",
    "keystore.key_alias",
    "keystore.key_password",
];

/// Reads credentials from a properties file
///
/// A missing file, or a file with none of the `keystore.*` keys, means the
/// source is simply not configured. A file with only some of them is
/// rejected as incomplete. A relative `keystore.path` is resolved against
/// the directory holding the properties file.
///
/// # Example
///
/// ```no_run
/// use keysign_core::sources::{CredentialSource, PropertiesFileSource};
///
/// let source = PropertiesFileSource::in_project("/path/to/project");
/// let bundle = source.resolve();
/// ```
#[derive(Debug, Clone)]
pub struct PropertiesFileSource {
    path: PathBuf,
}

impl PropertiesFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<project_root>/local.properties`
    pub fn in_project(project_root: impl AsRef<Path>) -> Self {
        Self::new(project_root.as_ref().join(LOCAL_PROPERTIES))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn resolve_keystore_path(&self, raw: &str) -> PathBuf {
        let keystore = PathBuf::from(raw);
        if keystore.is_absolute() {
            return keystore;
        }
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(keystore),
            _ => keystore,
        }
    }
}

impl CredentialSource for PropertiesFileSource {
    fn name(&self) -> &str {
        "properties"
    }

    fn describe(&self) -> String {
        format!("properties file {}", self.path.display())
    }

    fn load(&self) -> SourceResult<PartialCredentials> {
        if !self.path.is_file() {
            return Err(SourceError::Unavailable(format!(
                "{} does not exist",
                self.path.display()
            )));
        }

        let content = fs::read_to_string(&self.path)?;
        let props = Properties::parse(&content).map_err(|e| SourceError::Malformed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        let [path_key, password_key, alias_key, key_password_key] = PROPERTY_KEYS;
        let partial = PartialCredentials {
            keystore_path: props
                .get_non_empty(path_key)
                .map(|p| self.resolve_keystore_path(p)),
            store_password: props.get_non_empty(password_key).map(str::to_string),
            key_alias: props.get_non_empty(alias_key).map(str::to_string),
            key_password: props.get_non_empty(key_password_key).map(str::to_string),
        };

        if partial.is_empty() {
            return Err(SourceError::Unavailable(format!(
                "{} has no keystore.* entries",
                self.path.display()
            )));
        }

        Ok(partial)
    }
}
