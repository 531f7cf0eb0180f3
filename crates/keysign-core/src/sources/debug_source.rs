//! Built-in debug keystore source

use std::path::PathBuf;

use crate::types::{CredentialBundle, PartialCredentials};
use super::traits::{CredentialSource, SourceResult};

/// The well-known Android debug signing identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugCredentials {
    /// Keystore location relative to the user's home directory
    pub keystore_file: &'static str,
    pub store_password: &'static str,
    pub key_alias: &'static str,
    pub key_password: &'static str,
}

/// Single definition of what counts as a debug credential
pub const DEBUG_CREDENTIALS: DebugCredentials = DebugCredentials {
    keystore_file: ".android/debug.keystore",
    store_password: "android",
    key_alias: "androiddebugkey",
    key_password: "android",
};

/// Always-present fallback that never fails
///
/// The keystore lives under the user's home directory; without one the path
/// stays relative (`.android/debug.keystore`) so the bundle is still populated.
#[derive(Debug, Clone)]
pub struct DebugDefaultSource {
    home: Option<PathBuf>,
}

impl Default for DebugDefaultSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugDefaultSource {
    /// Use the current user's home directory
    pub fn new() -> Self {
        Self {
            home: dirs::home_dir(),
        }
    }

    /// Use an explicit home directory
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: Some(home.into()),
        }
    }

    pub fn keystore_path(&self) -> PathBuf {
        match &self.home {
            Some(home) => home.join(DEBUG_CREDENTIALS.keystore_file),
            None => PathBuf::from(DEBUG_CREDENTIALS.keystore_file),
        }
    }

    /// The debug bundle, infallibly
    pub fn bundle(&self) -> CredentialBundle {
        CredentialBundle {
            keystore_path: self.keystore_path(),
            store_password: DEBUG_CREDENTIALS.store_password.to_string(),
            key_alias: DEBUG_CREDENTIALS.key_alias.to_string(),
            key_password: DEBUG_CREDENTIALS.key_password.to_string(),
            is_debug_fallback: true,
        }
    }
}

impl CredentialSource for DebugDefaultSource {
    fn name(&self) -> &str {
        "debug"
    }

    fn describe(&self) -> String {
        format!("debug keystore {}", self.keystore_path().display())
    }

    fn is_production(&self) -> bool {
        false
    }

    fn load(&self) -> SourceResult<PartialCredentials> {
        Ok(PartialCredentials::new()
            .with_keystore_path(self.keystore_path())
            .with_store_password(DEBUG_CREDENTIALS.store_password)
            .with_key_alias(DEBUG_CREDENTIALS.key_alias)
            .with_key_password(DEBUG_CREDENTIALS.key_password))
    }
}
