//! In-memory credential source

use crate::types::PartialCredentials;
use super::traits::{CredentialSource, SourceError, SourceResult};

/// Fixed credentials held in memory
///
/// Useful in tests and for callers that already hold the values (for
/// example, fetched from a secret manager) but still want the resolver's
/// fallback and diagnostics.
///
/// # Example
///
/// ```
/// use keysign_core::sources::{CredentialSource, MemorySource};
/// use keysign_core::types::PartialCredentials;
///
/// let source = MemorySource::new(
///     "vault",
///     PartialCredentials::new()
///         .with_keystore_path("/keys/rel.jks")
///         .with_store_password("a")
///         .with_key_alias("b")
///         .with_key_password("c"),
/// );
/// assert!(source.resolve().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MemorySource {
    name: String,
    credentials: PartialCredentials,
    production: bool,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, credentials: PartialCredentials) -> Self {
        Self {
            name: name.into(),
            credentials,
            production: true,
        }
    }

    /// A memory source that holds nothing
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, PartialCredentials::new())
    }

    /// Mark values from this source as non-production
    pub fn non_production(mut self) -> Self {
        self.production = false;
        self
    }
}

impl CredentialSource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_production(&self) -> bool {
        self.production
    }

    fn load(&self) -> SourceResult<PartialCredentials> {
        if self.credentials.is_empty() {
            return Err(SourceError::Unavailable(format!("{} holds no credentials", self.name)));
        }
        Ok(self.credentials.clone())
    }
}
