//! Core trait and error type for credential sources

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{CredentialBundle, CredentialField, PartialCredentials};

/// Reasons a single source did not produce a bundle
///
/// None of these escape the resolver; they decide how loudly a skipped
/// tier is reported.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Nothing to read here (file missing, variables unset)
    #[error("Source not available: {0}")]
    Unavailable(String),

    /// The source exists but could not be parsed
    #[error("Malformed {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    /// Some but not all fields were present
    #[error("{source_name} is incomplete (missing: {})", join_fields(.missing))]
    Incomplete {
        source_name: String,
        missing: Vec<CredentialField>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SourceError {
    /// Whether this is the normal "nothing configured" case
    ///
    /// Expected failures are reported at info level, everything else as a warning.
    pub fn is_expected(&self) -> bool {
        matches!(self, SourceError::Unavailable(_))
    }
}

fn join_fields(fields: &[CredentialField]) -> String {
    fields.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(", ")
}

pub type SourceResult<T> = Result<T, SourceError>;

/// A place signing credentials can come from
///
/// Implementations:
/// - `local.properties` style files (`PropertiesFileSource`)
/// - Release environment variables (`EnvironmentSource`)
/// - The well-known debug keystore (`DebugDefaultSource`)
/// - Fixed values for tests and embedding (`MemorySource`)
///
/// # Example
///
/// ```
/// use keysign_core::sources::{CredentialSource, DebugDefaultSource};
///
/// let source = DebugDefaultSource::new();
/// let bundle = source.resolve().unwrap();
/// assert!(bundle.is_debug_fallback);
/// ```
pub trait CredentialSource: Send + Sync {
    /// Short name of this source, used in diagnostics
    fn name(&self) -> &str;

    /// Human-readable detail, e.g. the file path
    fn describe(&self) -> String {
        self.name().to_string()
    }

    /// Whether credentials from this source are fit for distribution
    fn is_production(&self) -> bool {
        true
    }

    /// Read whatever fields this source holds
    fn load(&self) -> SourceResult<PartialCredentials>;

    /// Read and require a complete bundle
    fn resolve(&self) -> SourceResult<CredentialBundle> {
        self.load()?.complete(self.name(), !self.is_production())
    }
}
