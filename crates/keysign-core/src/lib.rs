//! keysign Core
//!
//! Resolution of signing credentials for release builds.
//! Sources are tried in priority order and the first complete one wins:
//! - `keystore.*` entries in `local.properties`
//! - `RELEASE_STORE_FILE`, `RELEASE_STORE_PASSWORD`, `RELEASE_KEY_ALIAS`, `RELEASE_KEY_PASSWORD`
//! - The well-known debug keystore, with a warning
//!
//! Resolution never fails; a missing or broken source only moves on to the
//! next one. Whether a debug-signed release is acceptable is a separate,
//! opt-in check on the resulting [`SigningPlan`].
//!
//! ```rust,no_run
//! use keysign_core::{CredentialResolver, FileSettingsProvider, BuildType};
//!
//! let root = "/path/to/project";
//! let settings = FileSettingsProvider::workspace(root).load()?;
//! let plan = settings.plan(&CredentialResolver::new(), &settings.source_context(root));
//!
//! plan.check_release(settings.release.policy)?;
//! let release = plan.signing_for(BuildType::Release);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod types;
pub mod properties;
pub mod sources;
pub mod logging;
pub mod config;
pub mod resolver;

// Re-export commonly used types
pub use types::{CredentialBundle, PartialCredentials, CredentialField, BuildType, BuildFlags};

pub use sources::{
    CredentialSource, SourceError, SourceResult,
    PropertiesFileSource, EnvironmentSource, DebugDefaultSource, MemorySource,
    SourceContext, SourceKind, DEBUG_CREDENTIALS,
};

pub use logging::{Logger, LogLevel, NoOpLogger, ConsoleLogger, MemoryLogger};

pub use config::{FileSettingsProvider, SigningSettings, ConfigError, ConfigResult};

pub use resolver::{
    CredentialResolver, Resolution, SourceAttempt, AttemptOutcome,
    SigningPlan, ReleasePolicy, PlanError,
};
