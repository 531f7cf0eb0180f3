//! Settings for the signing resolver
//!
//! Settings are optional. Without a settings file the standard chain is used,
//! both build flags are off and debug-signed releases are allowed.
//! - `SigningSettings`: The settings themselves
//! - `FileSettingsProvider`: YAML file-based (workspace level)

mod error;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use file::{FileSettingsProvider, SigningSettings, ReleaseSettings};
