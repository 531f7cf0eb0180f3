//! Credential source abstractions and implementations
//!
//! This module provides the tiers the resolver walks through:
//! - `CredentialSource` trait for implementing custom sources
//! - Built-in implementations: `PropertiesFileSource`, `EnvironmentSource`, `DebugDefaultSource`, `MemorySource`
//! - A registry for creating sources by kind (used by the settings file)

mod traits;
mod properties_source;
mod env_source;
mod debug_source;
mod memory_source;
mod registry;

pub use traits::{CredentialSource, SourceError, SourceResult};
pub use properties_source::{PropertiesFileSource, LOCAL_PROPERTIES, PROPERTY_KEYS};
pub use env_source::{EnvironmentSource, ENV_VARS};
pub use debug_source::{DebugDefaultSource, DebugCredentials, DEBUG_CREDENTIALS};
pub use memory_source::MemorySource;
pub use registry::{create_source, list_source_kinds, SourceContext, SourceKind};
