//! Source registry for building the resolution chain by name

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::debug_source::DebugDefaultSource;
use super::env_source::EnvironmentSource;
use super::properties_source::PropertiesFileSource;
use super::traits::CredentialSource;

/// Built-in source kinds that a settings file can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Properties,
    Environment,
    Debug,
}

impl SourceKind {
    /// Default priority order
    pub const DEFAULT_ORDER: [SourceKind; 3] = [
        SourceKind::Properties,
        SourceKind::Environment,
        SourceKind::Debug,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Properties => "properties",
            SourceKind::Environment => "environment",
            SourceKind::Debug => "debug",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SourceKind::Properties => "keystore.* entries in local.properties",
            SourceKind::Environment => "RELEASE_STORE_FILE and related environment variables",
            SourceKind::Debug => "Well-known debug keystore in ~/.android",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "properties" | "local.properties" => Ok(SourceKind::Properties),
            "environment" | "env" => Ok(SourceKind::Environment),
            "debug" => Ok(SourceKind::Debug),
            other => Err(format!("unknown credential source: {}", other)),
        }
    }
}

/// Inputs the built-in sources are created from
///
/// Fields left as `None` fall back to the ambient process state: the
/// process environment and the user's home directory.
#[derive(Debug, Clone, Default)]
pub struct SourceContext {
    /// Project root, where `local.properties` is looked up
    pub project_root: PathBuf,
    /// Explicit properties file, overriding `<project_root>/local.properties`
    pub properties_file: Option<PathBuf>,
    /// Explicit environment snapshot
    pub environment: Option<HashMap<String, String>>,
    /// Explicit home directory for the debug keystore
    pub home_dir: Option<PathBuf>,
}

impl SourceContext {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            ..Self::default()
        }
    }

    pub fn with_properties_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.properties_file = Some(path.into());
        self
    }

    pub fn with_environment(mut self, environment: HashMap<String, String>) -> Self {
        self.environment = Some(environment);
        self
    }

    pub fn with_home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(home.into());
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Properties file path, resolving a relative override against the project root
    pub fn properties_path(&self) -> PathBuf {
        match &self.properties_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => self.project_root.join(path),
            None => PropertiesFileSource::in_project(self.project_root()).path().to_path_buf(),
        }
    }

    pub(crate) fn debug_source(&self) -> DebugDefaultSource {
        match &self.home_dir {
            Some(home) => DebugDefaultSource::with_home(home),
            None => DebugDefaultSource::new(),
        }
    }
}

/// Create a source of the given kind
///
/// # Example
///
/// ```
/// use keysign_core::sources::{create_source, SourceContext, SourceKind};
///
/// let ctx = SourceContext::new("/path/to/project");
/// let source = create_source(SourceKind::Properties, &ctx);
/// assert_eq!(source.name(), "properties");
/// ```
pub fn create_source(kind: SourceKind, ctx: &SourceContext) -> Box<dyn CredentialSource> {
    match kind {
        SourceKind::Properties => Box::new(PropertiesFileSource::new(ctx.properties_path())),
        SourceKind::Environment => {
            let source = match &ctx.environment {
                Some(vars) => EnvironmentSource::from_vars(vars),
                None => EnvironmentSource::from_process(),
            };
            if ctx.project_root().as_os_str().is_empty() {
                Box::new(source)
            } else {
                Box::new(source.with_base_dir(ctx.project_root()))
            }
        }
        SourceKind::Debug => Box::new(ctx.debug_source()),
    }
}

/// List the built-in source kinds
///
/// # Returns
/// A vector of (name, description) tuples, in default priority order
pub fn list_source_kinds() -> Vec<(&'static str, &'static str)> {
    SourceKind::DEFAULT_ORDER
        .iter()
        .map(|kind| (kind.as_str(), kind.description()))
        .collect()
}
