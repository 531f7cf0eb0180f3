//! File-based settings (YAML)
//!
//! Lives at `<project_root>/.config/keysign/config.yaml`:
//!
//! ```yaml
//! sources: [properties, environment]
//! properties_file: signing/release.properties
//! build:
//!   minify_enabled: true
//!   shrink_resources: true
//! release:
//!   policy: require_production
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolver::{CredentialResolver, ReleasePolicy, SigningPlan};
use crate::sources::{SourceContext, SourceKind};
use crate::types::BuildFlags;
use super::error::{ConfigError, ConfigResult};

/// Release signing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReleaseSettings {
    #[serde(default)]
    pub policy: ReleasePolicy,
}

/// Settings file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningSettings {
    /// Source priority order; the debug keystore is always the last resort
    pub sources: Vec<SourceKind>,

    /// Properties file, relative to the project root unless absolute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties_file: Option<PathBuf>,

    /// Flags passed through to the packaging step
    pub build: BuildFlags,

    pub release: ReleaseSettings,
}

impl Default for SigningSettings {
    fn default() -> Self {
        Self {
            sources: SourceKind::DEFAULT_ORDER.to_vec(),
            properties_file: None,
            build: BuildFlags::default(),
            release: ReleaseSettings::default(),
        }
    }
}

impl SigningSettings {
    /// Reject source lists that name a tier twice
    pub fn validate(&self) -> ConfigResult<()> {
        let mut seen = HashSet::new();
        for kind in &self.sources {
            if !seen.insert(*kind) {
                return Err(ConfigError::Invalid(format!("source '{}' listed more than once", kind)));
            }
        }
        Ok(())
    }

    /// Source context for a project, honoring `properties_file`
    pub fn source_context(&self, project_root: impl Into<PathBuf>) -> SourceContext {
        let ctx = SourceContext::new(project_root);
        match &self.properties_file {
            Some(path) => ctx.with_properties_file(path),
            None => ctx,
        }
    }

    /// Resolve the release identity and assemble the signing plan
    pub fn plan(&self, resolver: &CredentialResolver, ctx: &SourceContext) -> SigningPlan {
        let release = resolver.resolve_kinds(&self.sources, ctx);
        SigningPlan::new(release, ctx.debug_source().bundle(), self.build)
    }
}

/// File-based settings provider
///
/// # Example
///
/// ```no_run
/// use keysign_core::config::FileSettingsProvider;
///
/// let provider = FileSettingsProvider::workspace("/path/to/project");
/// let settings = provider.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileSettingsProvider {
    path: PathBuf,
}

impl FileSettingsProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Workspace-level settings (`.config/keysign/config.yaml`)
    pub fn workspace(project_root: impl AsRef<Path>) -> Self {
        let path = project_root.as_ref().join(".config").join("keysign").join("config.yaml");
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load settings, returning defaults when the file does not exist
    pub fn load(&self) -> ConfigResult<SigningSettings> {
        if !self.path.exists() {
            return Ok(SigningSettings::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(SigningSettings::default());
        }

        let settings: SigningSettings = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        settings.validate()?;

        Ok(settings)
    }

    /// Save settings to file
    pub fn save(&self, settings: &SigningSettings) -> ConfigResult<()> {
        settings.validate()?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(settings)
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}
