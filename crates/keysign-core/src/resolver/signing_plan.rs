//! Which signing identity each build type receives

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{BuildFlags, BuildType, CredentialBundle};
use super::credential_resolver::Resolution;

/// What to do when a release would be signed with the debug keystore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Proceed; resolution already logged a warning
    #[default]
    AllowDebugFallback,
    /// Refuse to hand out a debug-signed release
    RequireProduction,
}

/// Errors from checking or exporting a signing plan
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Release build would be signed with the debug keystore {keystore} (no production source found)")]
    DebugSignedRelease { keystore: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Signing identities for every build type plus the pass-through flags
///
/// Debug builds always use the debug keystore. Release builds use whatever
/// the resolver found, so a configured production keystore actually signs
/// the release artifact.
#[derive(Debug, Clone, Serialize)]
pub struct SigningPlan {
    debug: CredentialBundle,
    release: CredentialBundle,
    release_source: String,
    flags: BuildFlags,
}

impl SigningPlan {
    /// Build a plan from a release resolution and the debug identity
    pub fn new(release: Resolution, debug: CredentialBundle, flags: BuildFlags) -> Self {
        Self {
            debug,
            release: release.bundle,
            release_source: release.source,
            flags,
        }
    }

    /// The bundle a build of `build_type` must be signed with
    pub fn signing_for(&self, build_type: BuildType) -> &CredentialBundle {
        match build_type {
            BuildType::Debug => &self.debug,
            BuildType::Release => &self.release,
        }
    }

    /// Name of the source the release identity came from
    pub fn release_source(&self) -> &str {
        &self.release_source
    }

    pub fn flags(&self) -> BuildFlags {
        self.flags
    }

    /// Gate the release identity against `policy`
    pub fn check_release(&self, policy: ReleasePolicy) -> Result<(), PlanError> {
        match policy {
            ReleasePolicy::RequireProduction if self.release.is_debug_fallback => {
                Err(PlanError::DebugSignedRelease {
                    keystore: self.release.keystore_path.display().to_string(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Serialize for the external signer
    ///
    /// The output contains passwords; write it only where the signer reads it.
    pub fn to_json(&self) -> Result<String, PlanError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
