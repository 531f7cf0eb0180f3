//! Credential resolution and signing plans
//!
//! This module provides the single entry point for turning a priority-ordered
//! list of credential sources into one signing identity per build type.

mod credential_resolver;
mod signing_plan;

pub use credential_resolver::{CredentialResolver, Resolution, SourceAttempt, AttemptOutcome};
pub use signing_plan::{SigningPlan, ReleasePolicy, PlanError};
