//! Core types for keysign

mod credentials;
mod build;

pub use credentials::{CredentialBundle, PartialCredentials, CredentialField};
pub use build::{BuildType, BuildFlags};
