//! Prioritized signing-credential resolution
//!
//! Checks sources in priority order:
//! 1. `local.properties` (`keystore.*` keys)
//! 2. `RELEASE_*` environment variables
//! 3. Built-in debug keystore
//!
//! The first complete source wins. Failures are logged and never returned.

use std::sync::Arc;

use crate::logging::{ConsoleLogger, SharedLogger};
use crate::sources::{
    create_source, CredentialSource, DebugDefaultSource, SourceContext, SourceError, SourceKind,
};
use crate::types::CredentialBundle;
use crate::{log_debug, log_info, log_warn};

/// What happened when a source was tried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The source produced the bundle
    Resolved,
    /// Nothing configured there
    Unavailable(String),
    /// Present but unusable (malformed, unreadable or incomplete)
    Rejected(String),
}

/// One entry in the resolution trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttempt {
    /// Source name, e.g. `properties`
    pub source: String,
    /// Human-readable detail, e.g. the file path
    pub detail: String,
    pub outcome: AttemptOutcome,
}

/// Result of a resolution pass
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The resolved signing identity
    pub bundle: CredentialBundle,
    /// Name of the source that provided it
    pub source: String,
    /// Every source tried, in order
    pub attempts: Vec<SourceAttempt>,
}

impl Resolution {
    pub fn is_debug_fallback(&self) -> bool {
        self.bundle.is_debug_fallback
    }

    /// Sources that existed but were rejected
    pub fn rejected(&self) -> impl Iterator<Item = &SourceAttempt> {
        self.attempts
            .iter()
            .filter(|a| matches!(a.outcome, AttemptOutcome::Rejected(_)))
    }
}

/// Resolves signing credentials from an ordered list of sources
///
/// `resolve` always returns a usable bundle: when every source fails the
/// built-in debug keystore is used and a warning is logged.
///
/// # Example
///
/// ```no_run
/// use keysign_core::resolver::CredentialResolver;
/// use keysign_core::sources::SourceContext;
///
/// let resolver = CredentialResolver::new();
/// let resolution = resolver.resolve_standard(&SourceContext::new("/path/to/project"));
/// if resolution.is_debug_fallback() {
///     eprintln!("release will be debug-signed");
/// }
/// ```
pub struct CredentialResolver {
    logger: SharedLogger,
    fallback: DebugDefaultSource,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialResolver {
    /// Create a resolver that logs to the console
    pub fn new() -> Self {
        Self::with_logger(Arc::new(ConsoleLogger::new()))
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self {
            logger,
            fallback: DebugDefaultSource::new(),
        }
    }

    /// Replace the debug source used when everything else fails
    pub fn with_fallback(mut self, fallback: DebugDefaultSource) -> Self {
        self.fallback = fallback;
        self
    }

    /// The default chain: properties file, process environment, debug
    pub fn standard_sources(ctx: &SourceContext) -> Vec<Box<dyn CredentialSource>> {
        Self::sources_for(&SourceKind::DEFAULT_ORDER, ctx)
    }

    /// Build sources for the given kinds, in order
    pub fn sources_for(kinds: &[SourceKind], ctx: &SourceContext) -> Vec<Box<dyn CredentialSource>> {
        kinds.iter().map(|kind| create_source(*kind, ctx)).collect()
    }

    /// Build the standard chain for `ctx` and resolve it
    pub fn resolve_standard(&self, ctx: &SourceContext) -> Resolution {
        self.resolve_kinds(&SourceKind::DEFAULT_ORDER, ctx)
    }

    /// Build sources for `kinds` and resolve them, falling back to the context's debug keystore
    pub fn resolve_kinds(&self, kinds: &[SourceKind], ctx: &SourceContext) -> Resolution {
        let sources = Self::sources_for(kinds, ctx);
        self.resolve_with_fallback(&sources, &ctx.debug_source())
    }

    /// Resolve from `sources` in priority order
    pub fn resolve(&self, sources: &[Box<dyn CredentialSource>]) -> Resolution {
        self.resolve_with_fallback(sources, &self.fallback)
    }

    fn resolve_with_fallback(
        &self,
        sources: &[Box<dyn CredentialSource>],
        fallback: &DebugDefaultSource,
    ) -> Resolution {
        let mut attempts = Vec::with_capacity(sources.len() + 1);

        for source in sources {
            let detail = source.describe();
            log_debug!(self.logger, "Checking {}", detail);

            match source.resolve() {
                Ok(bundle) => {
                    attempts.push(SourceAttempt {
                        source: source.name().to_string(),
                        detail: detail.clone(),
                        outcome: AttemptOutcome::Resolved,
                    });
                    if bundle.is_debug_fallback {
                        self.warn_debug_signing(&bundle);
                    } else {
                        log_info!(self.logger, "Using signing credentials from {}", detail);
                    }
                    return Resolution {
                        bundle,
                        source: source.name().to_string(),
                        attempts,
                    };
                }
                Err(err) => {
                    let outcome = self.report_skip(&detail, &err);
                    attempts.push(SourceAttempt {
                        source: source.name().to_string(),
                        detail,
                        outcome,
                    });
                }
            }
        }

        let bundle = fallback.bundle();
        attempts.push(SourceAttempt {
            source: fallback.name().to_string(),
            detail: fallback.describe(),
            outcome: AttemptOutcome::Resolved,
        });
        self.warn_debug_signing(&bundle);

        Resolution {
            bundle,
            source: fallback.name().to_string(),
            attempts,
        }
    }

    fn report_skip(&self, detail: &str, err: &SourceError) -> AttemptOutcome {
        if err.is_expected() {
            log_info!(self.logger, "Skipping {}: {}", detail, err);
            AttemptOutcome::Unavailable(err.to_string())
        } else {
            log_warn!(self.logger, "Skipping {}: {}", detail, err);
            AttemptOutcome::Rejected(err.to_string())
        }
    }

    fn warn_debug_signing(&self, bundle: &CredentialBundle) {
        log_warn!(
            self.logger,
            "No production keystore found; using debug keystore {}. Create a release keystore before publishing.",
            bundle.keystore_path.display()
        );
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("fallback", &self.fallback)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::logging::{LogLevel, MemoryLogger};
    use crate::sources::{EnvironmentSource, MemorySource, PropertiesFileSource, LOCAL_PROPERTIES};
    use crate::types::PartialCredentials;

    const HOME: &str = "/home/dev";

    fn resolver() -> (CredentialResolver, Arc<MemoryLogger>) {
        let logger = Arc::new(MemoryLogger::new());
        let resolver = CredentialResolver::with_logger(logger.clone())
            .with_fallback(DebugDefaultSource::with_home(HOME));
        (resolver, logger)
    }

    fn full(prefix: &str) -> PartialCredentials {
        PartialCredentials::new()
            .with_keystore_path(format!("/keys/{}.jks", prefix))
            .with_store_password(format!("{}-store", prefix))
            .with_key_alias(format!("{}-alias", prefix))
            .with_key_password(format!("{}-key", prefix))
    }

    fn env_vars() -> HashMap<String, String> {
        [
            ("RELEASE_STORE_FILE", "/ci/release.jks"),
            ("RELEASE_STORE_PASSWORD", "envpass"),
            ("RELEASE_KEY_ALIAS", "cikey"),
            ("RELEASE_KEY_PASSWORD", "envkeypass"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn assert_debug_bundle(bundle: &CredentialBundle) {
        assert_eq!(bundle.keystore_path, PathBuf::from("/home/dev/.android/debug.keystore"));
        assert_eq!(bundle.store_password, "android");
        assert_eq!(bundle.key_alias, "androiddebugkey");
        assert_eq!(bundle.key_password, "android");
        assert!(bundle.is_debug_fallback);
    }

    #[test]
    fn test_properties_file_scenario() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LOCAL_PROPERTIES),
            "keystore.path=/keys/rel.jks\nkeystore.password=secret1\nkeystore.key_alias=relkey\nkeystore.key_password=secret2\n",
        )
        .unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(env_vars())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        assert_eq!(resolution.source, "properties");
        assert_eq!(resolution.bundle.keystore_path, PathBuf::from("/keys/rel.jks"));
        assert_eq!(resolution.bundle.store_password, "secret1");
        assert_eq!(resolution.bundle.key_alias, "relkey");
        assert_eq!(resolution.bundle.key_password, "secret2");
        assert!(!resolution.is_debug_fallback());
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_environment_when_no_properties_file() {
        let dir = tempdir().unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(env_vars())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        assert_eq!(resolution.source, "environment");
        assert_eq!(resolution.bundle.keystore_path, PathBuf::from("/ci/release.jks"));
        assert_eq!(resolution.bundle.store_password, "envpass");
        assert_eq!(resolution.bundle.key_alias, "cikey");
        assert_eq!(resolution.bundle.key_password, "envkeypass");
        assert!(!resolution.is_debug_fallback());
        assert!(matches!(resolution.attempts[0].outcome, AttemptOutcome::Unavailable(_)));
        assert!(logger.contains(LogLevel::Info, "Skipping properties file"));
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_nothing_configured_falls_back_to_debug() {
        let dir = tempdir().unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(HashMap::new())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        assert_debug_bundle(&resolution.bundle);
        assert_eq!(resolution.source, "debug");
        assert!(logger.contains(LogLevel::Warn, "No production keystore found"));
        assert_eq!(resolution.rejected().count(), 0);
    }

    #[test]
    fn test_incomplete_properties_not_merged() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LOCAL_PROPERTIES),
            "keystore.path=/keys/rel.jks\nkeystore.password=secret1\nkeystore.key_password=secret2\n",
        )
        .unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(env_vars())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        // Every field comes from the environment, none from the file
        assert_eq!(resolution.source, "environment");
        assert_eq!(resolution.bundle.keystore_path, PathBuf::from("/ci/release.jks"));
        assert_eq!(resolution.bundle.store_password, "envpass");
        assert_eq!(resolution.bundle.key_alias, "cikey");
        assert_eq!(resolution.rejected().count(), 1);
        assert!(logger.contains(LogLevel::Warn, "missing: key_alias"));
    }

    #[test]
    fn test_malformed_properties_falls_through() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOCAL_PROPERTIES), "keystore.path=/keys/\\uZZZZ.jks\n").unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(HashMap::new())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        assert_debug_bundle(&resolution.bundle);
        assert!(logger.contains(LogLevel::Warn, "Malformed"));
        assert!(logger.contains(LogLevel::Warn, "No production keystore found"));
    }

    #[test]
    fn test_unrelated_properties_lines_keep_production_source() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LOCAL_PROPERTIES),
            "sdk.dir=/opt/sdk\nflutter.versionName 1.0.0\nsome.flag\n\
             keystore.path=/keys/rel.jks\nkeystore.password=secret1\n\
             keystore.key_alias=relkey\nkeystore.key_password=secret2\n",
        )
        .unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(HashMap::new())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        assert_eq!(resolution.source, "properties");
        assert_eq!(resolution.bundle.key_alias, "relkey");
        assert!(!resolution.is_debug_fallback());
        assert!(logger.warnings().is_empty());
    }

    #[test]
    fn test_unreadable_properties_falls_through() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(LOCAL_PROPERTIES), b"keystore.path=\xff\xfe\n").unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(env_vars())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        match &resolution.attempts[0].outcome {
            AttemptOutcome::Rejected(reason) => assert!(reason.starts_with("IO error")),
            other => panic!("expected Rejected, got {:?}", other),
        }
        assert!(logger.contains(LogLevel::Warn, "IO error"));
        assert_eq!(resolution.source, "environment");
        assert!(!resolution.is_debug_fallback());
    }

    #[test]
    fn test_partial_environment_falls_back() {
        let dir = tempdir().unwrap();
        let mut vars = env_vars();
        vars.remove("RELEASE_KEY_PASSWORD");
        let ctx = SourceContext::new(dir.path())
            .with_environment(vars)
            .with_home_dir(HOME);

        let (resolver, _) = resolver();
        let resolution = resolver.resolve_standard(&ctx);

        assert_debug_bundle(&resolution.bundle);
        let rejected: Vec<_> = resolution.rejected().map(|a| a.source.as_str()).collect();
        assert_eq!(rejected, vec!["environment"]);
    }

    #[test]
    fn test_first_source_wins() {
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(MemorySource::new("first", full("a"))),
            Box::new(MemorySource::new("second", full("b"))),
        ];

        let (resolver, _) = resolver();
        let resolution = resolver.resolve(&sources);

        assert_eq!(resolution.source, "first");
        assert_eq!(resolution.bundle.key_alias, "a-alias");
        assert_eq!(resolution.attempts.len(), 1);
    }

    #[test]
    fn test_empty_source_list() {
        let (resolver, logger) = resolver();
        let resolution = resolver.resolve(&[]);

        assert_debug_bundle(&resolution.bundle);
        assert_eq!(resolution.attempts.len(), 1);
        assert_eq!(logger.warnings().len(), 1);
    }

    #[test]
    fn test_explicit_debug_first_is_marked_fallback() {
        let sources: Vec<Box<dyn CredentialSource>> = vec![
            Box::new(DebugDefaultSource::with_home(HOME)),
            Box::new(MemorySource::new("prod", full("p"))),
        ];

        let (resolver, logger) = resolver();
        let resolution = resolver.resolve(&sources);

        assert_debug_bundle(&resolution.bundle);
        assert!(logger.contains(LogLevel::Warn, "No production keystore found"));
    }

    #[test]
    fn test_totality_over_orderings() {
        let dir = tempdir().unwrap();
        let make = |i: usize| -> Box<dyn CredentialSource> {
            match i {
                0 => Box::new(PropertiesFileSource::in_project(dir.path())),
                1 => Box::new(EnvironmentSource::from_vars(env_vars())),
                2 => Box::new(DebugDefaultSource::with_home(HOME)),
                3 => Box::new(MemorySource::new("partial", PartialCredentials::new().with_key_alias("x"))),
                _ => Box::new(MemorySource::empty("empty")),
            }
        };
        let orderings: [&[usize]; 6] = [
            &[0, 1, 2, 3, 4],
            &[4, 3, 2, 1, 0],
            &[3, 0, 4],
            &[2],
            &[1, 3],
            &[],
        ];

        let (resolver, _) = resolver();
        for order in orderings {
            let sources: Vec<_> = order.iter().map(|i| make(*i)).collect();
            let bundle = resolver.resolve(&sources).bundle;
            assert!(!bundle.keystore_path.as_os_str().is_empty());
            assert!(!bundle.store_password.is_empty());
            assert!(!bundle.key_alias.is_empty());
            assert!(!bundle.key_password.is_empty());
        }
    }

    #[test]
    fn test_secrets_never_logged() {
        let dir = tempdir().unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(env_vars())
            .with_home_dir(HOME);

        let (resolver, logger) = resolver();
        resolver.resolve_standard(&ctx);

        for (_, message) in logger.records() {
            assert!(!message.contains("envpass"));
            assert!(!message.contains("envkeypass"));
        }
    }

    #[test]
    fn test_resolve_kinds_custom_order() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(LOCAL_PROPERTIES),
            "keystore.path=/keys/rel.jks\nkeystore.password=secret1\nkeystore.key_alias=relkey\nkeystore.key_password=secret2\n",
        )
        .unwrap();
        let ctx = SourceContext::new(dir.path())
            .with_environment(env_vars())
            .with_home_dir(HOME);

        let (resolver, _) = resolver();
        let resolution = resolver.resolve_kinds(&[SourceKind::Environment, SourceKind::Properties], &ctx);
        assert_eq!(resolution.source, "environment");
    }
}
