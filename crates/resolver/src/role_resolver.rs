//! RoleResolver - Effective role from prioritized sources

use crate::sources::{AssignmentSource, ProfileSource, RoleSource};
use crate::types::{ResolutionStatus, RoleResolution, SourceOutcome};
use audit::AuditLogger;
use directory::DirectoryStore;
use shared::{AccessConfig, Role, UserId};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

/// Role resolver configuration
#[derive(Debug, Clone)]
pub struct RoleResolverConfig {
    /// Bound on one whole resolution
    pub timeout: Duration,
}

impl Default for RoleResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
        }
    }
}

impl From<&AccessConfig> for RoleResolverConfig {
    fn from(config: &AccessConfig) -> Self {
        Self {
            timeout: config.resolver_timeout(),
        }
    }
}

/// Resolves a user's effective role
///
/// Sources are consulted in order and the first one holding a role wins.
/// A failing source is audited and skipped. If the whole walk exceeds the
/// timeout the result is no role at all.
pub struct RoleResolver {
    sources: Vec<Box<dyn RoleSource>>,
    config: RoleResolverConfig,
    audit: Arc<AuditLogger>,
}

impl RoleResolver {
    /// Standard chain: role assignments, then profile
    pub fn new(
        store: Arc<dyn DirectoryStore>,
        audit: Arc<AuditLogger>,
        config: RoleResolverConfig,
    ) -> Self {
        let sources: Vec<Box<dyn RoleSource>> = vec![
            Box::new(AssignmentSource::new(store.clone())),
            Box::new(ProfileSource::new(store)),
        ];
        Self::with_sources(sources, audit, config)
    }

    /// Custom chain, highest priority first
    pub fn with_sources(
        sources: Vec<Box<dyn RoleSource>>,
        audit: Arc<AuditLogger>,
        config: RoleResolverConfig,
    ) -> Self {
        Self {
            sources,
            config,
            audit,
        }
    }

    /// Names of the configured sources, in priority order
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn timeout(&self) -> Duration {
        self.config.timeout
    }

    /// Effective role only
    pub async fn resolve_role(&self, user_id: &UserId) -> Option<Role> {
        self.resolve(user_id).await.role
    }

    /// Effective role with provenance
    pub async fn resolve(&self, user_id: &UserId) -> RoleResolution {
        // Failures seen before a timeout still belong in the result
        let failed: Mutex<Vec<String>> = Mutex::new(Vec::new());

        let walk = tokio::time::timeout(self.config.timeout, self.walk(user_id, &failed)).await;
        let failed_sources = failed
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match walk {
            Ok(found) => {
                let (role, source) = match found {
                    Some((role, source)) => (Some(role), Some(source.to_string())),
                    None => (None, None),
                };
                let status = if role.is_some() {
                    ResolutionStatus::Resolved
                } else {
                    ResolutionStatus::NoRole
                };

                debug!(
                    user_id = %user_id,
                    role = role.as_ref().map(|r| r.as_str()).unwrap_or("none"),
                    source = source.as_deref().unwrap_or("-"),
                    "role resolved"
                );
                self.audit
                    .log_role_resolved(user_id, role.as_ref(), source.as_deref());

                RoleResolution {
                    user_id: user_id.clone(),
                    role,
                    source,
                    status,
                    failed_sources,
                    resolved_at: chrono::Utc::now(),
                }
            }
            Err(_) => {
                warn!(
                    user_id = %user_id,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "role lookup timed out, failing closed"
                );
                self.audit.log_timeout(user_id, self.config.timeout.as_millis());
                RoleResolution::timed_out(user_id.clone(), failed_sources)
            }
        }
    }

    /// Walk the sources in order, stopping at the first role found
    async fn walk(
        &self,
        user_id: &UserId,
        failed: &Mutex<Vec<String>>,
    ) -> Option<(Role, &'static str)> {
        for source in &self.sources {
            let outcome = match source.lookup(user_id).await {
                Ok(Some(role)) => SourceOutcome::Found(role),
                Ok(None) => SourceOutcome::Empty,
                Err(e) => SourceOutcome::Failed(e.to_string()),
            };

            match outcome {
                SourceOutcome::Found(role) => return Some((role, source.name())),
                SourceOutcome::Empty => {
                    debug!(user_id = %user_id, source = source.name(), "no role in source");
                }
                SourceOutcome::Failed(error) => {
                    warn!(
                        user_id = %user_id,
                        source = source.name(),
                        error = %error,
                        "role source failed, falling back"
                    );
                    self.audit.log_source_failure(user_id, source.name(), &error);
                    if let Ok(mut failed) = failed.lock() {
                        failed.push(source.name().to_string());
                    }
                }
            }
        }
        None
    }
}
