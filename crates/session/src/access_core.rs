//! AccessCore - Process-wide access control wiring

use crate::access_context::AccessContext;
use audit::AuditLogger;
use directory::DirectoryStore;
use rbac::{AuthorizationGate, DashboardSelector, PermissionTable};
use resolver::{RoleResolution, RoleResolver, RoleResolverConfig};
use shared::{AccessConfig, Role, UserId};
use std::sync::Arc;
use tracing::info;

/// Shared by every session of a process
///
/// Holds the permission table (loaded once, never mutated), the resolver
/// over the directory, and the audit trail.
pub struct AccessCore {
    /// Permission table
    table: Arc<PermissionTable>,
    /// Authorization gate over `table`
    gate: AuthorizationGate,
    /// Dashboard selector over `gate`
    selector: DashboardSelector,
    /// Role resolver
    resolver: RoleResolver,
    /// Audit logger
    audit: Arc<AuditLogger>,
}

impl AccessCore {
    /// Create from an already built table
    pub fn new(table: PermissionTable, store: Arc<dyn DirectoryStore>, config: &AccessConfig) -> Self {
        let table = Arc::new(table);
        let gate = AuthorizationGate::new(table.clone());
        let audit = Arc::new(AuditLogger::new(config.audit_capacity));
        let resolver = RoleResolver::new(store, audit.clone(), RoleResolverConfig::from(config));

        Self {
            table,
            selector: DashboardSelector::new(gate.clone()),
            gate,
            resolver,
            audit,
        }
    }

    /// Create from configuration, building the permission table it names
    pub fn from_config(config: &AccessConfig, store: Arc<dyn DirectoryStore>) -> shared::Result<Self> {
        let table = PermissionTable::from_config(config)?;
        info!(
            backend = store.backend_name(),
            custom_table = config.permissions.is_some(),
            timeout_ms = config.resolver_timeout_ms,
            "access core ready"
        );
        Ok(Self::new(table, store, config))
    }

    pub fn table(&self) -> &Arc<PermissionTable> {
        &self.table
    }

    pub fn gate(&self) -> &AuthorizationGate {
        &self.gate
    }

    pub fn selector(&self) -> &DashboardSelector {
        &self.selector
    }

    pub fn resolver(&self) -> &RoleResolver {
        &self.resolver
    }

    pub fn audit(&self) -> &Arc<AuditLogger> {
        &self.audit
    }

    /// Effective role for a user
    pub async fn resolve_role(&self, user_id: &UserId) -> Option<Role> {
        self.resolver.resolve_role(user_id).await
    }

    /// Effective role with provenance
    pub async fn resolve(&self, user_id: &UserId) -> RoleResolution {
        self.resolver.resolve(user_id).await
    }

    /// Build a context for a known role
    pub fn context_for(&self, user_id: Option<UserId>, role: Option<Role>) -> AccessContext {
        let dashboard = self.selector.compose(role.as_ref());
        AccessContext::new(user_id, role, dashboard, self.gate.clone(), self.audit.clone())
    }

    /// Context for a session with nobody signed in
    pub fn anonymous(&self) -> AccessContext {
        self.context_for(None, None)
    }
}
