//! AccessContext - What one session may see and do

use audit::AuditLogger;
use rbac::{AuthorizationGate, DashboardView, UiAction};
use shared::{AccessDenied, Operation, Role, UserId};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::warn;

/// Access state for a single session
///
/// Produced by `SessionAuthority` and passed explicitly to whatever needs
/// to make access decisions. A context with no role denies everything.
#[derive(Debug, Clone)]
pub struct AccessContext {
    user_id: Option<UserId>,
    role: Option<Role>,
    dashboard: DashboardView,
    gate: AuthorizationGate,
    audit: Arc<AuditLogger>,
}

impl AccessContext {
    pub(crate) fn new(
        user_id: Option<UserId>,
        role: Option<Role>,
        dashboard: DashboardView,
        gate: AuthorizationGate,
        audit: Arc<AuditLogger>,
    ) -> Self {
        Self {
            user_id,
            role,
            dashboard,
            gate,
            audit,
        }
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    pub fn dashboard(&self) -> &DashboardView {
        &self.dashboard
    }

    pub fn is_signed_in(&self) -> bool {
        self.user_id.is_some()
    }

    /// Operations this session's role is granted
    pub fn permissions(&self) -> BTreeSet<Operation> {
        self.gate.permissions_for(self.role())
    }

    pub fn is_authorized(&self, operation: Operation) -> bool {
        self.gate.is_authorized(self.role(), operation)
    }

    pub fn has_any(&self, operations: &[Operation]) -> bool {
        self.gate.has_any(self.role(), operations)
    }

    pub fn has_all(&self, operations: &[Operation]) -> bool {
        self.gate.has_all(self.role(), operations)
    }

    /// Whether the dashboard offers a UI action
    pub fn shows(&self, action: UiAction) -> bool {
        self.dashboard.shows(action)
    }

    /// Check an operation and record the decision in the audit trail
    pub fn authorize(&self, operation: Operation) -> Result<(), AccessDenied> {
        let result = self.gate.authorize(self.role(), operation);
        self.audit
            .log_authorization(self.user_id(), self.role(), operation, result.is_ok());

        if let Err(denied) = &result {
            warn!(
                user_id = self.user_id.as_ref().map(|u| u.as_str()).unwrap_or("-"),
                role = denied.role_label(),
                operation = %operation,
                "operation denied"
            );
        }
        result
    }
}
