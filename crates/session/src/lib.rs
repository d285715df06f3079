//! # CaseGuard Session
//!
//! Wires the permission table, resolver and audit trail together and keeps
//! one `AccessContext` per signed-in session.

mod access_context;
mod access_core;
mod session_authority;

pub use access_context::AccessContext;
pub use access_core::AccessCore;
pub use session_authority::{IdentityEvent, SessionAuthority};

// Re-export dependencies
pub use audit::{AuditLogger, AuditStats};
pub use rbac::{AuthorizationGate, DashboardVariant, DashboardView, PermissionTable, UiAction};
pub use resolver::{RoleResolution, RoleResolver};
