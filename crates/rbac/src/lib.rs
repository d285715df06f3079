//! # CaseGuard RBAC
//!
//! Role-Based Access Control for CaseGuard.
//!
//! ## Components
//!
//! - `PermissionTable` - Static role to operation mapping
//! - `AuthorizationGate` - Allow/deny decisions, `has_any` / `has_all`
//! - `DashboardSelector` - Dashboard variant and visible UI actions per role

pub mod authorization_gate;
pub mod dashboard_selector;
pub mod permission_table;

pub use authorization_gate::AuthorizationGate;
pub use dashboard_selector::{
    select_dashboard, DashboardSelector, DashboardVariant, DashboardView, Requirement, UiAction,
};
pub use permission_table::PermissionTable;
