//! DashboardSelector - Dashboard variant and UI action composition by role

use crate::authorization_gate::AuthorizationGate;
use serde::{Deserialize, Serialize};
use shared::{Operation, Role};
use std::fmt;

/// Dashboard composition shown to a resolved role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardVariant {
    Analyst,
    ExhibitOfficer,
    CommandingOfficer,
    ChiefOfCyber,
    Administrator,
    Default,
}

impl DashboardVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardVariant::Analyst => "analyst",
            DashboardVariant::ExhibitOfficer => "exhibit-officer",
            DashboardVariant::CommandingOfficer => "commanding-officer",
            DashboardVariant::ChiefOfCyber => "chief-of-cyber",
            DashboardVariant::Administrator => "administrator",
            DashboardVariant::Default => "default",
        }
    }
}

impl fmt::Display for DashboardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Map a role to its dashboard. Total: anything not listed gets `Default`.
pub fn select_dashboard(role: Option<&Role>) -> DashboardVariant {
    match role {
        Some(Role::Analyst) => DashboardVariant::Analyst,
        Some(Role::ExhibitOfficer) => DashboardVariant::ExhibitOfficer,
        Some(Role::OfficerCommandingUnit) => DashboardVariant::CommandingOfficer,
        Some(Role::ChiefOfCyber) => DashboardVariant::ChiefOfCyber,
        Some(Role::Administrator) => DashboardVariant::Administrator,
        Some(Role::Admin) | Some(Role::Unrecognized(_)) | None => DashboardVariant::Default,
    }
}

/// How a UI action's operations combine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Show if the role can perform at least one of the operations
    AnyOf(&'static [Operation]),
    /// Show only if the role can perform all of the operations
    AllOf(&'static [Operation]),
}

impl Requirement {
    pub fn operations(&self) -> &'static [Operation] {
        match *self {
            Requirement::AnyOf(ops) | Requirement::AllOf(ops) => ops,
        }
    }

    /// Evaluate through the gate
    pub fn is_met(&self, gate: &AuthorizationGate, role: Option<&Role>) -> bool {
        match self {
            Requirement::AnyOf(ops) => gate.has_any(role, ops),
            Requirement::AllOf(ops) => gate.has_all(role, ops),
        }
    }
}

/// Role-gated UI actions that dashboards render conditionally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiAction {
    ApproveReport,
    UserManagement,
    AuditTrail,
    OversightPanel,
    StrategicCommand,
    PolicyOverride,
}

impl UiAction {
    pub fn all() -> &'static [UiAction] {
        &[
            UiAction::ApproveReport,
            UiAction::UserManagement,
            UiAction::AuditTrail,
            UiAction::OversightPanel,
            UiAction::StrategicCommand,
            UiAction::PolicyOverride,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UiAction::ApproveReport => "approve-report",
            UiAction::UserManagement => "user-management",
            UiAction::AuditTrail => "audit-trail",
            UiAction::OversightPanel => "oversight-panel",
            UiAction::StrategicCommand => "strategic-command",
            UiAction::PolicyOverride => "policy-override",
        }
    }

    /// Operations required to render this action
    pub fn requirement(&self) -> Requirement {
        use Operation::*;

        match self {
            UiAction::ApproveReport => Requirement::AnyOf(&[ApproveFinalReports]),
            UiAction::UserManagement => Requirement::AnyOf(&[ManageAllUsers]),
            UiAction::AuditTrail => Requirement::AnyOf(&[ViewAuditLogs]),
            UiAction::OversightPanel => Requirement::AnyOf(&[ViewAuditLogs, ViewSystemAnalytics]),
            UiAction::StrategicCommand => {
                Requirement::AllOf(&[ExecuteStrategicDecisions, ManageDepartmentBudget])
            }
            UiAction::PolicyOverride => Requirement::AllOf(&[OverridePolicies, ViewAuditLogs]),
        }
    }
}

impl fmt::Display for UiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Dashboard variant plus the actions visible on it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub variant: DashboardVariant,
    pub actions: Vec<UiAction>,
}

impl DashboardView {
    pub fn shows(&self, action: UiAction) -> bool {
        self.actions.contains(&action)
    }
}

/// Composes dashboards for roles
#[derive(Debug, Clone, Default)]
pub struct DashboardSelector {
    gate: AuthorizationGate,
}

impl DashboardSelector {
    pub fn new(gate: AuthorizationGate) -> Self {
        Self { gate }
    }

    pub fn select(&self, role: Option<&Role>) -> DashboardVariant {
        select_dashboard(role)
    }

    /// Variant plus every action whose requirement the role meets
    pub fn compose(&self, role: Option<&Role>) -> DashboardView {
        let actions = UiAction::all()
            .iter()
            .copied()
            .filter(|action| action.requirement().is_met(&self.gate, role))
            .collect();

        DashboardView {
            variant: select_dashboard(role),
            actions,
        }
    }
}
