//! Role and sensitive operation types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Organizational role that decides which operations and panels a user sees
///
/// Role strings coming from directory records are loosely typed. Anything
/// that does not match a known role is kept as `Unrecognized` so it can be
/// audited; it never carries permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Forensic analyst working assigned exhibits
    Analyst,

    /// Officer logging exhibits and maintaining chain of custody
    ExhibitOfficer,

    /// Officer commanding the unit; signs off final reports
    OfficerCommandingUnit,

    /// Head of the cyber division
    ChiefOfCyber,

    /// System administrator
    Administrator,

    /// Legacy account administrator, configured independently of `Administrator`
    Admin,

    /// Role string that matches no known role
    Unrecognized(String),
}

static KNOWN_ROLES: [Role; 6] = [
    Role::Analyst,
    Role::ExhibitOfficer,
    Role::OfficerCommandingUnit,
    Role::ChiefOfCyber,
    Role::Administrator,
    Role::Admin,
];

impl Role {
    /// Parse a role string from a directory record.
    ///
    /// Matching is case-insensitive and treats `-` and spaces like `_`.
    /// Blank input yields `None`; any other unknown input yields
    /// `Role::Unrecognized` holding the trimmed original text.
    pub fn parse(raw: &str) -> Option<Role> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(Self::parse_known(trimmed).unwrap_or_else(|| Role::Unrecognized(trimmed.to_string())))
    }

    /// Parse a role string, accepting only known roles
    pub fn parse_known(raw: &str) -> Option<Role> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        KNOWN_ROLES.iter().find(|r| r.as_str() == normalized).cloned()
    }

    /// Canonical identifier of this role
    pub fn as_str(&self) -> &str {
        match self {
            Role::Analyst => "analyst",
            Role::ExhibitOfficer => "exhibit_officer",
            Role::OfficerCommandingUnit => "officer_commanding_unit",
            Role::ChiefOfCyber => "chief_of_cyber",
            Role::Administrator => "administrator",
            Role::Admin => "admin",
            Role::Unrecognized(raw) => raw,
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &str {
        match self {
            Role::Analyst => "Analyst",
            Role::ExhibitOfficer => "Exhibit Officer",
            Role::OfficerCommandingUnit => "Officer Commanding Unit",
            Role::ChiefOfCyber => "Chief of Cyber",
            Role::Administrator => "Administrator",
            Role::Admin => "Admin",
            Role::Unrecognized(raw) => raw,
        }
    }

    /// Whether this is one of the known roles
    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unrecognized(_))
    }

    /// All known roles, in declaration order
    pub fn known() -> &'static [Role] {
        &KNOWN_ROLES
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).ok_or_else(|| serde::de::Error::custom("role must not be blank"))
    }
}

/// Capability gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    ApproveFinalReports,
    ManageAllUsers,
    ViewAuditLogs,
    ViewSystemAnalytics,
    ExecuteStrategicDecisions,
    ManageDepartmentBudget,
    OverridePolicies,
}

impl Operation {
    /// Parse an operation tag; accepts kebab-case or snake_case
    pub fn parse(raw: &str) -> Option<Operation> {
        let normalized = raw.trim().to_ascii_lowercase().replace('_', "-");
        Self::all().iter().copied().find(|op| op.as_str() == normalized)
    }

    /// Canonical tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ApproveFinalReports => "approve-final-reports",
            Operation::ManageAllUsers => "manage-all-users",
            Operation::ViewAuditLogs => "view-audit-logs",
            Operation::ViewSystemAnalytics => "view-system-analytics",
            Operation::ExecuteStrategicDecisions => "execute-strategic-decisions",
            Operation::ManageDepartmentBudget => "manage-department-budget",
            Operation::OverridePolicies => "override-policies",
        }
    }

    /// Short description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Operation::ApproveFinalReports => "Approve final forensic reports for release",
            Operation::ManageAllUsers => "Create, edit and deactivate any user account",
            Operation::ViewAuditLogs => "Read the system audit trail",
            Operation::ViewSystemAnalytics => "View unit-wide case and workload analytics",
            Operation::ExecuteStrategicDecisions => "Record strategic decisions for the division",
            Operation::ManageDepartmentBudget => "Allocate and adjust the department budget",
            Operation::OverridePolicies => "Override unit policies on a case",
        }
    }

    /// All operations, in declaration order
    pub fn all() -> &'static [Operation] {
        &[
            Operation::ApproveFinalReports,
            Operation::ManageAllUsers,
            Operation::ViewAuditLogs,
            Operation::ViewSystemAnalytics,
            Operation::ExecuteStrategicDecisions,
            Operation::ManageDepartmentBudget,
            Operation::OverridePolicies,
        ]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
