//! PermissionTable - Static role to operation mapping

use shared::{AccessConfig, ConfigError, Operation, Role};
use std::collections::{BTreeMap, BTreeSet};

/// Immutable mapping from role to the sensitive operations it may perform
///
/// Every known role has an explicit entry, possibly empty. Unrecognized
/// roles are never stored and always resolve to the empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable {
    entries: BTreeMap<Role, BTreeSet<Operation>>,
}

impl PermissionTable {
    /// The standard table shipped with CaseGuard
    pub fn standard() -> Self {
        let entries = Role::known()
            .iter()
            .map(|role| (role.clone(), standard_operations(role).iter().copied().collect()))
            .collect();
        Self { entries }
    }

    /// A table in which every known role has no permissions
    pub fn empty() -> Self {
        let entries = Role::known()
            .iter()
            .map(|role| (role.clone(), BTreeSet::new()))
            .collect();
        Self { entries }
    }

    /// Build the table for a deployment.
    ///
    /// Without a `permissions` section the standard table is used. With one,
    /// roles absent from the section get an empty set, and any role or
    /// operation name that does not parse is rejected.
    pub fn from_config(config: &AccessConfig) -> Result<Self, ConfigError> {
        match &config.permissions {
            None => Ok(Self::standard()),
            Some(section) => Self::from_entries(section),
        }
    }

    /// Build a table from raw `role -> [operation]` entries
    pub fn from_entries(section: &BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut table = Self::empty();
        let mut seen: BTreeMap<Role, &String> = BTreeMap::new();

        for (role_name, operations) in section {
            let role = Role::parse_known(role_name).ok_or_else(|| ConfigError::UnknownRole {
                name: role_name.clone(),
                known_roles: Role::known().iter().map(|r| r.as_str().to_string()).collect(),
            })?;

            // Keys are normalized, so two spellings can name the same role
            if let Some(first) = seen.insert(role.clone(), role_name) {
                return Err(ConfigError::DuplicateRole {
                    role: role.as_str().to_string(),
                    first: first.clone(),
                    second: role_name.clone(),
                });
            }

            let mut granted = BTreeSet::new();
            for name in operations {
                let op = Operation::parse(name).ok_or_else(|| ConfigError::UnknownOperation {
                    role: role_name.clone(),
                    name: name.clone(),
                })?;
                granted.insert(op);
            }

            table.entries.insert(role, granted);
        }

        Ok(table)
    }

    /// Operations granted to a role; empty for unknown roles and for none
    pub fn permissions_for(&self, role: Option<&Role>) -> BTreeSet<Operation> {
        role.and_then(|r| self.entries.get(r))
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a role holds an operation
    pub fn grants(&self, role: Option<&Role>, operation: Operation) -> bool {
        role.and_then(|r| self.entries.get(r))
            .is_some_and(|ops| ops.contains(&operation))
    }

    /// Known roles granted an operation
    pub fn roles_with(&self, operation: Operation) -> Vec<&Role> {
        self.entries
            .iter()
            .filter(|(_, ops)| ops.contains(&operation))
            .map(|(role, _)| role)
            .collect()
    }

    /// All entries, ordered by role
    pub fn entries(&self) -> impl Iterator<Item = (&Role, &BTreeSet<Operation>)> {
        self.entries.iter()
    }
}

impl Default for PermissionTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Standard grants per role. Exhaustive so a new role cannot be added
/// without deciding its permissions.
fn standard_operations(role: &Role) -> &'static [Operation] {
    use Operation::*;

    match role {
        Role::ChiefOfCyber => &[
            ApproveFinalReports,
            ManageAllUsers,
            ViewAuditLogs,
            ViewSystemAnalytics,
            ExecuteStrategicDecisions,
            ManageDepartmentBudget,
            OverridePolicies,
        ],
        Role::OfficerCommandingUnit => &[ApproveFinalReports],
        Role::Administrator => &[ManageAllUsers, ViewAuditLogs, ViewSystemAnalytics, OverridePolicies],
        Role::Admin => &[ManageAllUsers, ViewAuditLogs],
        Role::Analyst => &[],
        Role::ExhibitOfficer => &[],
        Role::Unrecognized(_) => &[],
    }
}
