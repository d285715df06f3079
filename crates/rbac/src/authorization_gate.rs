//! AuthorizationGate - Allow/deny decisions for sensitive operations

use crate::permission_table::PermissionTable;
use shared::{AccessDenied, Operation, Role};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Answers whether a role may perform an operation
///
/// The gate knows nothing about the record being acted on; ownership
/// rules belong to the data layer.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    table: Arc<PermissionTable>,
}

impl AuthorizationGate {
    /// Create a gate over a shared table
    pub fn new(table: Arc<PermissionTable>) -> Self {
        Self { table }
    }

    /// The table this gate consults
    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    /// Operations granted to a role
    pub fn permissions_for(&self, role: Option<&Role>) -> BTreeSet<Operation> {
        self.table.permissions_for(role)
    }

    /// Check a single operation
    pub fn is_authorized(&self, role: Option<&Role>, operation: Operation) -> bool {
        self.table.grants(role, operation)
    }

    /// True if at least one operation is authorized
    pub fn has_any(&self, role: Option<&Role>, operations: &[Operation]) -> bool {
        operations.iter().any(|op| self.is_authorized(role, *op))
    }

    /// True only if every operation is authorized
    pub fn has_all(&self, role: Option<&Role>, operations: &[Operation]) -> bool {
        operations.iter().all(|op| self.is_authorized(role, *op))
    }

    /// Enforcing form of `is_authorized`
    pub fn authorize(&self, role: Option<&Role>, operation: Operation) -> Result<(), AccessDenied> {
        if self.is_authorized(role, operation) {
            Ok(())
        } else {
            Err(AccessDenied {
                role: role.cloned(),
                operation,
            })
        }
    }
}

impl Default for AuthorizationGate {
    fn default() -> Self {
        Self::new(Arc::new(PermissionTable::standard()))
    }
}
