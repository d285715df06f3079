//! Role sources, consulted by the resolver in priority order

use async_trait::async_trait;
use directory::{DirectoryStore, StoreResult};
use shared::{Role, UserId};
use std::sync::Arc;

/// One place a user's role can come from
#[async_trait]
pub trait RoleSource: Send + Sync {
    /// Stable name used in logs, audit entries and resolutions
    fn name(&self) -> &'static str;

    /// Role held by the user in this source, if any
    async fn lookup(&self, user_id: &UserId) -> StoreResult<Option<Role>>;
}

/// Authoritative source: the earliest-created role assignment
pub struct AssignmentSource {
    store: Arc<dyn DirectoryStore>,
}

impl AssignmentSource {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoleSource for AssignmentSource {
    fn name(&self) -> &'static str {
        "role_assignments"
    }

    async fn lookup(&self, user_id: &UserId) -> StoreResult<Option<Role>> {
        let rows = self.store.role_assignments(user_id).await?;

        // Only the earliest row counts; a blank role on it falls through.
        let earliest = rows.into_iter().min_by_key(|a| a.creation_key());
        Ok(earliest.and_then(|a| Role::parse(&a.role)))
    }
}

/// Fallback source: the denormalized role on the profile
pub struct ProfileSource {
    store: Arc<dyn DirectoryStore>,
}

impl ProfileSource {
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl RoleSource for ProfileSource {
    fn name(&self) -> &'static str {
        "profile"
    }

    async fn lookup(&self, user_id: &UserId) -> StoreResult<Option<Role>> {
        let profile = self.store.profile(user_id).await?;
        Ok(profile
            .and_then(|p| p.role)
            .and_then(|raw| Role::parse(&raw)))
    }
}
