//! DirectoryStore - Abstract read access to profiles and role assignments
//!
//! The directory is the system of record for both. How it is stored is not
//! this crate's concern; the resolver only needs a point lookup and an
//! ordered range query.

use async_trait::async_trait;
use shared::{Profile, RoleAssignment, UserId};
use thiserror::Error;

/// Errors a directory backend can report
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("directory unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read port consumed by role sources
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Profile for a user, if provisioned
    async fn profile(&self, user_id: &UserId) -> StoreResult<Option<Profile>>;

    /// Role assignments for a user ordered by creation, earliest first
    async fn role_assignments(&self, user_id: &UserId) -> StoreResult<Vec<RoleAssignment>>;

    async fn health_check(&self) -> StoreResult<()>;

    fn backend_name(&self) -> &'static str;
}
