//! In-Memory Directory
//!
//! Thread-safe in-memory `DirectoryStore`. Used by the CLI with JSON
//! fixtures and by tests.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use shared::{Profile, RoleAssignment, UserId};

use crate::store::{DirectoryStore, StoreError, StoreResult};

/// Fixture file format for seeding an in-memory directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryFixture {
    #[serde(default)]
    pub profiles: Vec<Profile>,

    #[serde(default)]
    pub role_assignments: Vec<RoleAssignment>,
}

impl DirectoryFixture {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let fixture: Self = serde_json::from_str(&content)?;
        Ok(fixture)
    }
}

#[derive(Debug, Default)]
struct DirectoryState {
    profiles: HashMap<UserId, Profile>,
    assignments: Vec<RoleAssignment>,
    next_sequence: u64,
}

/// In-memory directory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a fixture. Assignments keep their file order as creation order.
    pub fn from_fixture(fixture: DirectoryFixture) -> StoreResult<Self> {
        let directory = Self::new();
        for profile in fixture.profiles {
            directory.upsert_profile(profile)?;
        }
        for assignment in fixture.role_assignments {
            directory.insert_assignment(assignment)?;
        }
        Ok(directory)
    }

    /// Load a JSON fixture file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let fixture = DirectoryFixture::from_file(path)?;
        let directory = Self::from_fixture(fixture)?;
        tracing::debug!(path = %path.display(), "loaded directory fixture");
        Ok(directory)
    }

    /// Create or replace a profile
    pub fn upsert_profile(&self, profile: Profile) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| {
            StoreError::Unavailable("Failed to acquire write lock".to_string())
        })?;
        state.profiles.insert(profile.user_id.clone(), profile);
        Ok(())
    }

    /// Record a role assignment; the store stamps its creation order
    pub fn insert_assignment(&self, mut assignment: RoleAssignment) -> StoreResult<RoleAssignment> {
        let mut state = self.state.write().map_err(|_| {
            StoreError::Unavailable("Failed to acquire write lock".to_string())
        })?;
        state.next_sequence += 1;
        assignment.sequence = state.next_sequence;
        state.assignments.push(assignment.clone());
        Ok(assignment)
    }

    /// Remove every assignment for a user
    pub fn revoke_assignments(&self, user_id: &UserId) -> StoreResult<usize> {
        let mut state = self.state.write().map_err(|_| {
            StoreError::Unavailable("Failed to acquire write lock".to_string())
        })?;
        let before = state.assignments.len();
        state.assignments.retain(|a| &a.user_id != user_id);
        Ok(before - state.assignments.len())
    }

    pub fn profile_count(&self) -> StoreResult<usize> {
        let state = self.state.read().map_err(|_| {
            StoreError::Unavailable("Failed to acquire read lock".to_string())
        })?;
        Ok(state.profiles.len())
    }
}

#[async_trait]
impl DirectoryStore for InMemoryDirectory {
    async fn profile(&self, user_id: &UserId) -> StoreResult<Option<Profile>> {
        let state = self.state.read().map_err(|_| {
            StoreError::Unavailable("Failed to acquire read lock".to_string())
        })?;
        Ok(state.profiles.get(user_id).cloned())
    }

    async fn role_assignments(&self, user_id: &UserId) -> StoreResult<Vec<RoleAssignment>> {
        let state = self.state.read().map_err(|_| {
            StoreError::Unavailable("Failed to acquire read lock".to_string())
        })?;
        let mut rows: Vec<RoleAssignment> = state
            .assignments
            .iter()
            .filter(|a| &a.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|a| a.creation_key());
        Ok(rows)
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.state
            .read()
            .map(|_| ())
            .map_err(|_| StoreError::Unavailable("directory lock poisoned".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn at(hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_profile_lookup() {
        let directory = InMemoryDirectory::new();
        let user = UserId::new("u-1");
        directory
            .upsert_profile(Profile::new(user.clone(), "Dana Reyes").with_role("analyst"))
            .unwrap();

        let profile = directory.profile(&user).await.unwrap().unwrap();
        assert_eq!(profile.role.as_deref(), Some("analyst"));
        assert!(directory.profile(&UserId::new("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_assignments_ordered_by_creation_time() {
        let directory = InMemoryDirectory::new();
        let user = UserId::new("u-1");

        directory
            .insert_assignment(RoleAssignment::new(user.clone(), "administrator", at(12)))
            .unwrap();
        directory
            .insert_assignment(RoleAssignment::new(user.clone(), "analyst", at(9)))
            .unwrap();

        let rows = directory.role_assignments(&user).await.unwrap();
        let roles: Vec<&str> = rows.iter().map(|a| a.role.as_str()).collect();
        assert_eq!(roles, vec!["analyst", "administrator"]);
    }

    #[tokio::test]
    async fn test_equal_timestamps_keep_insertion_order() {
        let directory = InMemoryDirectory::new();
        let user = UserId::new("u-1");

        directory
            .insert_assignment(RoleAssignment::new(user.clone(), "exhibit_officer", at(9)))
            .unwrap();
        directory
            .insert_assignment(RoleAssignment::new(user.clone(), "chief_of_cyber", at(9)))
            .unwrap();

        let rows = directory.role_assignments(&user).await.unwrap();
        assert_eq!(rows[0].role, "exhibit_officer");
        assert!(rows[0].sequence < rows[1].sequence);
    }

    #[tokio::test]
    async fn test_assignments_are_scoped_to_user() {
        let directory = InMemoryDirectory::new();
        directory
            .insert_assignment(RoleAssignment::new(UserId::new("a"), "analyst", at(1)))
            .unwrap();
        directory
            .insert_assignment(RoleAssignment::new(UserId::new("b"), "admin", at(1)))
            .unwrap();

        let rows = directory.role_assignments(&UserId::new("a")).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].role, "analyst");
    }

    #[tokio::test]
    async fn test_revoke_assignments() {
        let directory = InMemoryDirectory::new();
        let user = UserId::new("u-1");
        directory
            .insert_assignment(RoleAssignment::new(user.clone(), "analyst", at(1)))
            .unwrap();

        assert_eq!(directory.revoke_assignments(&user).unwrap(), 1);
        assert!(directory.role_assignments(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_fixture_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("directory.json");
        std::fs::write(
            &path,
            r#"{
                "profiles": [
                    {"userId": "u-7", "fullName": "Sam Okafor", "role": "exhibit_officer"}
                ],
                "roleAssignments": [
                    {"userId": "u-8", "role": "analyst", "createdAt": "2024-01-01T00:00:00Z"}
                ]
            }"#,
        )
        .unwrap();

        let directory = InMemoryDirectory::load(&path).unwrap();
        assert_eq!(directory.profile_count().unwrap(), 1);
        assert_eq!(directory.role_assignments(&UserId::new("u-8")).await.unwrap().len(), 1);
        assert!(directory.health_check().await.is_ok());
        assert_eq!(directory.backend_name(), "memory");
    }

    #[test]
    fn test_malformed_fixture_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(InMemoryDirectory::load(&path).is_err());
    }
}
