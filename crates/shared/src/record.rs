//! Directory records: users, profiles and role assignments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque user identity issued by the authentication provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Per-user profile record
///
/// `role` is a denormalized copy kept for display and as the fallback role
/// source; role assignments are authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub user_id: UserId,

    #[serde(default)]
    pub full_name: String,

    #[serde(default)]
    pub badge_number: Option<String>,

    #[serde(default)]
    pub department: Option<String>,

    /// Raw role string as stored
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Profile {
    /// Create an active profile with no role
    pub fn new(user_id: UserId, full_name: impl Into<String>) -> Self {
        Self {
            user_id,
            full_name: full_name.into(),
            badge_number: None,
            department: None,
            role: None,
            active: true,
        }
    }

    /// Builder: set the fallback role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Builder: set badge number
    pub fn with_badge(mut self, badge: impl Into<String>) -> Self {
        self.badge_number = Some(badge.into());
        self
    }

    /// Builder: set department
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Authoritative role assignment row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub user_id: UserId,

    /// Raw role string as stored
    pub role: String,

    pub created_at: DateTime<Utc>,

    /// Insertion order, assigned by the store; breaks `created_at` ties
    #[serde(default)]
    pub sequence: u64,
}

impl RoleAssignment {
    pub fn new(user_id: UserId, role: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role: role.into(),
            created_at,
            sequence: 0,
        }
    }

    /// Ordering key: creation time, then creation order
    pub fn creation_key(&self) -> (DateTime<Utc>, u64) {
        (self.created_at, self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_profile_builder() {
        let profile = Profile::new(UserId::new("u-1"), "Dana Reyes")
            .with_role("exhibit_officer")
            .with_badge("B-1042")
            .with_department("Digital Forensics");

        assert_eq!(profile.role.as_deref(), Some("exhibit_officer"));
        assert_eq!(profile.badge_number.as_deref(), Some("B-1042"));
        assert!(profile.active);
    }

    #[test]
    fn test_profile_deserialization_defaults() {
        let json = r#"{"userId": "u-2"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.user_id, UserId::new("u-2"));
        assert!(profile.role.is_none());
        assert!(profile.active);
    }

    #[test]
    fn test_assignment_deserialization() {
        let json = r#"{"userId": "u-3", "role": "analyst", "createdAt": "2024-03-01T09:00:00Z"}"#;
        let assignment: RoleAssignment = serde_json::from_str(json).unwrap();

        assert_eq!(assignment.role, "analyst");
        assert_eq!(assignment.sequence, 0);
        assert_eq!(
            assignment.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_creation_key_orders_by_time_then_sequence() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut first = RoleAssignment::new(UserId::new("u"), "analyst", t);
        let mut second = RoleAssignment::new(UserId::new("u"), "admin", t);
        first.sequence = 1;
        second.sequence = 2;

        assert!(first.creation_key() < second.creation_key());
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(UserId::from("abc").to_string(), "abc");
    }
}
