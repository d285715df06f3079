//! Error types for CaseGuard

use crate::role::{Operation, Role};
use thiserror::Error;

/// Error returned when a role is not authorized for an operation
///
/// The display text is deliberately generic so it can be shown to users;
/// the role and operation are kept for the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied")]
pub struct AccessDenied {
    pub role: Option<Role>,
    pub operation: Operation,
}

impl AccessDenied {
    /// Role label for logs ("none" when no role was resolved)
    pub fn role_label(&self) -> &str {
        self.role.as_ref().map(|r| r.as_str()).unwrap_or("none")
    }
}

/// Error raised while loading deployment configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown role '{name}' in permission table. Known roles: {}", known_roles.join(", "))]
    UnknownRole {
        name: String,
        known_roles: Vec<String>,
    },

    #[error("Role '{role}' is configured twice, as '{first}' and as '{second}'")]
    DuplicateRole {
        role: String,
        first: String,
        second: String,
    },

    #[error("Unknown operation '{name}' configured for role '{role}'")]
    UnknownOperation { role: String, name: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// General CaseGuard error type
#[derive(Debug, Error)]
pub enum CaseGuardError {
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CaseGuardError>;
