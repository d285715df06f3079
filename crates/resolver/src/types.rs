//! Resolver types

use serde::Serialize;
use shared::{Role, UserId};

/// Result of consulting one role source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// The source holds a role for the user
    Found(Role),
    /// The source has nothing for the user
    Empty,
    /// The source could not be read
    Failed(String),
}

/// How a resolution ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    /// A source produced a role
    Resolved,
    /// Every source was empty or failed
    NoRole,
    /// The lookup exceeded its time bound; fail closed
    TimedOut,
}

/// Role resolution result with provenance
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResolution {
    pub user_id: UserId,
    pub role: Option<Role>,
    /// Name of the source that produced `role`
    pub source: Option<String>,
    pub status: ResolutionStatus,
    /// Sources that failed before resolution finished
    pub failed_sources: Vec<String>,
    pub resolved_at: chrono::DateTime<chrono::Utc>,
}

impl RoleResolution {
    pub(crate) fn timed_out(user_id: UserId, failed_sources: Vec<String>) -> Self {
        Self {
            user_id,
            role: None,
            source: None,
            status: ResolutionStatus::TimedOut,
            failed_sources,
            resolved_at: chrono::Utc::now(),
        }
    }

    /// True if any source failed or the lookup timed out
    pub fn is_degraded(&self) -> bool {
        self.status == ResolutionStatus::TimedOut || !self.failed_sources.is_empty()
    }

    pub fn is_timed_out(&self) -> bool {
        self.status == ResolutionStatus::TimedOut
    }
}
