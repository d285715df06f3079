//! AuditLogger - Bounded audit trail for CaseGuard

use serde::{Deserialize, Serialize};
use shared::{Operation, Role, UserId};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: String,
    pub event_type: AuditEventType,
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub operation: Option<String>,
    pub source: Option<String>,
    pub success: bool,
    pub reason: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Types of audit events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    RoleResolved,
    RoleChanged,
    SourceFailed,
    ResolutionTimedOut,
    OperationAllowed,
    OperationDenied,
}

/// Audit logger
///
/// Shared by every session of a process; entries past `max_entries` are
/// dropped oldest first.
#[derive(Debug)]
pub struct AuditLogger {
    entries: Mutex<VecDeque<AuditEntry>>,
    max_entries: usize,
}

fn role_label(role: Option<&Role>) -> String {
    role.map(|r| r.as_str().to_string())
        .unwrap_or_else(|| "none".to_string())
}

impl AuditLogger {
    /// Create a new AuditLogger
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(max_entries.min(1024))),
            max_entries: max_entries.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<AuditEntry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Log an audit entry
    pub fn log(&self, entry: AuditEntry) {
        let mut entries = self.lock();
        if entries.len() >= self.max_entries {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    fn entry(event_type: AuditEventType, user_id: Option<&UserId>, success: bool) -> AuditEntry {
        AuditEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            event_type,
            user_id: user_id.map(|u| u.to_string()),
            role: None,
            operation: None,
            source: None,
            success,
            reason: None,
            metadata: None,
        }
    }

    /// Log a completed role resolution
    pub fn log_role_resolved(&self, user_id: &UserId, role: Option<&Role>, source: Option<&str>) {
        self.log(AuditEntry {
            role: Some(role_label(role)),
            source: source.map(|s| s.to_string()),
            ..Self::entry(AuditEventType::RoleResolved, Some(user_id), true)
        });
    }

    /// Log a session's role changing
    pub fn log_role_change(&self, user_id: Option<&UserId>, from: Option<&Role>, to: Option<&Role>) {
        self.log(AuditEntry {
            role: Some(role_label(to)),
            reason: Some(format!("Changed from '{}'", role_label(from))),
            ..Self::entry(AuditEventType::RoleChanged, user_id, true)
        });
    }

    /// Log a role source that failed during resolution
    pub fn log_source_failure(&self, user_id: &UserId, source: &str, error: &str) {
        self.log(AuditEntry {
            source: Some(source.to_string()),
            reason: Some(error.to_string()),
            ..Self::entry(AuditEventType::SourceFailed, Some(user_id), false)
        });
    }

    /// Log a resolution that exceeded its time bound
    pub fn log_timeout(&self, user_id: &UserId, timeout_ms: u128) {
        self.log(AuditEntry {
            reason: Some(format!("Role lookup exceeded {}ms", timeout_ms)),
            metadata: Some(serde_json::json!({ "timeoutMs": timeout_ms as u64 })),
            ..Self::entry(AuditEventType::ResolutionTimedOut, Some(user_id), false)
        });
    }

    /// Log an authorization decision
    pub fn log_authorization(
        &self,
        user_id: Option<&UserId>,
        role: Option<&Role>,
        operation: Operation,
        allowed: bool,
    ) {
        let event_type = if allowed {
            AuditEventType::OperationAllowed
        } else {
            AuditEventType::OperationDenied
        };
        self.log(AuditEntry {
            role: Some(role_label(role)),
            operation: Some(operation.as_str().to_string()),
            reason: (!allowed).then(|| "Permission denied".to_string()),
            ..Self::entry(event_type, user_id, allowed)
        });
    }

    /// Get recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<AuditEntry> {
        self.lock().iter().rev().take(limit).cloned().collect()
    }

    /// Get recent operation denials, newest first
    pub fn get_recent_denials(&self, limit: usize) -> Vec<AuditEntry> {
        self.lock()
            .iter()
            .rev()
            .filter(|e| e.event_type == AuditEventType::OperationDenied)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Get recent unsuccessful entries of any kind (denials, source
    /// failures, timeouts), newest first
    pub fn get_recent_failures(&self, limit: usize) -> Vec<AuditEntry> {
        self.lock()
            .iter()
            .rev()
            .filter(|e| !e.success)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Entries for one user, newest first
    pub fn entries_for_user(&self, user_id: &UserId) -> Vec<AuditEntry> {
        self.lock()
            .iter()
            .rev()
            .filter(|e| e.user_id.as_deref() == Some(user_id.as_str()))
            .cloned()
            .collect()
    }

    /// Get statistics
    pub fn get_stats(&self) -> AuditStats {
        let entries = self.lock();
        let count = |t: AuditEventType| entries.iter().filter(|e| e.event_type == t).count();

        AuditStats {
            total_entries: entries.len(),
            denial_count: count(AuditEventType::OperationDenied),
            failure_count: count(AuditEventType::SourceFailed),
            timeout_count: count(AuditEventType::ResolutionTimedOut),
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(&*self.lock()).unwrap_or_default()
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub total_entries: usize,
    pub denial_count: usize,
    pub failure_count: usize,
    pub timeout_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id)
    }

    #[test]
    fn test_log_authorization() {
        let logger = AuditLogger::new(100);

        logger.log_authorization(Some(&user("u-1")), Some(&Role::Admin), Operation::ManageAllUsers, true);

        let stats = logger.get_stats();
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.denial_count, 0);
    }

    #[test]
    fn test_log_denied() {
        let logger = AuditLogger::new(100);

        logger.log_authorization(Some(&user("u-2")), None, Operation::OverridePolicies, false);

        assert_eq!(logger.get_stats().denial_count, 1);

        let denials = logger.get_recent_denials(10);
        assert_eq!(denials.len(), 1);
        assert_eq!(denials[0].operation, Some("override-policies".to_string()));
        assert_eq!(denials[0].role, Some("none".to_string()));
        assert_eq!(denials[0].user_id, Some("u-2".to_string()));
    }

    #[test]
    fn test_log_role_change() {
        let logger = AuditLogger::new(100);

        logger.log_role_change(Some(&user("u-1")), None, Some(&Role::Analyst));

        let recent = logger.get_recent(1);
        assert_eq!(recent[0].role, Some("analyst".to_string()));
        assert!(recent[0].reason.as_ref().unwrap().contains("none"));
        assert_eq!(recent[0].event_type, AuditEventType::RoleChanged);
    }

    #[test]
    fn test_failures_and_timeouts_counted() {
        let logger = AuditLogger::new(100);

        logger.log_source_failure(&user("u-1"), "role_assignments", "directory unavailable");
        logger.log_timeout(&user("u-1"), 3000);
        logger.log_role_resolved(&user("u-1"), None, None);

        let stats = logger.get_stats();
        assert_eq!(stats.failure_count, 1);
        assert_eq!(stats.timeout_count, 1);
        assert_eq!(logger.get_recent_failures(10).len(), 2);
    }

    #[test]
    fn test_denials_match_denial_count() {
        let logger = AuditLogger::new(100);

        logger.log_source_failure(&user("u-1"), "profile", "down");
        logger.log_timeout(&user("u-1"), 3000);
        logger.log_authorization(Some(&user("u-1")), None, Operation::ViewAuditLogs, false);

        let denials = logger.get_recent_denials(10);
        assert_eq!(denials.len(), logger.get_stats().denial_count);
        assert_eq!(denials.len(), 1);
        assert_eq!(denials[0].event_type, AuditEventType::OperationDenied);
        assert_eq!(logger.get_recent_failures(10).len(), 3);
    }

    #[test]
    fn test_max_entries_limit() {
        let logger = AuditLogger::new(3);

        for op in &Operation::all()[..4] {
            logger.log_authorization(None, Some(&Role::ChiefOfCyber), *op, true);
        }

        assert_eq!(logger.get_stats().total_entries, 3);

        // Oldest entry should be removed
        let recent = logger.get_recent(10);
        assert!(recent
            .iter()
            .all(|e| e.operation.as_deref() != Some("approve-final-reports")));
    }

    #[test]
    fn test_get_recent_newest_first() {
        let logger = AuditLogger::new(100);

        logger.log_authorization(None, None, Operation::ViewAuditLogs, false);
        logger.log_authorization(None, None, Operation::ViewSystemAnalytics, false);
        logger.log_authorization(None, None, Operation::OverridePolicies, false);

        let recent = logger.get_recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].operation, Some("override-policies".to_string()));
        assert_eq!(recent[1].operation, Some("view-system-analytics".to_string()));
    }

    #[test]
    fn test_entries_for_user() {
        let logger = AuditLogger::new(100);

        logger.log_role_resolved(&user("a"), Some(&Role::Analyst), Some("role_assignments"));
        logger.log_role_resolved(&user("b"), Some(&Role::Admin), Some("profile"));

        let entries = logger.entries_for_user(&user("b"));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source, Some("profile".to_string()));
    }

    #[test]
    fn test_export_json() {
        let logger = AuditLogger::new(100);

        logger.log_timeout(&user("u"), 250);
        logger.log_authorization(None, None, Operation::ManageAllUsers, false);

        let json = logger.export_json();
        assert_eq!(json.as_array().unwrap().len(), 2);
        assert_eq!(json[0]["eventType"], "resolution_timed_out");
        assert_eq!(json[0]["metadata"]["timeoutMs"], 250);
    }

    #[test]
    fn test_default_max_entries() {
        let logger = AuditLogger::default();
        assert_eq!(logger.max_entries, 10000);
    }

    #[test]
    fn test_shared_across_threads() {
        let logger = std::sync::Arc::new(AuditLogger::new(1000));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let logger = logger.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        logger.log_source_failure(&UserId::new(format!("u-{i}")), "profile", "down");
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(logger.get_stats().failure_count, 40);
    }
}
