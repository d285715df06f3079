//! # CaseGuard Audit
//!
//! Audit trail for role resolution and authorization decisions.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
