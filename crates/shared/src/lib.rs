//! # CaseGuard Shared
//!
//! Common types used across all CaseGuard crates: the role and operation
//! enums, the directory records the resolver reads, error types and the
//! deployment configuration.

pub mod config;
pub mod error;
pub mod record;
pub mod role;

// Re-exports
pub use config::*;
pub use error::*;
pub use record::*;
pub use role::*;
