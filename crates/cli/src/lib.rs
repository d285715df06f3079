//! # CaseGuard CLI
//!
//! Command implementations for the `caseguard` binary.

pub mod commands;
