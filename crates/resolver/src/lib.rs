//! # CaseGuard Resolver
//!
//! Effective role resolution: an ordered list of role sources consulted in
//! priority order, bounded by a timeout that fails closed.

mod role_resolver;
mod sources;
mod types;

pub use role_resolver::{RoleResolver, RoleResolverConfig};
pub use sources::{AssignmentSource, ProfileSource, RoleSource};
pub use types::*;
