//! # CaseGuard Directory
//!
//! The data-access port the role resolver reads from, and an in-memory
//! implementation of it.
//!
//! ```text
//! Port (this crate)          │  Adapters
//! ───────────────────────────┼──────────────────────────
//! trait DirectoryStore       │  InMemoryDirectory
//!   profile()                │  (production stores live
//!   role_assignments()       │   outside this workspace)
//! ```

pub mod in_memory;
pub mod store;

pub use in_memory::{DirectoryFixture, InMemoryDirectory};
pub use store::{DirectoryStore, StoreError, StoreResult};
