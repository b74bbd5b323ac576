//! Proof module: canonical serialization and hashing for determinism locks.
//!
//! Depends on `graph` (for snapshots). Nothing in the kernel depends on `proof`.

pub mod canon;
pub mod hash;
pub mod hash_domain;
pub mod snapshot;
