//! Tilepath Kernel: the graph model and determinism primitives.
//!
//! # API Surface
//!
//! - [`graph::TileGraph`] -- the graph collaborator contract the search reads
//! - [`graph::grid::GridGraph`] and [`graph::adjacency::AdjacencyGraph`] -- the two
//!   stock graph implementations
//! - [`proof::canon::canonical_json_bytes`] and [`proof::hash::canonical_hash`] --
//!   canonical serialization and domain-separated hashing for determinism locks
//!
//! # Module Dependency Direction
//!
//! `graph` ← `proof`
//!
//! One-way only. `proof::snapshot` reads graphs; `graph` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod graph;
pub mod proof;
