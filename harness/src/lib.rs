//! Tilepath Harness: world-level orchestration for the search engine.
//!
//! The harness runs a world (a graph plus start and goal) through
//! `tilepath_search::search` and packages the outcome as a report whose
//! canonical bytes are reproducible across runs and machines.
//!
//! The harness does NOT implement search logic; it delegates to the search
//! crate. Worlds provide domain data only; the harness owns orchestration.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod scenario;
pub mod worlds;
