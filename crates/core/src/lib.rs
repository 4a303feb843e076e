//! Trace-driven cache hierarchy simulator library.
//!
//! This crate implements a multi-level set-associative CPU cache hierarchy
//! backed by a flat main memory. It provides:
//! 1. **Cache:** One set-associative level with address decoding, tag store,
//!    replacement (LRU/MRU/Random), and write/allocation policy logic behind
//!    a single `query` state machine.
//! 2. **Memory:** A sparse always-hit backing store with modified-address
//!    tracking and configurable initialization.
//! 3. **Hierarchy:** The coordinator that threads requests across levels —
//!    miss fill, read refill, write propagation, write-back on eviction.
//! 4. **Simulation:** The `ld`/`st`/`show` command parser and line driver.
//! 5. **Configuration and statistics** for all of the above.

/// Set-associative cache level, query protocol, and replacement policies.
pub mod cache;
/// Common types (block payload, address geometry, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// Hierarchy coordinator threading requests across levels and memory.
pub mod hierarchy;
/// Backing memory model.
pub mod mem;
/// Driver: command parsing and line-oriented execution.
pub mod sim;
/// Hit/miss/eviction statistics collection and reporting.
pub mod stats;

/// One set-associative cache level; construct with `CacheLevel::new`.
pub use crate::cache::CacheLevel;
/// Query protocol types shared by levels, memory, and the coordinator.
pub use crate::cache::{InQuery, Operation, OutQuery};
/// Block payload carried by queries.
pub use crate::common::Block;
/// Root configuration type; use `HierarchyConfig::default()` or deserialize
/// from JSON.
pub use crate::config::HierarchyConfig;
/// Top-level hierarchy; owns the cache levels and backing memory.
pub use crate::hierarchy::Hierarchy;
/// Flat backing memory.
pub use crate::mem::MemoryModel;
