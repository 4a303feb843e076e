//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim blocks in set-associative
//! caches.
//!
//! # Policies
//!
//! - `Lru`: Least Recently Used.
//! - `Mru`: Most Recently Used.
//! - `Random`: Seeded random selection.

/// Least Recently Used replacement policy.
pub mod lru;

/// Most Recently Used replacement policy.
pub mod mru;

/// Random replacement policy.
pub mod random;

pub use lru::LruPolicy;
pub use mru::MruPolicy;
pub use random::RandomPolicy;

use crate::config::ReplacementPolicy as PolicyKind;

/// Trait for cache replacement policies.
///
/// Defines the interface for updating recency state and selecting victim
/// blocks.
pub trait ReplacementPolicy: Send + Sync {
    /// Updates the policy state when a way is touched (hit or install).
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    /// * `way` - The way index within the set that was touched.
    fn update(&mut self, set: usize, way: usize);

    /// Selects a victim way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&mut self, set: usize) -> usize;
}

/// Builds the policy state for a cache of `sets` x `ways` blocks.
///
/// `seed` feeds the random stream; LRU and MRU ignore it.
pub fn build(kind: PolicyKind, sets: usize, ways: usize, seed: u64) -> Box<dyn ReplacementPolicy> {
    match kind {
        PolicyKind::Lru => Box::new(LruPolicy::new(sets, ways)),
        PolicyKind::Mru => Box::new(MruPolicy::new(sets, ways)),
        PolicyKind::Random => Box::new(RandomPolicy::with_seed(ways, seed)),
    }
}
