//! Most Recently Used (MRU) Replacement Policy.
//!
//! This policy evicts the block that was accessed most recently. While
//! counter-intuitive for standard workloads, MRU is effective for cyclic
//! access patterns where the working set is larger than the cache: the item
//! just used is the one needed furthest in the future.

use super::ReplacementPolicy;

/// MRU policy state.
pub struct MruPolicy {
    /// One usage stack per set. Index 0 is the MRU position (the victim).
    usage: Vec<Vec<usize>>,
}

impl MruPolicy {
    /// Creates a new MRU policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        let mut usage = Vec::with_capacity(sets);
        for _ in 0..sets {
            usage.push((0..ways).collect());
        }
        Self { usage }
    }
}

impl ReplacementPolicy for MruPolicy {
    /// Moves the touched `way` to the MRU position.
    fn update(&mut self, set: usize, way: usize) {
        let stack = &mut self.usage[set];
        if let Some(pos) = stack.iter().position(|&w| w == way) {
            let _ = stack.remove(pos);
        }
        stack.insert(0, way);
    }

    /// Returns the way at the top of the usage stack (the most recently
    /// used).
    fn victim(&mut self, set: usize) -> usize {
        self.usage[set].first().copied().unwrap_or(0)
    }
}
