//! Simulation statistics collection and reporting.
//!
//! Tracks observable counters for the hierarchy: per-level accesses, hits,
//! misses, evictions, and write-back flushes, plus backing-memory reads and
//! writes. Latency is deliberately not modelled.

use crate::cache::{Operation, OutQuery};

/// Counters for one cache level.
#[derive(Clone, Debug, Default)]
pub struct LevelStats {
    /// Queries serviced by this level.
    pub accesses: u64,
    /// Queries that hit.
    pub hits: u64,
    /// Queries that missed.
    pub misses: u64,
    /// Victim blocks evicted.
    pub evictions: u64,
    /// Dirty victims flushed downstream.
    pub writebacks: u64,
}

impl LevelStats {
    /// Hit rate over all accesses, zero when idle.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.accesses as f64
        }
    }
}

/// Counters for the whole hierarchy.
#[derive(Clone, Debug, Default)]
pub struct HierarchyStats {
    /// Per-level counters, level 0 first.
    pub levels: Vec<LevelStats>,
    /// Reads that reached backing memory.
    pub mem_reads: u64,
    /// Writes that reached backing memory.
    pub mem_writes: u64,
}

impl HierarchyStats {
    /// Creates zeroed counters for `levels` cache levels.
    pub fn new(levels: usize) -> Self {
        Self {
            levels: vec![LevelStats::default(); levels],
            ..Self::default()
        }
    }

    /// Records the outcome of one level query.
    pub fn record(&mut self, level: usize, result: &OutQuery) {
        let stats = &mut self.levels[level];
        stats.accesses += 1;
        if result.hit {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        if result.evicted {
            stats.evictions += 1;
        }
    }

    /// Records a dirty-victim flush leaving `level`.
    pub fn record_writeback(&mut self, level: usize) {
        self.levels[level].writebacks += 1;
    }

    /// Records an access that reached backing memory.
    pub fn record_memory(&mut self, op: Operation) {
        match op {
            Operation::Read => self.mem_reads += 1,
            Operation::Write => self.mem_writes += 1,
        }
    }

    /// Prints the statistics report to stdout.
    pub fn print(&self) {
        println!("=== Statistics ===");
        for (i, stats) in self.levels.iter().enumerate() {
            println!(
                "L{i}: {} accesses, {} hits, {} misses ({:.1}% hit rate), {} evictions, {} writebacks",
                stats.accesses,
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0,
                stats.evictions,
                stats.writebacks
            );
        }
        println!(
            "Memory: {} reads, {} writes",
            self.mem_reads, self.mem_writes
        );
    }
}
