//! Hierarchy Coordinator.
//!
//! Owns the ordered cache levels and the backing memory, and threads each
//! request through them top-down. Levels never talk to each other: a level
//! reports its outcome plus a list of follow-on requests, and the
//! coordinator interprets them — forwarding write-through propagation,
//! resolving miss fills, installing read refills, and falling through to
//! memory as the terminal backstop.
//!
//! Within one top-level query, follow-ons are resolved in emission order and
//! fully before the call returns; top-level queries are serialized.

use crate::cache::{CacheLevel, InQuery, Operation, OutQuery};
use crate::common::{Block, ConfigError};
use crate::config::{HierarchyConfig, TraceLevel, WritePolicy};
use crate::mem::MemoryModel;
use crate::stats::HierarchyStats;

/// A multi-level cache hierarchy backed by flat main memory.
pub struct Hierarchy {
    levels: Vec<CacheLevel>,
    memory: MemoryModel,
    trace: TraceLevel,
    dirty_refill: bool,
    stats: HierarchyStats,
}

impl Hierarchy {
    /// Builds the hierarchy described by `config` and initializes memory.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] produced by an invalid level
    /// geometry.
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        let levels = config
            .levels
            .iter()
            .map(CacheLevel::new)
            .collect::<Result<Vec<_>, _>>()?;
        let mut memory = MemoryModel::new();
        memory.initialize(config.init);

        Ok(Self {
            stats: HierarchyStats::new(levels.len()),
            levels,
            memory,
            trace: config.trace,
            dirty_refill: config.dirty_refill,
        })
    }

    /// Number of cache levels.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// The cache level at `index` (0 nearest the CPU).
    pub fn level(&self, index: usize) -> &CacheLevel {
        &self.levels[index]
    }

    /// The backing memory.
    pub fn memory(&self) -> &MemoryModel {
        &self.memory
    }

    /// Accumulated statistics.
    pub fn stats(&self) -> &HierarchyStats {
        &self.stats
    }

    /// Services one request, entering at level 0.
    pub fn query(&mut self, query: &InQuery) -> OutQuery {
        self.query_at(0, query)
    }

    /// Walks the hierarchy starting at `level`; `level == levels.len()`
    /// addresses backing memory.
    fn query_at(&mut self, level: usize, query: &InQuery) -> OutQuery {
        if level == self.levels.len() {
            self.stats.record_memory(query.op);
            return self.memory.query(query);
        }

        let result = self.levels[level].query(query);
        self.stats.record(level, &result);
        self.log_query(level, query, &result);

        let write_through = self.levels[level].write_policy() == WritePolicy::WriteThrough;
        let allocates = self.levels[level].should_allocate(query.op);

        if query.op == Operation::Write && write_through {
            // Propagate immediately, hit or miss; the follow-ons carry the
            // write (and, on a no-allocate miss, stand in for it).
            let mut downstream = None;
            for follow_on in &result.out {
                downstream = Some(self.query_at(level + 1, follow_on));
            }
            if result.hit || allocates {
                return result;
            }
            return downstream.unwrap_or(result);
        }

        if result.hit {
            return result;
        }

        if allocates {
            return self.resolve_miss(level, query, result);
        }

        // Bypassed miss: the downstream result stands in for this level.
        tracing::debug!(level, addr = query.addr, "miss bypasses level");
        match result.out.first().cloned() {
            Some(follow_on) => self.query_at(level + 1, &follow_on),
            None => result,
        }
    }

    /// Resolves the follow-ons of an allocated miss at `level`.
    ///
    /// A downstream result carrying a payload is a read refill: it is
    /// installed into the level as a synthetic write at the level-aligned
    /// address, and the final result becomes a hit carrying that payload.
    /// Once every follow-on is resolved the walk terminates — the miss was
    /// serviced at this level.
    fn resolve_miss(&mut self, level: usize, query: &InQuery, result: OutQuery) -> OutQuery {
        let mut final_result = result;
        let follow_ons = std::mem::take(&mut final_result.out);
        let write_back = self.levels[level].write_policy() == WritePolicy::WriteBack;

        for follow_on in &follow_ons {
            if follow_on.op == Operation::Write && write_back {
                self.stats.record_writeback(level);
            }
            let below = self.query_at(level + 1, follow_on);

            if query.op == Operation::Read {
                if let Some(payload) = below.data {
                    self.install_refill(level, query.addr, payload.clone());
                    final_result.hit = true;
                    final_result.data = Some(payload);
                }
            }
        }

        final_result.out = follow_ons;
        final_result
    }

    /// Installs a refill payload into `level`.
    ///
    /// The refill is a write on the level-aligned address and inherits the
    /// level's normal write semantics, including the recency move. Its own
    /// follow-ons are discarded — a refill is not a CPU write, so there is
    /// nothing to propagate — and unless `dirty_refill` is set the block is
    /// left Clean.
    fn install_refill(&mut self, level: usize, addr: u64, payload: Block) {
        let aligned = self.levels[level].geometry().align(addr);
        let block_bytes = self.levels[level].geometry().block_bytes() as usize;
        let install = InQuery::write(aligned, payload, block_bytes);

        tracing::debug!(level, addr, aligned, "installing refill");
        let _ = self.levels[level].query(&install);
        if !self.dirty_refill {
            self.levels[level].mark_clean(aligned);
        }
    }

    /// Prints one per-level query line to stdout, gated by the trace level.
    fn log_query(&self, level: usize, query: &InQuery, result: &OutQuery) {
        tracing::debug!(
            level,
            op = ?query.op,
            addr = query.addr,
            hit = result.hit,
            evicted = result.evicted,
            "level query"
        );
        if self.trace == TraceLevel::None {
            return;
        }

        let mut line = format!(
            "L{level}: {} addr={:#x} size={} - {}",
            match query.op {
                Operation::Read => "READ",
                Operation::Write => "WRITE",
            },
            query.addr,
            query.size,
            if result.hit { "HIT" } else { "MISS" }
        );
        if self.trace >= TraceLevel::Full {
            if let Some(ref data) = result.data {
                line.push_str(&format!(" data={data}"));
            }
            if let Some(tag) = result.evicted_tag {
                line.push_str(&format!(" evicted={tag:#x}"));
            }
        }
        println!("{line}");
    }

    /// Prints every level's state and the modified-memory report.
    pub fn print_state(&self) {
        for level in &self.levels {
            level.print_state();
        }
        self.memory.print_modified();
    }

    /// Prints the modified-memory report.
    pub fn print_changes(&self) {
        self.memory.print_modified();
    }
}
