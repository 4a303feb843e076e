//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** The baseline two-level reference machine.
//! 2. **Structures:** Per-level cache configuration and the hierarchy root.
//! 3. **Enums:** Write, allocation, and replacement policies; trace levels;
//!    memory initialization modes.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or via
//! [`HierarchyConfig::default()`].

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values reproduce the reference machine used when no configuration
/// file is supplied: a 16 KiB 4-way write-back L1 in front of a tiny
/// fully-associative write-through L2.
mod defaults {
    /// L1 capacity in bytes (16 KiB).
    pub const L1_SIZE: usize = 16 * 1024;

    /// L2 capacity in bytes (256 B).
    pub const L2_SIZE: usize = 256;

    /// Block size in bytes, both levels.
    pub const BLOCK_BYTES: usize = 32;

    /// L1 associativity (4 ways).
    pub const L1_WAYS: usize = 4;

    /// L2 associativity (8 ways — fully associative at 256 B capacity).
    pub const L2_WAYS: usize = 8;

    /// Address width in bits.
    pub const ADDR_BITS: u32 = 32;

    /// Seed for the random-replacement stream.
    pub const RANDOM_SEED: u64 = 123_456_789;
}

/// Write propagation policy of a cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WritePolicy {
    /// Delayed propagation: a write hit dirties the block; the payload
    /// reaches the next level only when the block is evicted.
    #[default]
    WriteBack,
    /// Immediate propagation: every write is forwarded to the next level
    /// and blocks are never dirty.
    WriteThrough,
}

/// Allocate-on-miss policy of a cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AllocationPolicy {
    /// Install a block on read misses only; write misses bypass the level.
    ReadAllocate,
    /// Install a block on write misses only; read misses bypass the level.
    WriteAllocate,
    /// Install on every miss.
    #[default]
    Both,
}

/// Replacement policy algorithms.
///
/// Selects which block to evict when a new block must be installed in a
/// full set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// Least Recently Used: evicts the block untouched for the longest.
    #[default]
    #[serde(alias = "Lru")]
    Lru,
    /// Most Recently Used: evicts the block touched last. Effective for
    /// cyclic access patterns larger than the cache.
    #[serde(alias = "Mru")]
    Mru,
    /// Random: evicts a uniformly sampled block from a seeded stream.
    #[serde(alias = "Random")]
    Random,
}

/// Verbosity of the per-query hierarchy log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum TraceLevel {
    /// No per-query output.
    #[default]
    None,
    /// Per-level hit/miss lines.
    Basic,
    /// Adds returned payloads and eviction tags.
    Full,
}

impl TraceLevel {
    /// Maps the CLI integer (`-t 0|1|2`) to a trace level.
    ///
    /// Values past 2 clamp to [`TraceLevel::Full`].
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Self::None,
            1 => Self::Basic,
            _ => Self::Full,
        }
    }
}

/// Backing-memory initialization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum MemoryInitMode {
    /// Preallocate the init window with zero payloads.
    #[default]
    Zeros,
    /// Preallocate the init window with each word equal to its own byte
    /// address.
    Addresses,
}

impl MemoryInitMode {
    /// Maps the CLI integer (`-i 0|1`) to an init mode.
    pub fn from_mode(mode: u8) -> Self {
        match mode {
            0 => Self::Zeros,
            _ => Self::Addresses,
        }
    }
}

/// Configuration of a single cache level.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfig {
    /// Total capacity in bytes.
    pub size_bytes: usize,

    /// Block size in bytes.
    #[serde(default = "LevelConfig::default_block")]
    pub block_bytes: usize,

    /// Associativity (number of ways).
    #[serde(default = "LevelConfig::default_ways")]
    pub ways: usize,

    /// Address width in bits.
    #[serde(default = "LevelConfig::default_addr_bits")]
    pub addr_bits: u32,

    /// Write propagation policy.
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Allocate-on-miss policy.
    #[serde(default)]
    pub alloc_policy: AllocationPolicy,

    /// Replacement policy.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Seed for the random-replacement stream of this level.
    #[serde(default = "LevelConfig::default_seed")]
    pub seed: u64,
}

impl LevelConfig {
    /// Returns the default block size in bytes.
    fn default_block() -> usize {
        defaults::BLOCK_BYTES
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::L1_WAYS
    }

    /// Returns the default address width in bits.
    fn default_addr_bits() -> u32 {
        defaults::ADDR_BITS
    }

    /// Returns the default random-replacement seed.
    fn default_seed() -> u64 {
        defaults::RANDOM_SEED
    }
}

/// Root configuration: the ordered cache levels plus memory and trace
/// settings.
///
/// # Examples
///
/// Deserializing from JSON (typical `--config` usage):
///
/// ```
/// use cachesim_core::config::{
///     AllocationPolicy, HierarchyConfig, ReplacementPolicy, WritePolicy,
/// };
///
/// let json = r#"{
///     "levels": [
///         {
///             "size_bytes": 32,
///             "block_bytes": 16,
///             "ways": 2,
///             "write_policy": "WriteBack",
///             "alloc_policy": "ReadAllocate",
///             "policy": "LRU"
///         }
///     ],
///     "init": "Addresses",
///     "trace": "Basic"
/// }"#;
///
/// let config: HierarchyConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.levels.len(), 1);
/// assert_eq!(config.levels[0].write_policy, WritePolicy::WriteBack);
/// assert_eq!(config.levels[0].alloc_policy, AllocationPolicy::ReadAllocate);
/// assert_eq!(config.levels[0].policy, ReplacementPolicy::Lru);
/// assert!(!config.dirty_refill);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    /// Cache levels, nearest the CPU first.
    pub levels: Vec<LevelConfig>,

    /// Backing-memory initialization mode.
    #[serde(default)]
    pub init: MemoryInitMode,

    /// Per-query log verbosity.
    #[serde(default)]
    pub trace: TraceLevel,

    /// When set, read refills are installed Dirty under write-back, as the
    /// original model did. The default keeps refills Clean: a block just
    /// fetched from below has not diverged from it.
    #[serde(default)]
    pub dirty_refill: bool,
}

impl Default for HierarchyConfig {
    /// Creates the reference two-level machine:
    /// L1 16 KiB / 32 B blocks / 4-way / write-back / allocate-both / MRU,
    /// L2 256 B / 32 B blocks / fully associative / write-through /
    /// write-allocate / LRU.
    fn default() -> Self {
        Self {
            levels: vec![
                LevelConfig {
                    size_bytes: defaults::L1_SIZE,
                    block_bytes: defaults::BLOCK_BYTES,
                    ways: defaults::L1_WAYS,
                    addr_bits: defaults::ADDR_BITS,
                    write_policy: WritePolicy::WriteBack,
                    alloc_policy: AllocationPolicy::Both,
                    policy: ReplacementPolicy::Mru,
                    seed: defaults::RANDOM_SEED,
                },
                LevelConfig {
                    size_bytes: defaults::L2_SIZE,
                    block_bytes: defaults::BLOCK_BYTES,
                    ways: defaults::L2_WAYS,
                    addr_bits: defaults::ADDR_BITS,
                    write_policy: WritePolicy::WriteThrough,
                    alloc_policy: AllocationPolicy::WriteAllocate,
                    policy: ReplacementPolicy::Lru,
                    seed: defaults::RANDOM_SEED,
                },
            ],
            init: MemoryInitMode::default(),
            trace: TraceLevel::default(),
            dirty_refill: false,
        }
    }
}
