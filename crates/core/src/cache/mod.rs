//! Set-Associative Cache Level.
//!
//! This module implements one level of the cache hierarchy: address
//! decoding, the tag store, replacement, and the write/allocation policy
//! logic. The single [`CacheLevel::query`] entry point is a complete state
//! machine — it either services the request or emits the follow-on requests
//! the next level must see, but never talks to other levels itself. The
//! hierarchy coordinator interprets the follow-ons.

/// Cache replacement policy implementations (LRU, MRU, Random).
pub mod policies;

use self::policies::ReplacementPolicy;
use crate::common::{Block, ConfigError, Geometry};
use crate::config::{AllocationPolicy, LevelConfig, ReplacementPolicy as PolicyKind, WritePolicy};

/// Kind of memory access carried by a query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Load: return the block payload.
    Read,
    /// Store: overwrite the block payload.
    Write,
}

/// A request entering a cache level (or backing memory).
///
/// `size` is always in bytes. The payload is a value: it is copied on
/// transfer between levels, never aliased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InQuery {
    /// Read or write.
    pub op: Operation,
    /// Byte address of the access.
    pub addr: u64,
    /// Payload carried by a write; empty for reads.
    pub data: Block,
    /// Request size in bytes.
    pub size: usize,
}

impl InQuery {
    /// Builds a read request.
    pub fn read(addr: u64, size: usize) -> Self {
        Self {
            op: Operation::Read,
            addr,
            data: Block::new(),
            size,
        }
    }

    /// Builds a write request carrying `data`.
    pub fn write(addr: u64, data: Block, size: usize) -> Self {
        Self {
            op: Operation::Write,
            addr,
            data,
            size,
        }
    }
}

/// The outcome of a query against one level.
#[derive(Clone, Debug, Default)]
pub struct OutQuery {
    /// Whether the request hit at this level.
    pub hit: bool,
    /// Whether a victim block was evicted to make room.
    pub evicted: bool,
    /// Tag of the evicted victim, when one was evicted.
    pub evicted_tag: Option<u64>,
    /// Follow-on requests the next level must see, in emission order.
    pub out: Vec<InQuery>,
    /// Payload returned by a read hit (or a refill, at the hierarchy level).
    pub data: Option<Block>,
}

/// One block of the tag store.
#[derive(Clone, Debug, Default)]
struct CacheBlock {
    valid: bool,
    tag: u64,
    dirty: bool,
    data: Block,
}

/// One set: `ways` preallocated blocks plus an occupancy count.
#[derive(Clone, Debug)]
struct CacheSet {
    blocks: Vec<CacheBlock>,
    count: usize,
}

impl CacheSet {
    fn new(ways: usize) -> Self {
        Self {
            blocks: vec![CacheBlock::default(); ways],
            count: 0,
        }
    }
}

/// One set-associative cache level with configurable write, allocation, and
/// replacement policies.
pub struct CacheLevel {
    geometry: Geometry,
    write_policy: WritePolicy,
    alloc_policy: AllocationPolicy,
    policy_kind: PolicyKind,
    policy: Box<dyn ReplacementPolicy>,
    sets: Vec<CacheSet>,
    ways: usize,
}

impl CacheLevel {
    /// Creates a cache level from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the geometry is invalid: block size or
    /// derived set count not a power of two, zero associativity, capacity
    /// not divisible by `block_bytes * ways`, or an address width too small
    /// for the offset and index fields.
    pub fn new(config: &LevelConfig) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(
            config.size_bytes,
            config.block_bytes,
            config.ways,
            config.addr_bits,
        )?;
        let num_sets = geometry.num_sets() as usize;

        Ok(Self {
            geometry,
            write_policy: config.write_policy,
            alloc_policy: config.alloc_policy,
            policy_kind: config.policy,
            policy: policies::build(config.policy, num_sets, config.ways, config.seed),
            sets: vec![CacheSet::new(config.ways); num_sets],
            ways: config.ways,
        })
    }

    /// This level's address geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// This level's write propagation policy.
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Whether a miss on `op` installs a block at this level.
    pub fn should_allocate(&self, op: Operation) -> bool {
        match self.alloc_policy {
            AllocationPolicy::ReadAllocate => op == Operation::Read,
            AllocationPolicy::WriteAllocate => op == Operation::Write,
            AllocationPolicy::Both => true,
        }
    }

    /// Whether the block holding `addr` is resident.
    pub fn contains(&self, addr: u64) -> bool {
        let index = self.geometry.index(addr) as usize;
        self.find(index, self.geometry.tag(addr)).is_some()
    }

    /// Dirty state of the block holding `addr`, or `None` if not resident.
    pub fn dirty(&self, addr: u64) -> Option<bool> {
        let index = self.geometry.index(addr) as usize;
        self.find(index, self.geometry.tag(addr))
            .map(|way| self.sets[index].blocks[way].dirty)
    }

    /// Number of valid blocks in the set `index`.
    pub fn occupancy(&self, index: usize) -> usize {
        self.sets[index].count
    }

    /// Tags of the valid blocks in the set `index`.
    pub fn set_tags(&self, index: usize) -> Vec<u64> {
        self.sets[index]
            .blocks
            .iter()
            .filter(|b| b.valid)
            .map(|b| b.tag)
            .collect()
    }

    /// Clears the dirty bit of the block holding `addr`, if resident.
    ///
    /// The hierarchy uses this to keep read refills Clean: a block just
    /// fetched from below has not diverged from it.
    pub fn mark_clean(&mut self, addr: u64) {
        let index = self.geometry.index(addr) as usize;
        if let Some(way) = self.find(index, self.geometry.tag(addr)) {
            self.sets[index].blocks[way].dirty = false;
        }
    }

    /// Services one request against this level.
    ///
    /// The operation is total: every input produces an [`OutQuery`]. On a
    /// hit the request is applied here (reads return the payload, writes
    /// overwrite it); on a miss the level either installs a block or emits a
    /// mirrored request, per the allocation policy. All communication with
    /// lower levels happens through the returned follow-on list.
    pub fn query(&mut self, query: &InQuery) -> OutQuery {
        let tag = self.geometry.tag(query.addr);
        let index = self.geometry.index(query.addr) as usize;
        let mut result = OutQuery::default();

        if let Some(way) = self.find(index, tag) {
            result.hit = true;
            // Recency splice; a no-op under Random.
            self.policy.update(index, way);

            let block = &mut self.sets[index].blocks[way];
            match query.op {
                Operation::Read => {
                    result.data = Some(block.data.clone());
                }
                Operation::Write => {
                    block.data = query.data.clone();
                    match self.write_policy {
                        WritePolicy::WriteBack => block.dirty = true,
                        WritePolicy::WriteThrough => {
                            block.dirty = false;
                            result
                                .out
                                .push(InQuery::write(query.addr, query.data.clone(), query.size));
                        }
                    }
                }
            }
            return result;
        }

        if !self.should_allocate(query.op) {
            // Miss bypasses this level; mirror the request downstream.
            result.out.push(query.clone());
            return result;
        }

        let way = if self.sets[index].count < self.ways {
            self.first_invalid_way(index)
        } else {
            self.evict(index, &mut result)
        };

        let installed_dirty =
            query.op == Operation::Write && self.write_policy == WritePolicy::WriteBack;
        if !self.sets[index].blocks[way].valid {
            self.sets[index].count += 1;
        }
        let block = &mut self.sets[index].blocks[way];
        block.valid = true;
        block.tag = tag;
        block.dirty = installed_dirty;
        block.data = query.data.clone();
        self.policy.update(index, way);

        tracing::trace!(
            addr = query.addr,
            set = index,
            way,
            tag,
            dirty = installed_dirty,
            "installed block"
        );

        match query.op {
            // The coordinator resolves this read below and refills us.
            Operation::Read => result.out.push(InQuery::read(query.addr, query.size)),
            Operation::Write => {
                if self.write_policy == WritePolicy::WriteThrough {
                    result
                        .out
                        .push(InQuery::write(query.addr, query.data.clone(), query.size));
                }
            }
        }

        result
    }

    /// Scans the set for a valid block with the given tag.
    fn find(&self, index: usize, tag: u64) -> Option<usize> {
        self.sets[index]
            .blocks
            .iter()
            .position(|b| b.valid && b.tag == tag)
    }

    /// First unoccupied way of a non-full set.
    fn first_invalid_way(&self, index: usize) -> usize {
        self.sets[index]
            .blocks
            .iter()
            .position(|b| !b.valid)
            .unwrap_or(0)
    }

    /// Selects a victim in a full set and records the eviction.
    ///
    /// A dirty victim under write-back emits a flush write addressed by this
    /// level's own geometry. Write-through victims are always clean.
    fn evict(&mut self, index: usize, result: &mut OutQuery) -> usize {
        let way = self.policy.victim(index);
        let victim = &self.sets[index].blocks[way];
        result.evicted = true;
        result.evicted_tag = Some(victim.tag);

        if victim.dirty && self.write_policy == WritePolicy::WriteBack {
            let addr = self.geometry.reconstruct(victim.tag, index as u64);
            result.out.push(InQuery::write(
                addr,
                victim.data.clone(),
                self.geometry.block_bytes() as usize,
            ));
        }

        tracing::trace!(
            set = index,
            way,
            tag = victim.tag,
            dirty = victim.dirty,
            "evicting block"
        );
        way
    }

    /// Prints the configuration and contents of this level to stdout.
    pub fn print_state(&self) {
        println!("=== Cache Configuration ===");
        println!(
            "Size:          {} b",
            self.geometry.num_sets() * self.geometry.block_bytes() * self.ways as u64
        );
        println!("Block size:    {} b", self.geometry.block_bytes());
        println!("Associativity: {}", self.ways);
        println!(
            "Policy:        {:?}, {:?}, {:?}",
            self.write_policy, self.alloc_policy, self.policy_kind
        );

        println!("=== Cache Contents ===");
        let mut empty = true;
        for (index, set) in self.sets.iter().enumerate() {
            if set.count == 0 {
                continue;
            }
            empty = false;
            println!("Set #{index:<4} [{}/{} blocks]:", set.count, self.ways);
            for (way, block) in set.blocks.iter().enumerate() {
                if !block.valid {
                    continue;
                }
                println!(
                    "  Block {way}: Tag={:#010x} State: {} Data: {}",
                    block.tag,
                    if block.dirty { "Dirty" } else { "Clean" },
                    block.data
                );
            }
        }
        if empty {
            println!("Cache is empty");
        }
        println!("======================");
    }
}
