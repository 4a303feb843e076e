//! Backing Memory Model.
//!
//! A sparse mapping from aligned addresses to block payloads, acting as the
//! backstop of the hierarchy: memory always reports a hit. Addresses are
//! aligned to the payload capacity (64 bytes); an absent key reads as "no
//! payload" and the coordinator decides what to install. Every write is
//! recorded in a modified-address set for observability.

use std::collections::{BTreeSet, HashMap};

use crate::cache::{InQuery, Operation, OutQuery};
use crate::common::{Block, BLOCK_WORDS, WORD_BYTES};
use crate::config::MemoryInitMode;

/// Memory granule size in bytes: one full payload.
pub const MEMORY_BLOCK_BYTES: u64 = (BLOCK_WORDS * WORD_BYTES) as u64;

/// End of the address window preallocated by [`MemoryModel::initialize`].
pub const INIT_WINDOW_END: u64 = 0x1000;

/// Flat main memory backed by a sparse map.
#[derive(Debug, Default)]
pub struct MemoryModel {
    cells: HashMap<u64, Block>,
    modified: BTreeSet<u64>,
}

impl MemoryModel {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// `addr` masked to memory granularity.
    pub fn align(addr: u64) -> u64 {
        addr & !(MEMORY_BLOCK_BYTES - 1)
    }

    /// Prepopulates the `0..0x1000` window in granule strides.
    ///
    /// `Zeros` fills each granule with zero words; `Addresses` sets each
    /// word to its own byte address.
    pub fn initialize(&mut self, mode: MemoryInitMode) {
        self.cells.clear();
        self.modified.clear();

        let mut addr = 0;
        while addr < INIT_WINDOW_END {
            let block = match mode {
                MemoryInitMode::Zeros => Block::zeroed(),
                MemoryInitMode::Addresses => {
                    let mut block = Block::zeroed();
                    for i in 0..BLOCK_WORDS {
                        block.set(i, (addr + (i * WORD_BYTES) as u64) as u32);
                    }
                    block
                }
            };
            let _ = self.cells.insert(addr, block);
            addr += MEMORY_BLOCK_BYTES;
        }
    }

    /// Services one request. Memory is the backstop: the result always
    /// reports a hit.
    ///
    /// Reads return a copy of the stored payload, or no payload when the
    /// aligned key is absent. Writes insert or overwrite the aligned granule
    /// and record the address as modified.
    pub fn query(&mut self, query: &InQuery) -> OutQuery {
        let aligned = Self::align(query.addr);
        let mut result = OutQuery {
            hit: true,
            ..OutQuery::default()
        };

        match query.op {
            Operation::Read => {
                result.data = self.cells.get(&aligned).cloned();
                tracing::trace!(
                    addr = query.addr,
                    aligned,
                    present = result.data.is_some(),
                    "memory read"
                );
            }
            Operation::Write => {
                let _ = self.cells.insert(aligned, query.data.clone());
                let _ = self.modified.insert(aligned);
                tracing::trace!(addr = query.addr, aligned, "memory write");
            }
        }
        result
    }

    /// The payload stored at the granule holding `addr`, if any.
    pub fn get(&self, addr: u64) -> Option<&Block> {
        self.cells.get(&Self::align(addr))
    }

    /// Aligned addresses that have ever been written, in ascending order.
    pub fn modified(&self) -> impl Iterator<Item = u64> + '_ {
        self.modified.iter().copied()
    }

    /// Prints the contents of every ever-modified granule to stdout.
    ///
    /// Silent when nothing has been written yet.
    pub fn print_modified(&self) {
        if self.modified.is_empty() {
            return;
        }

        println!("Modified Memory Contents");
        println!("Address | Data");
        for addr in &self.modified {
            if let Some(block) = self.cells.get(addr) {
                println!("{addr:#010x} | {block}");
            }
        }
    }
}
