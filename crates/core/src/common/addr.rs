//! Address Geometry.
//!
//! Every cache level decomposes addresses with its own bit budget:
//! `offset_bits` low bits select a byte within a block, the next
//! `index_bits` select the set, and the remaining `tag_bits` distinguish
//! blocks that map to the same set. Levels with different geometries compute
//! tags independently; reconstruction always uses the level's own widths.

use super::error::ConfigError;

/// Per-level address decomposition.
///
/// Derived once at cache construction from capacity, block size,
/// associativity, and address width. All derived widths are exact:
/// construction fails if any field would be fractional.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    block_bytes: u64,
    num_sets: u64,
    offset_bits: u32,
    index_bits: u32,
    tag_bits: u32,
}

impl Geometry {
    /// Derives the geometry for a cache level.
    ///
    /// # Arguments
    ///
    /// * `size_bytes` - Total capacity in bytes.
    /// * `block_bytes` - Block size in bytes (power of two).
    /// * `ways` - Associativity (non-zero).
    /// * `addr_bits` - Address width in bits.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the block size or derived set count is
    /// not a power of two, the associativity is zero, the capacity is not
    /// divisible by `block_bytes * ways`, or the address width cannot hold
    /// the offset and index fields.
    pub fn new(
        size_bytes: usize,
        block_bytes: usize,
        ways: usize,
        addr_bits: u32,
    ) -> Result<Self, ConfigError> {
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if block_bytes == 0 || !block_bytes.is_power_of_two() {
            return Err(ConfigError::BlockSizeNotPowerOfTwo(block_bytes));
        }
        if size_bytes == 0 || size_bytes % (block_bytes * ways) != 0 {
            return Err(ConfigError::IndivisibleCapacity {
                size_bytes,
                block_bytes,
                ways,
            });
        }

        let num_sets = size_bytes / (block_bytes * ways);
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::SetCountNotPowerOfTwo(num_sets));
        }

        let offset_bits = block_bytes.trailing_zeros();
        let index_bits = num_sets.trailing_zeros();
        if addr_bits < offset_bits + index_bits {
            return Err(ConfigError::AddressWidthTooSmall {
                addr_bits,
                needed: offset_bits + index_bits,
            });
        }

        Ok(Self {
            block_bytes: block_bytes as u64,
            num_sets: num_sets as u64,
            offset_bits,
            index_bits,
            tag_bits: addr_bits - offset_bits - index_bits,
        })
    }

    /// Block size in bytes.
    pub fn block_bytes(&self) -> u64 {
        self.block_bytes
    }

    /// Number of sets.
    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    /// Width of the byte-offset field in bits.
    pub fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Width of the set-index field in bits.
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Width of the tag field in bits.
    pub fn tag_bits(&self) -> u32 {
        self.tag_bits
    }

    /// Byte offset of `addr` within its block.
    pub fn offset(&self, addr: u64) -> u64 {
        addr % self.block_bytes
    }

    /// Set index `addr` maps to.
    pub fn index(&self, addr: u64) -> u64 {
        (addr / self.block_bytes) % self.num_sets
    }

    /// Tag of `addr` at this level.
    pub fn tag(&self, addr: u64) -> u64 {
        addr / (self.block_bytes * self.num_sets)
    }

    /// `addr` rounded down to the start of its block.
    pub fn align(&self, addr: u64) -> u64 {
        addr & !(self.block_bytes - 1)
    }

    /// Rebuilds the block-aligned address of a `(tag, index)` pair.
    ///
    /// This is the inverse of [`tag`](Self::tag)/[`index`](Self::index) for
    /// a zero offset; eviction write-backs use it to address the victim.
    pub fn reconstruct(&self, tag: u64, index: u64) -> u64 {
        (tag << (self.offset_bits + self.index_bits)) | (index << self.offset_bits)
    }
}
