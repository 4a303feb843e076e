//! Error types.
//!
//! Two error families exist in the simulator:
//! 1. **Configuration errors:** geometry violations detected when a cache
//!    level is constructed. These are fatal; the driver aborts.
//! 2. **Command errors:** malformed input lines. These are reported to
//!    stderr, the line is skipped, and processing continues.

use thiserror::Error;

/// Construction-time configuration failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Block size must be a non-zero power of two so the offset field is a
    /// whole number of bits.
    #[error("block size {0} is not a power of two")]
    BlockSizeNotPowerOfTwo(usize),

    /// Associativity of zero leaves no way to hold a block.
    #[error("associativity must be non-zero")]
    ZeroAssociativity,

    /// Capacity must split evenly into `block_bytes * ways` sets.
    #[error("capacity {size_bytes} is not divisible by block size {block_bytes} x {ways} ways")]
    IndivisibleCapacity {
        /// Total capacity in bytes.
        size_bytes: usize,
        /// Block size in bytes.
        block_bytes: usize,
        /// Associativity.
        ways: usize,
    },

    /// The derived set count must be a power of two so the index field is a
    /// whole number of bits.
    #[error("set count {0} is not a power of two")]
    SetCountNotPowerOfTwo(usize),

    /// The address width cannot hold the offset and index fields.
    #[error("address width {addr_bits} bits is smaller than the {needed} geometry bits")]
    AddressWidthTooSmall {
        /// Configured address width.
        addr_bits: u32,
        /// Bits required by offset + index.
        needed: u32,
    },
}

/// A rejected driver command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The verb is not one of `ld`, `st`, `show`.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A command was missing its size or address operand.
    #[error("missing operand: {0}")]
    MissingOperand(&'static str),

    /// The size operand did not parse as a decimal byte count.
    #[error("invalid size `{0}`")]
    InvalidSize(String),

    /// The address operand did not parse as hexadecimal.
    #[error("invalid address `{0}`")]
    InvalidAddress(String),

    /// A store value did not parse as hexadecimal.
    #[error("invalid value `{0}`")]
    InvalidValue(String),

    /// A store supplied the wrong number of values for its byte size.
    #[error("size mismatch: expected {expected} values, got {got}")]
    ValueCountMismatch {
        /// Values implied by the byte size.
        expected: usize,
        /// Values actually supplied.
        got: usize,
    },
}
