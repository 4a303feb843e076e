//! Common types used throughout the cache hierarchy simulator.
//!
//! This module provides the fundamental building blocks shared by all
//! components of the simulator. It includes:
//! 1. **Address Geometry:** Per-level address decomposition into tag, index, and offset.
//! 2. **Block Payload:** The fixed-capacity data unit carried between levels.
//! 3. **Error Handling:** Configuration and command error types.

/// Address geometry (offset/index/tag bit fields) per cache level.
pub mod addr;

/// Block payload carried by queries and stored in cache blocks and memory.
pub mod data;

/// Error types for configuration and driver commands.
pub mod error;

pub use addr::Geometry;
pub use data::{Block, BLOCK_WORDS, WORD_BYTES};
pub use error::{CommandError, ConfigError};
