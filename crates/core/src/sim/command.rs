//! Command Parsing.
//!
//! Line-oriented grammar accepted by the driver:
//!
//! ```text
//! ld <dec-size> <hex-addr>
//! st <dec-size> <hex-addr> <hex-val> <hex-val> ...
//! show
//! ```
//!
//! `size` is in bytes; a store must supply exactly `size / 4` values. Blank
//! lines and `#` comments parse to nothing. Anything else is a
//! [`CommandError`] — the driver reports it and skips the line.

use crate::common::{Block, CommandError, WORD_BYTES};

/// One parsed driver command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `ld`: read `size` bytes at `addr`.
    Load {
        /// Request size in bytes.
        size: usize,
        /// Byte address.
        addr: u64,
    },
    /// `st`: write the payload at `addr`.
    Store {
        /// Request size in bytes.
        size: usize,
        /// Byte address.
        addr: u64,
        /// Payload built from the supplied values.
        data: Block,
    },
    /// `show`: print cache and modified-memory state.
    Show,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] for an unknown verb, a missing or
    /// unparseable operand, or a store whose value count does not match its
    /// byte size.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let mut tokens = line.split_whitespace();
        let verb = match tokens.next() {
            Some(verb) => verb,
            None => return Ok(None),
        };

        match verb {
            "show" => Ok(Some(Self::Show)),
            "ld" | "st" => {
                let size_token = tokens.next().ok_or(CommandError::MissingOperand("size"))?;
                let size = size_token
                    .parse::<usize>()
                    .map_err(|_| CommandError::InvalidSize(size_token.to_string()))?;
                let addr_token = tokens.next().ok_or(CommandError::MissingOperand("address"))?;
                let addr = parse_hex(addr_token)
                    .ok_or_else(|| CommandError::InvalidAddress(addr_token.to_string()))?;

                if verb == "ld" {
                    return Ok(Some(Self::Load { size, addr }));
                }

                let mut values = Vec::new();
                for token in tokens {
                    let value = parse_hex(token)
                        .ok_or_else(|| CommandError::InvalidValue(token.to_string()))?;
                    values.push(value as u32);
                }
                let expected = size / WORD_BYTES;
                if values.len() != expected {
                    return Err(CommandError::ValueCountMismatch {
                        expected,
                        got: values.len(),
                    });
                }

                Ok(Some(Self::Store {
                    size,
                    addr,
                    data: Block::from_words(&values),
                }))
            }
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Parses a hexadecimal token with an optional `0x` prefix.
fn parse_hex(token: &str) -> Option<u64> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u64::from_str_radix(digits, 16).ok()
}
