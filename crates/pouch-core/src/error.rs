//! Error types for Pouch arenas.
//!
//! Every fallible arena operation reports through [`ArenaError`]. Running
//! out of capacity is an ordinary, recoverable result; nothing in the
//! arena aborts or panics on exhaustion.

use std::error::Error;
use std::fmt;

use crate::id::Generation;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The request does not fit in the arena's fixed capacity.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes still free at the time of the request (after any
        /// alignment padding was consumed).
        remaining: usize,
        /// Total capacity of the arena.
        capacity: usize,
    },
    /// A string builder whose initial reservation or a later growth
    /// failed. Sticky: the builder never recovers.
    InvalidBuilder,
    /// A handle issued before the most recent `reset()`.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: Generation,
        /// The arena's current generation.
        current: Generation,
    },
    /// Attempted to grow a block that is not the arena's most recent
    /// allocation.
    NotTail {
        /// Offset one past the end of the block.
        block_end: usize,
        /// The arena's cursor.
        cursor: usize,
    },
    /// A growth request whose new size is smaller than the old one.
    ShrinkRequested {
        /// Current length of the block.
        old_size: usize,
        /// Requested length.
        new_size: usize,
    },
    /// A handle whose range lies outside the arena's allocated region,
    /// e.g. one issued by a different arena.
    OutOfBounds {
        /// Start offset of the handle.
        offset: usize,
        /// Length of the handle.
        len: usize,
        /// End of the allocated region it was resolved against.
        limit: usize,
    },
    /// A string handle whose bytes are not valid UTF-8.
    NotUtf8 {
        /// Length of the longest valid UTF-8 prefix.
        valid_up_to: usize,
    },
    /// Arena configuration failed validation.
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                remaining,
                capacity,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, \
                     {remaining} of {capacity} bytes remaining"
                )
            }
            Self::InvalidBuilder => write!(f, "string builder ran out of arena space"),
            Self::StaleHandle {
                handle_generation,
                current,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, arena at {current}"
                )
            }
            Self::NotTail { block_end, cursor } => {
                write!(
                    f,
                    "block ending at {block_end} is not the arena tail (cursor {cursor})"
                )
            }
            Self::ShrinkRequested { old_size, new_size } => {
                write!(f, "cannot shrink block from {old_size} to {new_size} bytes")
            }
            Self::OutOfBounds { offset, len, limit } => {
                write!(
                    f,
                    "handle [{offset}, +{len}) outside allocated region of {limit} bytes"
                )
            }
            Self::NotUtf8 { valid_up_to } => {
                write!(f, "string is not valid UTF-8 after byte {valid_up_to}")
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}
