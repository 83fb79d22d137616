//! Block and string handles.
//!
//! A [`Block`] encodes the location of an allocation within an arena's
//! buffer. It is generation-scoped: the `generation` field lets the arena
//! reject handles from before a `reset()` in O(1) without a lookup table.

use std::fmt;
use std::ops::Range;

use pouch_core::Generation;

/// Location of an allocation within a [`FixedArena`](crate::FixedArena).
///
/// Handles carry no borrow of the arena. They are resolved to bytes through
/// [`FixedArena::bytes`](crate::FixedArena::bytes), which checks the
/// generation and bounds first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Block {
    /// Arena generation when this allocation was made.
    pub(crate) generation: Generation,
    /// Byte offset within the arena buffer.
    pub(crate) offset: usize,
    /// Length of the allocation in bytes.
    pub(crate) len: usize,
}

impl Block {
    pub(crate) fn new(generation: Generation, offset: usize, len: usize) -> Self {
        Self {
            generation,
            offset,
            len,
        }
    }

    /// The generation this handle belongs to.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Byte offset of the first byte.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the allocation in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length allocation.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset one past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The byte range covered by this block.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }

    pub(crate) fn with_len(self, len: usize) -> Self {
        Self { len, ..self }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block(gen={}, off={}, len={})",
            self.generation, self.offset, self.len
        )
    }
}

/// A finalized, NUL-terminated string stored in an arena.
///
/// The underlying block is one byte longer than the string: the last byte
/// is the terminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct StringHandle {
    block: Block,
}

impl StringHandle {
    pub(crate) fn new(block: Block) -> Self {
        debug_assert!(!block.is_empty(), "string block must hold a terminator");
        Self { block }
    }

    /// Length of the string in bytes, excluding the terminator.
    pub fn len(&self) -> usize {
        self.block.len - 1
    }

    /// Whether the string has no bytes before the terminator.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The generation this handle belongs to.
    pub fn generation(&self) -> Generation {
        self.block.generation
    }

    /// Byte offset of the first character.
    pub fn offset(&self) -> usize {
        self.block.offset
    }

    /// The underlying block, terminator included.
    pub fn block(&self) -> Block {
        self.block
    }
}

impl fmt::Display for StringHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StringHandle(gen={}, off={}, len={})",
            self.block.generation,
            self.block.offset,
            self.len()
        )
    }
}
