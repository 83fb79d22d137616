//! Growable tail blocks.
//!
//! [`FixedArena::grow_last`] only works on the block that ends at the
//! cursor. A [`Tail`] makes that structural: it holds the arena's only
//! `&mut` borrow, so while it is alive nothing else can allocate and its
//! block is always the last one.

use pouch_core::ArenaError;

use crate::fixed::{FixedArena, Storage};
use crate::handle::Block;

/// Exclusive token for the arena's most recent block.
///
/// Created by [`FixedArena::begin_tail`]. Growth never moves existing
/// bytes; [`finish`](Tail::finish) releases the arena and returns the
/// final block.
#[must_use]
pub struct Tail<'a, S> {
    arena: &'a mut FixedArena<S>,
    block: Block,
}

impl<'a, S: Storage> Tail<'a, S> {
    pub(crate) fn new(arena: &'a mut FixedArena<S>, initial: usize) -> Result<Self, ArenaError> {
        let block = arena.alloc(initial)?;
        Ok(Self { arena, block })
    }

    /// The block as it currently stands.
    pub fn block(&self) -> Block {
        self.block
    }

    /// Current length in bytes.
    pub fn len(&self) -> usize {
        self.block.len()
    }

    /// Whether the block is empty.
    pub fn is_empty(&self) -> bool {
        self.block.is_empty()
    }

    /// Grow by `additional` bytes.
    ///
    /// On `CapacityExceeded` the block keeps its previous length.
    pub fn grow(&mut self, additional: usize) -> Result<(), ArenaError> {
        let new_size = self
            .block
            .len()
            .checked_add(additional)
            .ok_or(ArenaError::CapacityExceeded {
                requested: additional,
                remaining: self.arena.remaining(),
                capacity: self.arena.capacity(),
            })?;
        self.grow_to(new_size)
    }

    /// Grow to exactly `new_size` bytes.
    pub fn grow_to(&mut self, new_size: usize) -> Result<(), ArenaError> {
        self.block = self.arena.grow_last(self.block, new_size)?;
        Ok(())
    }

    /// The block's bytes.
    pub fn bytes(&self) -> &[u8] {
        self.arena.tail_bytes(&self.block)
    }

    /// The block's bytes, mutably.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.arena.tail_bytes_mut(&self.block)
    }

    /// Release the arena and return the final block.
    pub fn finish(self) -> Block {
        self.block
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArenaConfig;

    #[test]
    fn bytes_reflects_growth() {
        let mut arena = FixedArena::new(32);
        let mut tail = arena.begin_tail(1).unwrap();
        tail.bytes_mut()[0] = b'x';
        assert_eq!(tail.bytes(), b"x");
        tail.grow(2).unwrap();
        tail.bytes_mut()[1..].copy_from_slice(b"yz");
        assert_eq!(tail.bytes(), b"xyz");
        assert_eq!(tail.bytes().len(), tail.len());
    }

    #[test]
    fn tail_grows_contiguously() {
        let mut arena = FixedArena::new(64);
        let mut tail = arena.begin_tail(2).unwrap();
        tail.bytes_mut().copy_from_slice(b"ab");
        tail.grow(3).unwrap();
        tail.bytes_mut()[2..].copy_from_slice(b"cde");
        let block = tail.finish();
        assert_eq!(block.len(), 5);
        assert_eq!(arena.bytes(&block).unwrap(), b"abcde");
        assert_eq!(arena.size(), 5);
    }

    #[test]
    fn tail_starts_aligned() {
        let config = ArenaConfig::new(64).with_alignment(8);
        let mut arena = FixedArena::with_config(config).unwrap();
        arena.alloc(3).unwrap();
        let tail = arena.begin_tail(0).unwrap();
        assert_eq!(tail.block().offset(), 8);
        assert!(tail.is_empty());
    }

    #[test]
    fn failed_grow_keeps_previous_length() {
        let mut arena = FixedArena::new(4);
        let mut tail = arena.begin_tail(3).unwrap();
        assert!(matches!(
            tail.grow(2),
            Err(ArenaError::CapacityExceeded { .. })
        ));
        assert_eq!(tail.len(), 3);
        tail.grow(1).unwrap();
        assert_eq!(tail.len(), 4);
    }

    #[test]
    fn grow_overflow_reports_capacity() {
        let mut arena = FixedArena::new(4);
        let mut tail = arena.begin_tail(1).unwrap();
        assert!(matches!(
            tail.grow(usize::MAX),
            Err(ArenaError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn grow_to_smaller_is_rejected() {
        let mut arena = FixedArena::new(16);
        let mut tail = arena.begin_tail(4).unwrap();
        assert!(matches!(
            tail.grow_to(1),
            Err(ArenaError::ShrinkRequested { .. })
        ));
    }

    #[test]
    fn begin_tail_fails_when_full() {
        let mut arena = FixedArena::new(2);
        assert!(arena.begin_tail(3).is_err());
    }

    #[test]
    fn arena_usable_after_finish() {
        let mut arena = FixedArena::new(64);
        let first = {
            let mut tail = arena.begin_tail(1).unwrap();
            tail.bytes_mut()[0] = 7;
            tail.finish()
        };
        let second = arena.alloc(1).unwrap();
        assert!(second.offset() >= first.end());
        assert_eq!(arena.bytes(&first).unwrap(), &[7]);
    }
}
