//! Fixed-capacity bump arena.
//!
//! A [`FixedArena`] owns one byte buffer and a cursor that only moves
//! forward. Allocation rounds the cursor up to the arena's alignment and
//! bumps it; nothing is ever freed individually. [`FixedArena::reset`]
//! rewinds the cursor to zero and advances the generation, which
//! invalidates every handle issued before it.

use std::fmt;
use std::ops::Range;

use pouch_core::{ArenaError, Generation};
use tracing::{debug, trace};

use crate::config::{validate_alignment, ArenaConfig};
use crate::handle::{Block, StringHandle};
use crate::string::StringBuilder;
use crate::tail::Tail;

/// Byte storage an arena can be built over.
///
/// Implemented for anything that exposes a mutable byte slice: boxed
/// slices, inline arrays, `Vec<u8>`, and borrowed `&mut [u8]` regions.
/// The arena never resizes its storage, so the length observed at
/// construction is the capacity for the arena's whole life.
pub trait Storage: AsRef<[u8]> + AsMut<[u8]> {}

impl<T: AsRef<[u8]> + AsMut<[u8]> + ?Sized> Storage for T {}

/// A bump arena over a fixed-size byte buffer.
///
/// # Invariants
///
/// - `0 <= size() <= capacity()` at all times.
/// - `size()` never decreases except through [`reset`](Self::reset).
/// - Blocks returned by [`alloc`](Self::alloc) within one generation are
///   pairwise disjoint and ordered by offset.
///
/// The arena is single-owner: every mutating call takes `&mut self`.
/// [`Tail`] and [`StringBuilder`] hold that exclusive borrow for their
/// whole life, so no unrelated allocation can land between a growable
/// block and the cursor.
pub struct FixedArena<S = Box<[u8]>> {
    /// Backing storage. Never resized.
    storage: S,
    /// Total usable bytes (`storage.len()` at construction).
    capacity: usize,
    /// Bump pointer: offset of the next free byte.
    cursor: usize,
    /// Power-of-two boundary applied by `alloc`.
    alignment: usize,
    /// Incremented on every reset.
    generation: Generation,
    /// Largest cursor value ever reached, across resets.
    peak: usize,
}

impl FixedArena {
    /// Create a heap-backed arena of `capacity` bytes.
    ///
    /// A capacity of zero is raised to [`ArenaConfig::MIN_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(ArenaConfig::MIN_CAPACITY);
        Self::from_parts(
            vec![0u8; capacity].into_boxed_slice(),
            ArenaConfig::DEFAULT_ALIGNMENT,
        )
    }

    /// Create a heap-backed arena from a validated config.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let capacity = config.effective_capacity();
        Ok(Self::from_parts(
            vec![0u8; capacity].into_boxed_slice(),
            config.alignment,
        ))
    }
}

impl<const N: usize> FixedArena<[u8; N]> {
    /// Create an arena whose buffer is embedded inline, with no heap use.
    ///
    /// `N` is the capacity. A zero-sized buffer cannot hold even the
    /// minimum one byte, so `N == 0` fails to compile.
    pub fn inline() -> Self {
        const {
            assert!(
                N >= ArenaConfig::MIN_CAPACITY,
                "inline arena needs at least one byte"
            )
        };
        Self::from_parts([0u8; N], ArenaConfig::DEFAULT_ALIGNMENT)
    }
}

impl<const N: usize> Default for FixedArena<[u8; N]> {
    fn default() -> Self {
        Self::inline()
    }
}

impl<S: Storage> FixedArena<S> {
    /// Build an arena over caller-provided storage with the default
    /// alignment.
    ///
    /// Returns `InvalidConfig` if the storage is empty.
    pub fn from_buffer(storage: S) -> Result<Self, ArenaError> {
        Self::from_buffer_aligned(storage, ArenaConfig::DEFAULT_ALIGNMENT)
    }

    /// Build an arena over caller-provided storage with an explicit
    /// alignment.
    pub fn from_buffer_aligned(storage: S, alignment: usize) -> Result<Self, ArenaError> {
        validate_alignment(alignment)?;
        let len = storage.as_ref().len();
        if len < ArenaConfig::MIN_CAPACITY {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "buffer must hold at least {} byte (got {len})",
                    ArenaConfig::MIN_CAPACITY
                ),
            });
        }
        Ok(Self::from_parts(storage, alignment))
    }

    fn from_parts(storage: S, alignment: usize) -> Self {
        let capacity = storage.as_ref().len();
        Self {
            storage,
            capacity,
            cursor: 0,
            alignment,
            generation: Generation::INITIAL,
            peak: 0,
        }
    }

    /// Total bytes available. Constant for the arena's life.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, alignment padding included.
    pub fn size(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor
    }

    /// The alignment boundary applied by [`alloc`](Self::alloc).
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// The current generation. Advances on every reset.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The highest `size()` ever observed, including before resets.
    ///
    /// Useful for sizing the buffer of a constrained target after a
    /// representative workload.
    pub fn peak(&self) -> usize {
        self.peak
    }

    /// Allocate `n` bytes at the next aligned offset.
    ///
    /// The cursor is rounded up to [`alignment`](Self::alignment) first.
    /// If the request then does not fit, `CapacityExceeded` is returned
    /// and the cursor stays at its aligned position: the padding is spent
    /// even though nothing was allocated. When the padding alone would run
    /// past the end, the cursor stops at `capacity` and every request,
    /// including a zero-byte one, fails.
    pub fn alloc(&mut self, n: usize) -> Result<Block, ArenaError> {
        if !self.align_cursor() {
            debug!(
                requested = n,
                capacity = self.capacity,
                "alignment padding ran past the end of the arena"
            );
            return Err(ArenaError::CapacityExceeded {
                requested: n,
                remaining: 0,
                capacity: self.capacity,
            });
        }
        let offset = self.reserve(n)?;
        Ok(Block::new(self.generation, offset, n))
    }

    /// Allocate a block and copy `src` into it.
    pub fn alloc_bytes(&mut self, src: &[u8]) -> Result<Block, ArenaError> {
        let block = self.alloc(src.len())?;
        self.storage.as_mut()[block.range()].copy_from_slice(src);
        Ok(block)
    }

    /// Extend the arena's most recent block to `new_size` bytes in place.
    ///
    /// The block must end exactly at the cursor. Growth does not realign:
    /// the new bytes follow the old ones contiguously, and the returned
    /// block has the same start as `block`.
    ///
    /// # Errors
    ///
    /// - `StaleHandle` if `block` predates the last reset.
    /// - `NotTail` if anything was allocated after `block`.
    /// - `ShrinkRequested` if `new_size < block.len()`.
    /// - `CapacityExceeded` if the extra bytes do not fit.
    ///
    /// On any error the arena is left untouched.
    pub fn grow_last(&mut self, block: Block, new_size: usize) -> Result<Block, ArenaError> {
        self.check_generation(&block)?;
        if block.end() != self.cursor {
            debug!(
                block_end = block.end(),
                cursor = self.cursor,
                "grow_last on a block that is not the tail"
            );
            return Err(ArenaError::NotTail {
                block_end: block.end(),
                cursor: self.cursor,
            });
        }
        let delta = new_size
            .checked_sub(block.len())
            .ok_or(ArenaError::ShrinkRequested {
                old_size: block.len(),
                new_size,
            })?;
        self.reserve(delta)?;
        Ok(block.with_len(new_size))
    }

    /// Open an aligned block of `initial` bytes that can later be grown in
    /// place.
    ///
    /// The returned [`Tail`] borrows the arena exclusively until it is
    /// finished or dropped.
    pub fn begin_tail(&mut self, initial: usize) -> Result<Tail<'_, S>, ArenaError> {
        Tail::new(self, initial)
    }

    /// Begin building a NUL-terminated string at the end of the arena.
    ///
    /// If the arena cannot reserve the terminator byte, the builder starts
    /// out invalid and the failure is reported by
    /// [`StringBuilder::finalize`].
    pub fn start_string(&mut self) -> StringBuilder<'_, S> {
        StringBuilder::new(self)
    }

    /// Rewind the cursor to zero.
    ///
    /// Every handle issued before this call becomes stale and is rejected
    /// by the accessors. Memory is not scrubbed.
    pub fn reset(&mut self) {
        trace!(
            generation = self.generation.0,
            used = self.cursor,
            "arena reset"
        );
        self.cursor = 0;
        self.generation = self.generation.next();
    }

    /// Shared access to a block's bytes.
    pub fn bytes(&self, block: &Block) -> Result<&[u8], ArenaError> {
        let range = self.resolve(block)?;
        Ok(&self.storage.as_ref()[range])
    }

    /// Mutable access to a block's bytes.
    pub fn bytes_mut(&mut self, block: &Block) -> Result<&mut [u8], ArenaError> {
        let range = self.resolve(block)?;
        Ok(&mut self.storage.as_mut()[range])
    }

    /// The bytes of a finalized string, without the terminator.
    pub fn string(&self, handle: &StringHandle) -> Result<&[u8], ArenaError> {
        let bytes = self.string_with_nul(handle)?;
        Ok(&bytes[..handle.len()])
    }

    /// The bytes of a finalized string, terminator included.
    pub fn string_with_nul(&self, handle: &StringHandle) -> Result<&[u8], ArenaError> {
        self.bytes(&handle.block())
    }

    /// A finalized string as `&str`.
    ///
    /// Returns `NotUtf8` if the appended bytes are not valid UTF-8.
    pub fn str(&self, handle: &StringHandle) -> Result<&str, ArenaError> {
        let bytes = self.string(handle)?;
        std::str::from_utf8(bytes).map_err(|e| ArenaError::NotUtf8 {
            valid_up_to: e.valid_up_to(),
        })
    }

    /// Unchecked view of the reserved region for a live tail.
    pub(crate) fn tail_bytes(&self, block: &Block) -> &[u8] {
        &self.storage.as_ref()[block.range()]
    }

    pub(crate) fn tail_bytes_mut(&mut self, block: &Block) -> &mut [u8] {
        &mut self.storage.as_mut()[block.range()]
    }

    /// Round the cursor up to the alignment. Returns `false` if the aligned
    /// offset lies past the end, in which case the cursor is clamped to
    /// `capacity`.
    fn align_cursor(&mut self) -> bool {
        let aligned = self.cursor.checked_next_multiple_of(self.alignment);
        let fits = matches!(aligned, Some(at) if at <= self.capacity);
        self.cursor = aligned.map_or(self.capacity, |at| at.min(self.capacity));
        self.peak = self.peak.max(self.cursor);
        fits
    }

    /// Bump the cursor by `n` bytes without realigning.
    fn reserve(&mut self, n: usize) -> Result<usize, ArenaError> {
        let start = self.cursor;
        let end = match start.checked_add(n) {
            Some(end) if end <= self.capacity => end,
            _ => {
                debug!(
                    requested = n,
                    remaining = self.remaining(),
                    capacity = self.capacity,
                    "arena capacity exceeded"
                );
                return Err(ArenaError::CapacityExceeded {
                    requested: n,
                    remaining: self.remaining(),
                    capacity: self.capacity,
                });
            }
        };
        self.cursor = end;
        self.peak = self.peak.max(end);
        Ok(start)
    }

    fn check_generation(&self, block: &Block) -> Result<(), ArenaError> {
        if block.generation() != self.generation {
            return Err(ArenaError::StaleHandle {
                handle_generation: block.generation(),
                current: self.generation,
            });
        }
        Ok(())
    }

    fn resolve(&self, block: &Block) -> Result<Range<usize>, ArenaError> {
        self.check_generation(block)?;
        if block.end() > self.cursor {
            return Err(ArenaError::OutOfBounds {
                offset: block.offset(),
                len: block.len(),
                limit: self.cursor,
            });
        }
        Ok(block.range())
    }
}

impl<S> fmt::Debug for FixedArena<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixedArena")
            .field("capacity", &self.capacity)
            .field("size", &self.cursor)
            .field("alignment", &self.alignment)
            .field("generation", &self.generation)
            .field("peak", &self.peak)
            .finish()
    }
}
