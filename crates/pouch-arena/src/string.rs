//! In-place, byte-at-a-time string building.
//!
//! [`StringBuilder`] assembles a string of unknown length at the end of a
//! [`FixedArena`] without copying: each appended byte grows the tail block
//! by one. The block always ends with one reserved byte for the NUL
//! terminator, so [`finalize`](StringBuilder::finalize) never has to
//! allocate.
//!
//! ```text
//!  start                         cursor
//!    │ h │ e │ l │ l │ o │ ░ │
//!    └────── len = 5 ──────┘ └─ terminator slot
//! ```

use std::fmt;

use pouch_core::{ArenaError, StringSink};
use tracing::debug;

use crate::fixed::{FixedArena, Storage};
use crate::handle::StringHandle;
use crate::tail::Tail;

/// A single-use builder for a NUL-terminated string inside an arena.
///
/// Created by [`FixedArena::start_string`]. The builder borrows the arena
/// exclusively, so no other allocation can interleave with it:
///
/// ```compile_fail
/// use pouch_arena::FixedArena;
///
/// let mut arena = FixedArena::new(64);
/// let mut a = arena.start_string();
/// let b = arena.start_string(); // arena is already borrowed by `a`
/// a.append(b'x');
/// ```
///
/// Running out of space is sticky: the builder turns invalid, later
/// appends are ignored, and [`finalize`](Self::finalize) reports
/// `InvalidBuilder`.
pub struct StringBuilder<'a, S> {
    /// `None` once a reservation has failed.
    tail: Option<Tail<'a, S>>,
    /// Bytes appended so far, terminator excluded.
    len: usize,
}

impl<'a, S: Storage> StringBuilder<'a, S> {
    pub(crate) fn new(arena: &'a mut FixedArena<S>) -> Self {
        let tail = match Tail::new(arena, 1) {
            Ok(tail) => Some(tail),
            Err(e) => {
                debug!(error = %e, "string builder could not reserve terminator");
                None
            }
        };
        Self { tail, len: 0 }
    }

    /// Append one byte. Ignored once the builder is invalid.
    pub fn append(&mut self, byte: u8) {
        let Some(tail) = self.tail.as_mut() else {
            return;
        };
        if let Err(e) = tail.grow(1) {
            debug!(error = %e, len = self.len, "string builder invalidated");
            self.tail = None;
            return;
        }
        // The old terminator slot takes the byte; the new last byte is
        // the next terminator slot.
        tail.bytes_mut()[self.len] = byte;
        self.len += 1;
    }

    /// Append every byte of `bytes`, stopping early if the builder fails.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if !self.is_valid() {
                return;
            }
            self.append(b);
        }
    }

    /// Bytes appended so far, excluding the terminator.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every reservation so far has succeeded.
    pub fn is_valid(&self) -> bool {
        self.tail.is_some()
    }

    /// Write the terminator and return a handle to the finished string.
    pub fn finalize(self) -> Result<StringHandle, ArenaError> {
        let mut tail = self.tail.ok_or(ArenaError::InvalidBuilder)?;
        tail.bytes_mut()[self.len] = 0;
        Ok(StringHandle::new(tail.finish()))
    }
}

impl<S: Storage> fmt::Write for StringBuilder<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.push_bytes(s.as_bytes());
        if self.is_valid() {
            Ok(())
        } else {
            Err(fmt::Error)
        }
    }
}

impl<S: Storage> StringSink for StringBuilder<'_, S> {
    type Output = StringHandle;

    fn append(&mut self, byte: u8) {
        StringBuilder::append(self, byte);
    }

    fn finalize(self) -> Result<StringHandle, ArenaError> {
        StringBuilder::finalize(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn builds_hello() {
        let mut arena = FixedArena::new(8);
        let mut sb = arena.start_string();
        for &b in b"hello" {
            sb.append(b);
        }
        assert_eq!(sb.len(), 5);
        let h = sb.finalize().unwrap();
        assert_eq!(h.len(), 5);
        assert_eq!(arena.string(&h).unwrap(), b"hello");
        assert_eq!(arena.string_with_nul(&h).unwrap(), b"hello\0");
        assert_eq!(arena.str(&h).unwrap(), "hello");
    }

    #[test]
    fn empty_string_is_terminated() {
        let mut arena = FixedArena::new(8);
        let h = arena.start_string().finalize().unwrap();
        assert!(h.is_empty());
        assert_eq!(arena.string_with_nul(&h).unwrap(), b"\0");
        assert_eq!(arena.size(), 1);
    }

    #[test]
    fn uses_exactly_len_plus_one_bytes() {
        let mut arena = FixedArena::new(32);
        let mut sb = arena.start_string();
        sb.push_bytes(b"abc");
        let h = sb.finalize().unwrap();
        assert_eq!(h.offset(), 0);
        assert_eq!(arena.size(), 4);
    }

    #[test]
    fn overflow_invalidates_and_finalize_fails() {
        let mut arena = FixedArena::new(4);
        let mut sb = arena.start_string();
        sb.push_bytes(b"abc");
        assert!(sb.is_valid());
        sb.append(b'd');
        assert!(!sb.is_valid());
        assert_eq!(sb.finalize(), Err(ArenaError::InvalidBuilder));
    }

    #[test]
    fn invalid_builder_ignores_later_appends() {
        let mut arena = FixedArena::new(2);
        let mut sb = arena.start_string();
        sb.append(b'a');
        sb.append(b'b');
        assert!(!sb.is_valid());
        let len = sb.len();
        sb.append(b'c');
        assert_eq!(sb.len(), len);
        assert!(sb.finalize().is_err());
    }

    #[test]
    fn failed_initial_reservation_defers_error() {
        let mut arena = FixedArena::new(1);
        arena.alloc(1).unwrap();
        let mut sb = arena.start_string();
        assert!(!sb.is_valid());
        sb.append(b'x');
        assert!(sb.is_empty());
        assert_eq!(sb.finalize(), Err(ArenaError::InvalidBuilder));
    }

    #[test]
    fn strings_built_back_to_back_do_not_overlap() {
        let mut arena = FixedArena::new(64);
        let mut sb = arena.start_string();
        sb.push_bytes(b"first");
        let a = sb.finalize().unwrap();
        let mut sb = arena.start_string();
        sb.push_bytes(b"second");
        let b = sb.finalize().unwrap();
        assert!(b.offset() >= a.block().end());
        assert_eq!(arena.str(&a).unwrap(), "first");
        assert_eq!(arena.str(&b).unwrap(), "second");
    }

    #[test]
    fn fmt_write_appends_formatted_text() {
        let mut arena = FixedArena::new(64);
        let mut sb = arena.start_string();
        write!(sb, "{}-{}", 12, "ab").unwrap();
        let h = sb.finalize().unwrap();
        assert_eq!(arena.str(&h).unwrap(), "12-ab");
    }

    #[test]
    fn fmt_write_reports_exhaustion() {
        let mut arena = FixedArena::new(4);
        let mut sb = arena.start_string();
        assert!(write!(sb, "too long").is_err());
    }

    #[test]
    fn non_utf8_string_reported() {
        let mut arena = FixedArena::new(8);
        let mut sb = arena.start_string();
        sb.push_bytes(&[b'o', b'k', 0xff]);
        let h = sb.finalize().unwrap();
        assert_eq!(arena.string(&h).unwrap(), &[b'o', b'k', 0xff]);
        assert_eq!(arena.str(&h), Err(ArenaError::NotUtf8 { valid_up_to: 2 }));
    }

    #[test]
    fn handle_stale_after_reset() {
        let mut arena = FixedArena::new(16);
        let mut sb = arena.start_string();
        sb.push_bytes(b"gone");
        let h = sb.finalize().unwrap();
        arena.reset();
        assert!(matches!(
            arena.string(&h),
            Err(ArenaError::StaleHandle { .. })
        ));
    }

    #[test]
    fn string_start_is_aligned() {
        let mut arena = FixedArena::new(64);
        arena.alloc(3).unwrap();
        let h = arena.start_string().finalize().unwrap();
        assert_eq!(h.offset() % arena.alignment(), 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn contents_round_trip_when_they_fit(
                text in proptest::collection::vec(1u8..=255, 0..48),
            ) {
                let mut arena = FixedArena::new(64);
                let mut sb = arena.start_string();
                sb.push_bytes(&text);
                prop_assert_eq!(sb.len(), text.len());
                let h = sb.finalize().unwrap();
                prop_assert_eq!(arena.string(&h).unwrap(), &text[..]);
                prop_assert_eq!(arena.string_with_nul(&h).unwrap()[text.len()], 0);
            }

            #[test]
            fn builder_fails_iff_text_exceeds_capacity(
                capacity in 1usize..32,
                len in 0usize..40,
            ) {
                let mut arena = FixedArena::new(capacity);
                let mut sb = arena.start_string();
                sb.push_bytes(&vec![b'x'; len]);
                let result = sb.finalize();
                prop_assert_eq!(result.is_ok(), len + 1 <= capacity);
            }
        }
    }
}
