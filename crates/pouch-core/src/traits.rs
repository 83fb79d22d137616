//! Core abstraction traits for building strings inside a memory pool.

use crate::error::ArenaError;

/// An in-progress string being assembled one byte at a time.
///
/// Implementations are transient: they are created by
/// [`StringPool::start_string`], fed with [`append`](StringSink::append)
/// and consumed by [`finalize`](StringSink::finalize). Failures are
/// sticky and only surface at `finalize`.
pub trait StringSink {
    /// The stable reference produced by a successful `finalize`.
    type Output;

    /// Append one byte. A no-op once the sink has failed.
    fn append(&mut self, byte: u8);

    /// Terminate the string and return a handle to it.
    fn finalize(self) -> Result<Self::Output, ArenaError>;
}

/// A memory pool that can build strings in place.
///
/// Consumers that are generic over the pool type (parsers, document
/// builders) go through this trait instead of naming a concrete arena.
pub trait StringPool {
    /// The builder type. It borrows the pool exclusively, so no other
    /// allocation can be issued while a string is open.
    type Builder<'a>: StringSink
    where
        Self: 'a;

    /// Begin a new string at the pool's current end.
    fn start_string(&mut self) -> Self::Builder<'_>;
}
