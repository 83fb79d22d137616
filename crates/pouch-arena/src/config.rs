//! Arena configuration parameters.

use pouch_core::ArenaError;

/// Configuration for a heap-backed [`FixedArena`](crate::FixedArena).
///
/// Controls the buffer size and the allocation alignment. Validated at
/// construction; both values are immutable once the arena exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Requested buffer size in bytes.
    ///
    /// Requests below [`ArenaConfig::MIN_CAPACITY`] are raised to it
    /// rather than rejected.
    pub capacity: usize,

    /// Boundary that [`FixedArena::alloc`](crate::FixedArena::alloc)
    /// rounds the cursor up to before each allocation.
    ///
    /// Default: the platform pointer alignment. Must be a power of two.
    pub alignment: usize,
}

impl ArenaConfig {
    /// Smallest capacity an arena can have.
    pub const MIN_CAPACITY: usize = 1;

    /// Default allocation alignment: one machine word.
    pub const DEFAULT_ALIGNMENT: usize = std::mem::align_of::<usize>();

    /// Default capacity used by [`ArenaConfig::default`].
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create a config for the given capacity with the default alignment.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            alignment: Self::DEFAULT_ALIGNMENT,
        }
    }

    /// Replace the allocation alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// The capacity an arena built from this config will actually have.
    pub fn effective_capacity(&self) -> usize {
        self.capacity.max(Self::MIN_CAPACITY)
    }

    /// Check the config, returning `InvalidConfig` on the first problem.
    pub fn validate(&self) -> Result<(), ArenaError> {
        validate_alignment(self.alignment)
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

pub(crate) fn validate_alignment(alignment: usize) -> Result<(), ArenaError> {
    if !alignment.is_power_of_two() {
        return Err(ArenaError::InvalidConfig {
            reason: format!("alignment must be a power of two (got {alignment})"),
        });
    }
    Ok(())
}
