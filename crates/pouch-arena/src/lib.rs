//! Fixed-capacity bump arenas for Pouch.
//!
//! Serves memory out of one pre-allocated buffer by advancing a cursor.
//! There is no per-block free and no growth of the buffer: the only way
//! to reclaim space is [`FixedArena::reset`], which invalidates every
//! outstanding handle.
//!
//! # Architecture
//!
//! ```text
//! FixedArena<S: Storage>  (Box<[u8]> | [u8; N] | &mut [u8] | Vec<u8>)
//! ├── alloc / alloc_bytes   → Block (generation-tagged offset + len)
//! ├── grow_last             → Block (same start, longer)
//! ├── begin_tail            → Tail<'_, S>          (exclusive growable tail)
//! ├── start_string          → StringBuilder<'_, S> (built on Tail)
//! │                            └── finalize → StringHandle
//! └── reset                 → generation + 1
//!
//! StringCopier<'_, P: StringPool>  → forwards start_string
//! ```
//!
//! # Handle validity
//!
//! Handles do not borrow the arena. Each one records the arena generation
//! it was issued under, and every accessor checks it, so reading through
//! a handle from before a reset yields `StaleHandle` instead of whatever
//! bytes were written there since.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod copier;
pub mod fixed;
pub mod handle;
pub mod string;
pub mod tail;

// Public re-exports for the primary API surface.
pub use config::ArenaConfig;
pub use copier::StringCopier;
pub use fixed::{FixedArena, Storage};
pub use handle::{Block, StringHandle};
pub use pouch_core::{ArenaError, Generation};
pub use string::StringBuilder;
pub use tail::Tail;
