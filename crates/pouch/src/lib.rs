//! Pouch: fixed-capacity bump arenas for memory-constrained targets.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Pouch sub-crates. For most users, adding `pouch` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use pouch::prelude::*;
//!
//! // 64 bytes, embedded inline: no heap involved.
//! let mut arena = FixedArena::<[u8; 64]>::inline();
//!
//! let header = arena.alloc_bytes(&[0xAB, 0xCD]).unwrap();
//!
//! let mut name = arena.start_string();
//! for &b in b"sensor-7" {
//!     name.append(b);
//! }
//! let name = name.finalize().unwrap();
//!
//! assert_eq!(arena.bytes(&header).unwrap(), &[0xAB, 0xCD]);
//! assert_eq!(arena.str(&name).unwrap(), "sensor-7");
//! assert_eq!(arena.string_with_nul(&name).unwrap(), b"sensor-7\0");
//!
//! // Everything goes at once.
//! arena.reset();
//! assert!(arena.str(&name).is_err());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `pouch-arena` | `FixedArena`, handles, `Tail`, `StringBuilder`, `StringCopier` |
//! | [`types`] | `pouch-core` | `ArenaError`, `Generation`, `StringPool`/`StringSink` traits |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Arena storage, handles, and string building (`pouch-arena`).
pub use pouch_arena as arena;

/// Core types, traits, and errors (`pouch-core`).
///
/// Contains the error taxonomy and the pool-generic traits
/// ([`types::StringPool`], [`types::StringSink`]).
pub use pouch_core as types;

/// Common imports for typical Pouch usage.
///
/// ```rust
/// use pouch::prelude::*;
/// ```
pub mod prelude {
    // Arena
    pub use pouch_arena::{
        ArenaConfig, Block, FixedArena, Storage, StringBuilder, StringCopier, StringHandle, Tail,
    };

    // Core types and traits
    pub use pouch_core::{ArenaError, Generation, StringPool, StringSink};
}
