//! Core types and traits for Pouch arenas.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every arena implementation: the error
//! taxonomy, the arena [`Generation`] counter, and the string-building
//! traits used by callers that are generic over a memory pool.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod traits;

pub use error::ArenaError;
pub use id::Generation;
pub use traits::{StringPool, StringSink};
