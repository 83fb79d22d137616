//! Pool-generic string copying.
//!
//! Code that builds strings without knowing the concrete arena type holds a
//! [`StringCopier`] over any [`StringPool`].

use pouch_core::StringPool;

use crate::fixed::{FixedArena, Storage};
use crate::string::StringBuilder;

impl<S: Storage> StringPool for FixedArena<S> {
    type Builder<'a>
        = StringBuilder<'a, S>
    where
        Self: 'a;

    fn start_string(&mut self) -> StringBuilder<'_, S> {
        FixedArena::start_string(self)
    }
}

/// Forwards string building to the wrapped pool.
///
/// Holds nothing but the pool reference.
pub struct StringCopier<'p, P> {
    pool: &'p mut P,
}

impl<'p, P: StringPool> StringCopier<'p, P> {
    /// Wrap a pool.
    pub fn new(pool: &'p mut P) -> Self {
        Self { pool }
    }

    /// Begin a new string in the wrapped pool.
    pub fn start_string(&mut self) -> P::Builder<'_> {
        self.pool.start_string()
    }
}
