//! Benchmark workloads and utilities for Pouch arenas.
//!
//! Provides deterministic allocation workloads for benchmarks and for
//! sizing an arena before committing to a fixed buffer on a target:
//!
//! - [`document_workload`]: node allocations interleaved with short strings,
//!   shaped like a parsed configuration document
//! - [`replay`]: run a workload against an arena and count outcomes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use pouch_arena::{FixedArena, Storage};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// One step of a workload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    /// Aligned allocation of this many bytes.
    Alloc(usize),
    /// Build a string from these bytes.
    String(Vec<u8>),
    /// Reset the arena.
    Reset,
}

/// Outcome counts from [`replay`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Successful allocations.
    pub allocs: usize,
    /// Successfully finalized strings.
    pub strings: usize,
    /// Allocations or strings that ran out of space.
    pub failures: usize,
    /// Arena high-water mark after the run.
    pub peak: usize,
}

/// Build a deterministic document-shaped workload.
///
/// Each "member" is a key string, then a node allocation (8 or 16 bytes),
/// and every third member also carries a string value. Keys are 1..=12
/// lowercase ASCII bytes, values 0..=24.
pub fn document_workload(seed: u64, members: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops = Vec::with_capacity(members * 3);
    for i in 0..members {
        let key_len = 1 + (rng.next_u32() % 12) as usize;
        ops.push(Op::String(ascii(&mut rng, key_len)));
        let node = if rng.next_u32() % 2 == 0 { 8 } else { 16 };
        ops.push(Op::Alloc(node));
        if i % 3 == 0 {
            let value_len = (rng.next_u32() % 25) as usize;
            ops.push(Op::String(ascii(&mut rng, value_len)));
        }
    }
    ops
}

fn ascii(rng: &mut ChaCha8Rng, len: usize) -> Vec<u8> {
    (0..len).map(|_| b'a' + (rng.next_u32() % 26) as u8).collect()
}

/// Run `ops` against `arena`.
pub fn replay<S: Storage>(arena: &mut FixedArena<S>, ops: &[Op]) -> ReplayStats {
    let mut stats = ReplayStats::default();
    for op in ops {
        match op {
            Op::Alloc(n) => match arena.alloc(*n) {
                Ok(_) => stats.allocs += 1,
                Err(_) => stats.failures += 1,
            },
            Op::String(bytes) => {
                let mut sb = arena.start_string();
                sb.push_bytes(bytes);
                match sb.finalize() {
                    Ok(_) => stats.strings += 1,
                    Err(_) => stats.failures += 1,
                }
            }
            Op::Reset => arena.reset(),
        }
    }
    stats.peak = arena.peak();
    stats
}
