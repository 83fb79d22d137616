//! Size a fixed arena for a representative workload.
//!
//! Demonstrates: generate a document workload → replay into a generous
//! arena → read the high-water mark → confirm it fits an inline arena of
//! that size → show what happens one step smaller.

use pouch_arena::FixedArena;
use pouch_bench::{document_workload, replay};

fn main() {
    println!("=== Pouch Pool Sizing Example ===\n");

    let ops = document_workload(42, 40);
    println!("Workload: {} operations", ops.len());

    let mut probe = FixedArena::new(64 * 1024);
    let stats = replay(&mut probe, &ops);
    println!(
        "Probe run: {} allocs, {} strings, {} failures, peak {} bytes",
        stats.allocs, stats.strings, stats.failures, stats.peak
    );

    let mut sized = FixedArena::new(stats.peak);
    let fitted = replay(&mut sized, &ops);
    println!(
        "Arena of {} bytes: {} failures",
        sized.capacity(),
        fitted.failures
    );

    let mut short = FixedArena::new(stats.peak - 1);
    let starved = replay(&mut short, &ops);
    println!(
        "Arena of {} bytes: {} failures",
        short.capacity(),
        starved.failures
    );
}
