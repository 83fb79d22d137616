//! Criterion micro-benchmarks for in-place string building.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pouch_arena::{FixedArena, StringCopier};
use pouch_bench::{document_workload, replay};

/// Benchmark: Build a 64-byte string byte by byte and finalize it.
fn bench_build_string_64(c: &mut Criterion) {
    let mut arena = FixedArena::new(256);
    let text = [b'k'; 64];
    c.bench_function("build_string_64", |b| {
        b.iter(|| {
            let mut sb = arena.start_string();
            for &byte in &text {
                sb.append(byte);
            }
            black_box(sb.finalize().unwrap());
            arena.reset();
        });
    });
}

/// Benchmark: Same as above, through the pool-generic copier.
fn bench_copier_string_64(c: &mut Criterion) {
    let mut arena = FixedArena::new(256);
    let text = [b'k'; 64];
    c.bench_function("copier_string_64", |b| {
        b.iter(|| {
            {
                let mut copier = StringCopier::new(&mut arena);
                let mut sink = copier.start_string();
                for &byte in &text {
                    sink.append(byte);
                }
                black_box(sink.finalize().unwrap());
            }
            arena.reset();
        });
    });
}

/// Benchmark: Replay a 200-member document workload into a 16KB arena.
fn bench_document_replay(c: &mut Criterion) {
    let ops = document_workload(42, 200);
    let mut arena = FixedArena::new(16 * 1024);
    c.bench_function("document_replay_200", |b| {
        b.iter(|| {
            let stats = replay(&mut arena, black_box(&ops));
            arena.reset();
            black_box(stats);
        });
    });
}

criterion_group!(
    benches,
    bench_build_string_64,
    bench_copier_string_64,
    bench_document_replay
);
criterion_main!(benches);
