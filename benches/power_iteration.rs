//! Benchmarks for transition building and power iteration.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use linkrank::{build_transition, solve, LinkMatrix, PageRankConfig};
use std::hint::black_box;

/// Rows for a graph where page `j` links to `j + 1` and `(7j + 3) mod n`; every
/// tenth page is left dangling.
fn link_rows(n: usize) -> Vec<Vec<f64>> {
    let mut rows = vec![vec![0.0; n]; n];
    for j in 0..n {
        if j % 10 == 9 {
            continue;
        }
        rows[(j + 1) % n][j] = 1.0;
        rows[(7 * j + 3) % n][j] = 1.0;
    }
    rows
}

fn bench_pagerank(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagerank");

    for n in [64usize, 256, 1024] {
        let links = match LinkMatrix::from_rows(&link_rows(n)) {
            Ok(links) => links,
            Err(err) => panic!("bench input rejected: {err}"),
        };

        group.bench_with_input(BenchmarkId::new("build_transition", n), &n, |b, _| {
            b.iter(|| {
                let t = build_transition(black_box(&links));
                black_box(t);
            })
        });

        // Transition setup cost is separate from iteration.
        let t = build_transition(&links);
        let cfg = PageRankConfig::default();
        group.bench_with_input(BenchmarkId::new("solve", n), &n, |b, _| {
            b.iter(|| {
                let run = solve(black_box(&t), black_box(cfg));
                black_box(run);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pagerank);
criterion_main!(benches);
