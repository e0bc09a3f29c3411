//! Criterion benchmark for the Dijkstra kernel and the EMV DP engine.
//!
//! The teacher crate declares `criterion` as a dev-dependency but never
//! exercises it, running its own `examples/*_benchmark.rs` binaries with
//! hand-rolled `Instant` timing instead. This follows the `criterion`
//! harness conventions seen in `tripp-smith-bmssp-py`'s
//! `benches/dijkstra_vs_bmssp.rs` (a synthetic-graph generator plus
//! `c.bench_function`), since this crate's own binary is a CLI rather than
//! a collection of demo programs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use steiner_emv::algorithm::{dijkstra, Scratch};
use steiner_emv::{Csr, Emv};

struct SplitMix64(u64);

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        SplitMix64(seed)
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

fn random_connected_graph(n: usize, extra_edges: usize, seed: u64) -> Csr {
    let mut rng = SplitMix64::new(seed);
    let mut edges = Vec::with_capacity(n - 1 + extra_edges);
    // A spanning path guarantees connectivity before the random extras.
    for v in 1..n {
        let w = 1 + (rng.next() % 20) as i64;
        edges.push((v as u32 - 1, v as u32, w));
    }
    for _ in 0..extra_edges {
        let u = (rng.next() as usize) % n;
        let v = (rng.next() as usize) % n;
        if u != v {
            let w = 1 + (rng.next() % 20) as i64;
            edges.push((u as u32, v as u32, w));
        }
    }
    Csr::build(n, &edges).unwrap()
}

fn bench_dijkstra(c: &mut Criterion) {
    let csr = random_connected_graph(2_000, 6_000, 7);
    let mut scratch = Scratch::with_capacity(csr.vertex_count());
    c.bench_function("dijkstra_2000v_8000e", |b| {
        b.iter(|| dijkstra(black_box(&csr), black_box(0), &mut scratch))
    });
}

fn bench_emv_small_terminal_set(c: &mut Criterion) {
    let csr = random_connected_graph(200, 600, 11);
    let terminals: Vec<u32> = (0..6).map(|i| i * 30).collect();
    let solver = Emv::new(4, false).unwrap();
    c.bench_function("emv_200v_k6", |b| {
        b.iter(|| solver.solve(black_box(&csr), black_box(&terminals)))
    });
}

fn bench_emv_with_solution_tracking(c: &mut Criterion) {
    let csr = random_connected_graph(200, 600, 13);
    let terminals: Vec<u32> = (0..6).map(|i| i * 30).collect();
    let solver = Emv::new(4, true).unwrap();
    c.bench_function("emv_200v_k6_tracked", |b| {
        b.iter(|| solver.solve(black_box(&csr), black_box(&terminals)))
    });
}

criterion_group!(
    benches,
    bench_dijkstra,
    bench_emv_small_terminal_set,
    bench_emv_with_solution_tracking
);
criterion_main!(benches);
