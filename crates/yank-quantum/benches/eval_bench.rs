//! Benchmarks for circuit evaluation
//!
//! Run with: cargo bench -p yank-quantum

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::Array2;
use yank_quantum::{Circuit, default_gateset, iqp_ansatz, random_tiling};

fn iqp(n_qubits: usize, depth: usize) -> yank_ir::Diagram {
    let params = Array2::from_shape_fn((depth, n_qubits - 1), |(i, j)| 0.1 * (i + j) as f64);
    iqp_ansatz(n_qubits, &params).unwrap()
}

/// Benchmark pure evaluation of IQP circuits
fn bench_eval_tensor(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_tensor");

    for n in &[2, 4, 6] {
        let circuit = iqp(*n, 2);
        group.bench_with_input(BenchmarkId::new("iqp", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit).eval_tensor());
        });
    }

    group.finish();
}

/// Benchmark mixed evaluation and measurement statistics
fn bench_eval_cq(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval_cq");

    for n in &[2, 3, 4] {
        let circuit = iqp(*n, 1);
        group.bench_with_input(BenchmarkId::new("iqp", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit).eval_cq());
        });
        let tiling = random_tiling(*n, 3, &default_gateset(), 42).unwrap();
        group.bench_with_input(BenchmarkId::new("probabilities", n), &tiling, |b, circuit| {
            b.iter(|| black_box(circuit).probabilities());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_eval_tensor, bench_eval_cq);
criterion_main!(benches);
