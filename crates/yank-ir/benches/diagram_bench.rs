//! Benchmarks for diagram construction and functor application
//!
//! Run with: cargo bench -p yank-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use yank_ir::{Diagram, Functor, Ob, Ty};

fn chain(n: usize) -> Diagram {
    let x = Ty::new("x");
    (0..n).fold(Diagram::id(x.clone()), |d, i| {
        d.then(&Diagram::box_(&format!("f{i}"), x.clone(), x.clone()))
            .unwrap()
    })
}

/// Benchmark sequential and parallel composition
fn bench_composition(c: &mut Criterion) {
    let mut group = c.benchmark_group("composition");

    for n in &[10, 100, 1000] {
        let d = chain(*n);
        group.bench_with_input(BenchmarkId::new("then", n), &d, |b, d| {
            b.iter(|| black_box(d).then(black_box(d)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("tensor", n), &d, |b, d| {
            b.iter(|| black_box(d).tensor(black_box(d)));
        });
    }

    group.finish();
}

/// Benchmark nested cups over long types
fn bench_cups(c: &mut Criterion) {
    let mut group = c.benchmark_group("cups");

    for n in &[2, 8, 32] {
        let t = Ty::from_names((0..*n).map(|i| format!("t{i}")));
        group.bench_with_input(BenchmarkId::new("nested", n), &t, |b, t| {
            b.iter(|| Diagram::cups(black_box(t), &t.r()).unwrap());
        });
    }

    group.finish();
}

/// Benchmark functor application into diagrams
fn bench_functor(c: &mut Criterion) {
    let mut group = c.benchmark_group("functor");
    let image = Ty::from_names(["y", "z"]);
    let target = image.clone();
    let functor: Functor<Diagram> = Functor::from_rule([(Ob::new("x"), image)], move |_| {
        Ok(Diagram::box_("F", target.clone(), target.clone()))
    });

    for n in &[10, 100] {
        let d = chain(*n).tensor(&chain(*n));
        group.bench_with_input(BenchmarkId::new("apply", n), &d, |b, d| {
            b.iter(|| functor.apply(black_box(d)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_composition, bench_cups, bench_functor);
criterion_main!(benches);
