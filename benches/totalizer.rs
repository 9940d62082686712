use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use card_nexus::core::card::{Cardinality, DeclareCardinality, MergeStrategy, Totalizer, TotalizerOptions};
use card_nexus::core::solver::mock::MockSolver;
use card_nexus::core::solver::SolverExt;

fn declare(n: usize, strategy: MergeStrategy) -> Totalizer {
    let mut solver = MockSolver::new();
    let lits = solver.new_var_vec(n);
    Totalizer::declare_with(&mut solver, &lits, &TotalizerOptions { strategy }).unwrap()
}

fn tighten(n: usize) -> Cardinality {
    let mut solver = MockSolver::new();
    let lits = solver.new_var_vec(n);
    let mut card = solver.declare_cardinality(&lits).unwrap();
    for k in (0..n).rev() {
        card.declare_upper_bound_less_than(&mut solver, Some(k)).unwrap();
    }
    card
}

fn totalizer_benches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Totalizer");
    for n in [16, 64, 256] {
        group.bench_with_input(BenchmarkId::new("fifo", n), &n, |b, &n| b.iter(|| declare(n, MergeStrategy::Fifo)));
        group.bench_with_input(BenchmarkId::new("balanced", n), &n, |b, &n| {
            b.iter(|| declare(n, MergeStrategy::Balanced))
        });
        group.bench_with_input(BenchmarkId::new("tighten", n), &n, |b, &n| b.iter(|| tighten(n)));
    }
    group.finish();
}

criterion_group!(benches, totalizer_benches);
criterion_main!(benches);
