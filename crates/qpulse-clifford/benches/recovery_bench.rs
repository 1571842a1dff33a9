//! Benchmarks for recovery search and table construction
//!
//! Run with: cargo bench -p qpulse-clifford

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qpulse_clifford::{Generator, RecoveryOptions, RecoveryTable, clifford, recover_two};

/// Exhaustive two-qubit recovery, first hit versus cheapest
fn bench_exhaustive(c: &mut Criterion) {
    let mut group = c.benchmark_group("recover_two");
    let target = clifford::two_qubit(7321, Generator::Cz).unwrap().evaluate();

    for cheapest in [false, true] {
        let options = RecoveryOptions::default().with_cheapest(cheapest);
        group.bench_with_input(BenchmarkId::new("cheapest", cheapest), &options, |b, options| {
            b.iter(|| recover_two(black_box(&target), Generator::Cz, options).unwrap());
        });
    }

    group.finish();
}

/// Full table construction for both entanglers
fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("recovery_table");
    group.sample_size(10);

    for generator in [Generator::Cz, Generator::Iswap] {
        group.bench_with_input(
            BenchmarkId::new("build", generator),
            &generator,
            |b, &generator| b.iter(|| RecoveryTable::build(generator, None, |_, _| {}).unwrap()),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_exhaustive, bench_table);
criterion_main!(benches);
