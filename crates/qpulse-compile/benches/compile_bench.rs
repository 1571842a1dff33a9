//! Benchmarks for sequence compilation
//!
//! Run with: cargo bench -p qpulse-compile

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qpulse_compile::{Compiler, CompilerConfig};
use qpulse_ir::{Cpmg, GeneratorContext, SequenceOptions, build_sequence};

/// Benchmark CPMG trains of increasing length on several qubits
fn bench_cpmg(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_cpmg");

    for &n_pulse in &[1i32, 10, 50] {
        let config = CompilerConfig::new(3);
        let ctx = GeneratorContext::new(config.xy.clone());
        let compiler = Compiler::new(config).unwrap();
        let cpmg = Cpmg {
            n_pulse,
            duration: 2e-6,
            ..Cpmg::default()
        };
        let seq = build_sequence(&cpmg, &ctx, &SequenceOptions::default()).unwrap();
        group.bench_with_input(BenchmarkId::new("n_pulse", n_pulse), &seq, |b, seq| {
            b.iter(|| compiler.compile(black_box(seq)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cpmg);
criterion_main!(benches);
