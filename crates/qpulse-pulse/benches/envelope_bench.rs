//! Benchmarks for envelope evaluation
//!
//! Run with: cargo bench -p qpulse-pulse

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qpulse_pulse::{Pulse, PulseKind, PulseShape};

fn time_axis(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 / 1.2e9).collect()
}

/// Benchmark analytic shapes with DRAG and SSB mixing
fn bench_analytic(c: &mut Criterion) {
    let mut group = c.benchmark_group("analytic_waveform");

    for &n in &[64usize, 512, 4096] {
        let t = time_axis(n);
        let t0 = t[n / 2];
        let pulse = Pulse::default()
            .with_width(n as f64 / 1.2e9 / 6.0)
            .with_frequency(100e6)
            .with_drag(0.5e-9);
        group.bench_with_input(BenchmarkId::new("gaussian_drag_ssb", n), &n, |b, _| {
            b.iter(|| pulse.waveform(black_box(t0), black_box(&t)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark adiabatic flux trajectories
fn bench_adiabatic(c: &mut Criterion) {
    let mut group = c.benchmark_group("adiabatic_waveform");
    let t = time_axis(120);
    let t0 = t[60];

    for shape in [PulseShape::AdiabaticFlux, PulseShape::NetZero] {
        let pulse = Pulse::new(shape).with_kind(PulseKind::Z).with_width(60e-9);
        group.bench_function(shape.name(), |b| {
            b.iter(|| pulse.envelope(black_box(t0), black_box(&t)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analytic, bench_adiabatic);
criterion_main!(benches);
