use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use orbslf::kepler::{solve_kepler_bisection, solve_kepler_newton};

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

fn cases(seed: u64, samples: usize, eccentricity: impl Fn(&mut StdRng) -> f64) -> Vec<(f64, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..samples)
        .map(|_| {
            let e = eccentricity(&mut rng);
            (rand_angle(&mut rng), e)
        })
        .collect()
}

/// Catalog regime: e ∈ [0.0, 0.3]
fn bench_typical(c: &mut Criterion) {
    let samples = 10_000usize;
    let mut group = c.benchmark_group("solve_kepler_equation/typical_e<=0.3");

    group.bench_function("bisection", |b| {
        b.iter_batched(
            || cases(0xDEADBEEF, samples, |rng| rng.random_range(0.0..=0.3)),
            |cases| {
                for (m, e) in cases {
                    black_box(solve_kepler_bisection(black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
    group.bench_function("newton", |b| {
        b.iter_batched(
            || cases(0xDEADBEEF, samples, |rng| rng.random_range(0.0..=0.3)),
            |cases| {
                for (m, e) in cases {
                    black_box(solve_kepler_newton(black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.9]
fn bench_high_e(c: &mut Criterion) {
    let samples = 10_000usize;

    c.bench_function("solve_kepler_equation/high_e_0.7..0.9/bisection", |b| {
        b.iter_batched(
            || cases(0xBADF00D, samples, |rng| rng.random_range(0.7..0.9)),
            |cases| {
                for (m, e) in cases {
                    black_box(solve_kepler_bisection(black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Mean anomalies far outside one turn, as negative values and after many revolutions.
fn bench_unreduced_anomaly(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);
    let inputs: Vec<(f64, f64)> = (0..10_000)
        .map(|_| (rng.random_range(-1.0e4..1.0e4), rng.random_range(0.0..0.5)))
        .collect();

    c.bench_function("solve_kepler_equation/unreduced_anomaly/bisection", |b| {
        b.iter(|| {
            for &(m, e) in &inputs {
                black_box(solve_kepler_bisection(black_box(m), black_box(e)));
            }
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_unreduced_anomaly
);
criterion_main!(benches);
