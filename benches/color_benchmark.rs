#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for color allocation (rotating and unique policies).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vizscene::color::{ColorPalette, Colorer, MAIN_POOL};

fn rotating_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotating_color");

    for keys in [100, 1_000, 10_000] {
        let names: Vec<String> = (0..keys).map(|i| format!("series-{i}")).collect();

        group.bench_with_input(BenchmarkId::from_parameter(keys), &names, |b, names| {
            b.iter(|| {
                let mut colorer = Colorer::default();
                for name in names {
                    black_box(colorer.rotating_color(name));
                }
            });
        });
    }

    group.finish();
}

fn fixed_lookup_benchmark(c: &mut Criterion) {
    let palette = ["Rust", "Ruby", "Go", "Python", "Java"]
        .iter()
        .fold(ColorPalette::default(), |p, key| p.with_fixed(key, vizscene::color::Rgba::RED));
    let mut colorer = Colorer::new(palette);

    c.bench_function("fixed_lookup", |b| {
        b.iter(|| {
            black_box(colorer.fixed(black_box("RUBY")));
            black_box(colorer.fixed(black_box("Haskell")));
        });
    });
}

fn unique_churn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("unique_churn");

    for scheme_size in [10, 64, 256] {
        let palette = ColorPalette::hue_wheel(scheme_size, 0.7, 0.5);

        group.bench_with_input(BenchmarkId::from_parameter(scheme_size), &palette, |b, palette| {
            b.iter(|| {
                let mut colorer = Colorer::new(palette.clone());
                for i in 0..scheme_size * 2 {
                    let key = format!("k{i}");
                    black_box(colorer.unique_assign(&key, MAIN_POOL));
                    if i % 3 == 0 {
                        colorer.unique_unassign(&key, MAIN_POOL);
                    }
                }
                colorer.unique_reset_set(MAIN_POOL);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, rotating_benchmark, fixed_lookup_benchmark, unique_churn_benchmark);
criterion_main!(benches);
