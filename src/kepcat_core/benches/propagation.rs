#![allow(missing_docs, reason = "Unnecessary for benchmarks")]
#![allow(unused_results, reason = "Unnecessary for benchmarks")]
#![allow(clippy::missing_assert_message, reason = "Unnecessary for benchmarks")]

use chrono::TimeDelta;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kepcat_core::prelude::*;
use kepcat_core::time::parse_epoch;
use pprof::criterion::{Output, PProfProfiler};
use std::hint::black_box;

fn build_catalogue(n_objects: usize, config: PropagationConfig) -> Catalogue {
    #[allow(clippy::cast_precision_loss, reason = "Benchmarking only")]
    let raw = (0..n_objects).map(|idx| {
        let frac = idx as f64 / n_objects as f64;
        RawRecord {
            epoch: "2021-06-01".into(),
            semi_major_axis: 6800.0 + 30_000.0 * frac,
            eccentricity: 0.2 * frac,
            inclination: 1.5 * frac,
            raan: 6.0 * frac,
            argument_of_perigee: 3.0 * frac,
            true_anomaly: 6.2 * frac,
        }
    });
    Catalogue::load(raw, config).unwrap()
}

#[allow(clippy::missing_panics_doc, reason = "Benchmarking only")]
pub fn query_benchmark(c: &mut Criterion) {
    let mut query_group = c.benchmark_group("Query");
    let at = parse_epoch("2021-06-03").unwrap() + TimeDelta::seconds(12_345);

    for (name, config) in [
        ("Literal", PropagationConfig::default()),
        ("Physical", PropagationConfig::physical()),
    ] {
        let catalogue = build_catalogue(1, config);
        query_group.bench_function(BenchmarkId::new("single", name), |b| {
            b.iter(|| catalogue.query(black_box(0), black_box(&at)).unwrap());
        });
    }
}

#[allow(clippy::missing_panics_doc, reason = "Benchmarking only")]
pub fn query_all_benchmark(c: &mut Criterion) {
    let mut all_group = c.benchmark_group("QueryAll");
    let at = parse_epoch("2021-06-03").unwrap();

    for n_objects in [100, 10_000] {
        let catalogue = build_catalogue(n_objects, PropagationConfig::default());
        all_group.bench_with_input(
            BenchmarkId::new("query_all", n_objects),
            &catalogue,
            |b, catalogue| {
                b.iter(|| {
                    assert!(catalogue.query_all(black_box(&at)).iter().all(Result::is_ok));
                });
            },
        );
    }
}

criterion_group!(name=propagation;
                config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
                targets=query_benchmark, query_all_benchmark);
criterion_main!(propagation);
