use criterion::{Criterion, criterion_group, criterion_main};
use indexmap::IndexMap;
use std::hint::black_box;

use chartgrid::core::scales::{ContinuousScale, ContinuousScaleOptions};
use chartgrid::core::series::SeriesData;
use chartgrid::core::spec::{SeriesKind, SeriesSpec};
use chartgrid::core::types::{Rotation, ScaleType, Size};
use chartgrid::theme::ChartTheme;
use chartgrid::{compute_chart_geometries, compute_series_domains};

fn synthetic_series(id: &str, len: usize) -> SeriesData {
    let points: Vec<(f64, f64)> = (0..len)
        .map(|i| {
            let x = i as f64;
            (x, 100.0 + (x * 0.1).sin() * 40.0)
        })
        .collect();
    SeriesData::from_points(id, &points)
}

fn bench_domain_merge_10k(c: &mut Criterion) {
    let specs = vec![
        SeriesSpec::new("a", SeriesKind::Bar),
        SeriesSpec::new("b", SeriesKind::Line),
    ];
    let mut data = IndexMap::new();
    data.insert("a".to_owned(), synthetic_series("a", 10_000));
    data.insert("b".to_owned(), synthetic_series("b", 10_000));

    c.bench_function("domain_merge_10k", |b| {
        b.iter(|| {
            let _ = compute_series_domains(
                black_box(&specs),
                black_box(&data),
                None,
                black_box(&IndexMap::new()),
            )
            .expect("domain merge should succeed");
        })
    });
}

fn bench_geometry_pass_10k(c: &mut Criterion) {
    let specs = vec![
        SeriesSpec::new("a", SeriesKind::Bar),
        SeriesSpec::new("b", SeriesKind::Line),
    ];
    let mut data = IndexMap::new();
    data.insert("a".to_owned(), synthetic_series("a", 10_000));
    data.insert("b".to_owned(), synthetic_series("b", 10_000));
    let domains =
        compute_series_domains(&specs, &data, None, &IndexMap::new()).expect("domain merge");
    let theme = ChartTheme::default();

    c.bench_function("geometry_pass_10k", |b| {
        b.iter(|| {
            let _ = compute_chart_geometries(
                black_box(&specs),
                black_box(&domains),
                black_box(Size::new(1920.0, 1080.0)),
                Rotation::Deg0,
                black_box(&theme),
            )
            .expect("geometry pass should succeed");
        })
    });
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = ContinuousScale::new(
        ScaleType::Linear,
        [0.0, 10_000.0],
        [0.0, 1920.0],
        ContinuousScaleOptions::default(),
    );

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.scale(black_box(4_321.123));
            let _ = scale.invert(black_box(px));
        })
    });
}

criterion_group!(
    benches,
    bench_domain_merge_10k,
    bench_geometry_pass_10k,
    bench_linear_scale_round_trip
);
criterion_main!(benches);
