//! Benchmarks for projection, coord training and density estimation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ggalt::coord_proj::{project4, CoordProj};
use ggalt::prelude::*;
use ggalt::smooth::{bkde, dpik, DEFAULT_GRIDSIZE};

fn lon_lat(size: usize) -> (Vec<f64>, Vec<f64>) {
    let lon = (0..size).map(|i| (i as f64 * 0.37).sin() * 179.0).collect();
    let lat = (0..size).map(|i| (i as f64 * 0.71).cos() * 89.0).collect();
    (lon, lat)
}

fn projection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("project4");

    for def in ["+proj=robin +ellps=WGS84", "+proj=moll +ellps=WGS84", "+proj=merc +ellps=WGS84"] {
        let projector = Projector::new(def, Some("sphere")).unwrap();
        let (lon, lat) = lon_lat(10_000);
        group.bench_with_input(BenchmarkId::from_parameter(def), &def, |b, _| {
            b.iter(|| project4(&projector, black_box(&lon), black_box(&lat), false, true));
        });
    }

    group.finish();
}

fn coord_train_benchmark(c: &mut Criterion) {
    let (lon, lat) = lon_lat(1_000);

    c.bench_function("coord_proj_build", |b| {
        b.iter(|| {
            Plot::new()
                .data_xy(black_box(&lon), black_box(&lat))
                .geom(GeomPoint)
                .coord(CoordProj::robinson().unwrap())
                .build()
                .unwrap()
        });
    });
}

fn bkde_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bkde");

    for size in [100, 1_000, 10_000] {
        let xs: Vec<f64> = (0..size).map(|i| (i as f64 * 0.123).sin() * 3.0).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let h = dpik(black_box(&xs), DEFAULT_GRIDSIZE, None, true).unwrap();
                bkde(&xs, Kernel::Normal, h, DEFAULT_GRIDSIZE, None, true).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, projection_benchmark, coord_train_benchmark, bkde_benchmark);
criterion_main!(benches);
