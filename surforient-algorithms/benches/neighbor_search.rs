//! Benchmarks comparing the R*-tree and brute force neighbor search backends

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use surforient_algorithms::{estimate_orientations, search_neighbors_with, SearchBackend};
use surforient_core::{Point3d, SearchCriterion, SearchStrategy};

/// Gently folded surface sampled on a regular grid
fn generate_surface(size: usize) -> Vec<Point3d> {
    let mut points = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let fx = x as f64 / (size - 1) as f64 * std::f64::consts::PI;
            let fy = y as f64 / (size - 1) as f64 * std::f64::consts::PI;
            points.push(Point3d::new(
                x as f64 * 10.0,
                y as f64 * 10.0,
                (fx.sin() * fy.cos()) * 25.0,
            ));
        }
    }
    points
}

fn bench_search(c: &mut Criterion) {
    let sizes = [10, 30, 60];
    let runs = [
        ("knn_8", SearchCriterion::Count(8), SearchStrategy::Knn),
        ("radius_25", SearchCriterion::Radius(25.0), SearchStrategy::Radius),
    ];

    let mut group = c.benchmark_group("neighbor_search");

    for &size in &sizes {
        let points = generate_surface(size);

        for &(name, criterion, strategy) in &runs {
            for backend in [SearchBackend::RTree, SearchBackend::BruteForce] {
                group.bench_with_input(
                    BenchmarkId::new(format!("{}_{:?}", name, backend), points.len()),
                    &points,
                    |b, points| {
                        b.iter(|| {
                            let groups =
                                search_neighbors_with(black_box(points), criterion, strategy, backend)
                                    .unwrap();
                            black_box(groups);
                        });
                    },
                );
            }
        }
    }

    group.finish();
}

fn bench_estimation(c: &mut Criterion) {
    let points = generate_surface(60);
    let groups =
        search_neighbors_with(&points, SearchCriterion::Count(8), SearchStrategy::Knn, SearchBackend::RTree)
            .unwrap();

    c.bench_function("estimate_orientations_3600", |b| {
        b.iter(|| black_box(estimate_orientations(black_box(&groups))));
    });
}

criterion_group!(benches, bench_search, bench_estimation);
criterion_main!(benches);
