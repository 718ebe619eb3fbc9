//! Benchmarks for the centroid tracker

use centroidtrack::{assign_by_proximity, distances, Centroid, CentroidTracker, Rect, TrackerConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::hint::black_box;

fn create_test_frames(n_objects: usize, n_frames: usize) -> Vec<Vec<Rect>> {
    (0..n_frames)
        .map(|frame| {
            (0..n_objects)
                .map(|i| {
                    let x = (frame * 3 + i * 80) as i32;
                    let y = (frame * 2 + i * 60) as i32;
                    Rect::new(x, y, x + 40, y + 30)
                })
                .collect()
        })
        .collect()
}

fn bench_update_sequence(c: &mut Criterion) {
    let frames = create_test_frames(20, 10);

    c.bench_function("centroid_update_20_objects", |b| {
        b.iter_batched(
            || CentroidTracker::new(TrackerConfig::default()),
            |mut tracker| {
                for rects in &frames {
                    let _objects = tracker.update(black_box(rects));
                }
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_various_object_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("centroid_various_object_counts");

    for &n_objects in &[5, 10, 20, 50, 100] {
        let frames = create_test_frames(n_objects, 10);

        group.bench_with_input(BenchmarkId::new("objects", n_objects), &frames, |b, frames| {
            b.iter_batched(
                || CentroidTracker::new(TrackerConfig::default()),
                |mut tracker| {
                    for rects in frames {
                        let _objects = tracker.update(black_box(rects));
                    }
                },
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_distance_matrix(c: &mut Criterion) {
    let mut rng = rand::rng();
    let tracked: Vec<Centroid> = (0..100)
        .map(|_| Centroid::new(rng.random_range(0..1920), rng.random_range(0..1080)))
        .collect();
    let detections: Vec<Centroid> = (0..100)
        .map(|_| Centroid::new(rng.random_range(0..1920), rng.random_range(0..1080)))
        .collect();

    c.bench_function("distance_matrix_100x100", |b| {
        b.iter(|| distances(black_box(&tracked), black_box(&detections)))
    });
}

fn bench_greedy_assignment(c: &mut Criterion) {
    let mut rng = rand::rng();
    let tracked: Vec<Centroid> = (0..100)
        .map(|_| Centroid::new(rng.random_range(0..1920), rng.random_range(0..1080)))
        .collect();
    let detections: Vec<Centroid> = tracked
        .iter()
        .map(|c| Centroid::new(c.x + rng.random_range(-10..10), c.y + rng.random_range(-10..10)))
        .collect();
    let dist = distances(&tracked, &detections);

    c.bench_function("greedy_assignment_100x100", |b| {
        b.iter(|| assign_by_proximity(black_box(dist.view()), 50.0))
    });
}

criterion_group!(
    benches,
    bench_update_sequence,
    bench_various_object_counts,
    bench_distance_matrix,
    bench_greedy_assignment
);
criterion_main!(benches);
