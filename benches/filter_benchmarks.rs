//! Benchmarks for landmark filter performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gesture_flow::{
    filters::{adaptive::AdaptiveEmaFilter, NoFilter, PointFilter},
    landmark_filter::LandmarkFilter,
    types::{Chirality, HandObservation, Keypoint, Point2},
};

/// Jittery pinch observations for both hands, with occasional dropouts
fn noisy_frames(count: usize) -> Vec<Vec<HandObservation>> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.033;
            let mut frame = Vec::with_capacity(2);
            for (chirality, cx) in [(Chirality::Left, 0.3), (Chirality::Right, 0.7)] {
                if rand::random::<f64>() < 0.05 {
                    continue;
                }
                let jitter = || 0.01 * (rand::random::<f64>() - 0.5);
                let gap = 0.1 + 0.05 * t.sin();
                frame.push(HandObservation::pinch(
                    chirality,
                    Keypoint::new(cx + jitter(), 0.5 + jitter(), 0.9),
                    Keypoint::new(cx + jitter(), 0.5 + gap + jitter(), 0.9),
                ));
            }
            frame
        })
        .collect()
}

fn benchmark_point_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_filters");

    let points: Vec<Point2> = (0..100)
        .map(|i| {
            let t = i as f64 * 0.1;
            Point2::new(0.5 + 0.2 * t.sin(), 0.5 + 0.2 * t.cos() + 0.01 * rand::random::<f64>())
        })
        .collect();

    let filter_configs: Vec<(&str, Box<dyn PointFilter>)> = vec![
        ("no_filter", Box::new(NoFilter)),
        ("adaptive_ema", Box::new(AdaptiveEmaFilter::default())),
        ("adaptive_ema_slow", Box::new(AdaptiveEmaFilter::new(0.2, 0.05, 0.1))),
    ];

    for (name, mut filter) in filter_configs {
        group.bench_with_input(BenchmarkId::new("sequence_100", name), &points, |b, data| {
            b.iter(|| {
                filter.reset();
                for &p in data {
                    black_box(filter.apply(black_box(p)));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_landmark_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("landmark_filter");

    for frame_count in [30, 300] {
        let frames = noisy_frames(frame_count);
        group.bench_with_input(BenchmarkId::new("frames", frame_count), &frames, |b, frames| {
            b.iter(|| {
                let mut filter = LandmarkFilter::default();
                for frame in frames {
                    black_box(filter.update(black_box(frame)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_point_filters, benchmark_landmark_filter);
criterion_main!(benches);
