//! Benchmarks for the full per-frame pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gesture_flow::{
    config::Config,
    controller::GestureController,
    landmark_filter::LandmarkFilter,
    sink::RecordingSink,
    types::{Chirality, FilteredLandmarks, HandObservation, Keypoint},
};
use std::time::{Duration, Instant};

fn pinch(chirality: Chirality, x: f64, gap: f64) -> HandObservation {
    HandObservation::pinch(chirality, Keypoint::new(x, 0.5, 0.9), Keypoint::new(x, 0.5 + gap, 0.9))
}

fn benchmark_pipeline(c: &mut Criterion) {
    let config = Config::default();
    let frames: Vec<Vec<HandObservation>> = (0..300)
        .map(|i| {
            let gap = 0.1 + 0.05 * rand::random::<f64>();
            if i % 100 < 5 {
                Vec::new()
            } else {
                vec![pinch(Chirality::Left, 0.3, gap), pinch(Chirality::Right, 0.7, gap)]
            }
        })
        .collect();

    c.bench_function("pipeline_300_frames", |b| {
        b.iter(|| {
            let mut filter = LandmarkFilter::new(config.filter.clone());
            let mut controller = GestureController::new(config.control.clone(), Box::new(RecordingSink::new()));
            controller.load_track("bench");
            let start = Instant::now();
            for (i, frame) in frames.iter().enumerate() {
                let hands: Vec<FilteredLandmarks> = filter.update(frame);
                controller.process_frame(black_box(&hands), start + Duration::from_millis(33 * i as u64));
            }
            black_box(controller.snapshot())
        });
    });
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
