use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gallery_viewer::config::NavigationConfig;
use gallery_viewer::core::TransitionEngine;
use gallery_viewer::math::{interpolate_pose, Easing};
use gallery_viewer::types::Pose;
use gallery_viewer::Navigator;
use glam::{Quat, Vec3};

const FRAME: f32 = 1.0 / 60.0;

/// Benchmark: one pose blend per easing curve
fn bench_interpolate_pose(c: &mut Criterion) {
    let start = Pose::at(Vec3::new(0.0, 0.0, 12.0)).with_orientation(Quat::IDENTITY);
    let target = Pose::at(Vec3::new(-1.5, -1.5, -10.0))
        .with_orientation(Quat::from_rotation_y(2.0))
        .with_zoom(2.0);

    let mut group = c.benchmark_group("interpolate_pose");
    for easing in Easing::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(easing), &easing, |b, easing| {
            b.iter(|| interpolate_pose(black_box(&start), black_box(&target), easing.apply(black_box(0.37))))
        });
    }
    group.finish();
}

/// Benchmark: full 1.5s transition stepped at 60 fps
fn bench_engine_transition(c: &mut Criterion) {
    c.bench_function("engine_transition_90_frames", |b| {
        b.iter(|| {
            let mut engine = TransitionEngine::new(Pose::at(Vec3::new(0.0, 0.0, 12.0)));
            engine.request_transition(Pose::at(Vec3::new(0.0, -1.0, 8.0)), 1.5, Easing::EaseOut);
            while engine.update(black_box(FRAME)).is_none() {}
            black_box(engine.pose())
        })
    });
}

/// Benchmark: navigator frame update while idle and while moving
fn bench_navigator_update(c: &mut Criterion) {
    let config = NavigationConfig::default();

    c.bench_function("navigator_update_idle", |b| {
        let mut nav = Navigator::new(&config).unwrap();
        b.iter(|| nav.update(black_box(FRAME)))
    });

    c.bench_function("navigator_update_moving", |b| {
        let mut nav = Navigator::new(&config).unwrap();
        b.iter(|| {
            if !nav.engine().is_transitioning() {
                nav.next().unwrap();
            }
            nav.update(black_box(FRAME));
        })
    });
}

criterion_group!(
    benches,
    bench_interpolate_pose,
    bench_engine_transition,
    bench_navigator_update
);
criterion_main!(benches);
