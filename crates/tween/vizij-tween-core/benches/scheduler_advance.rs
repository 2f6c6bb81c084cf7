use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use vizij_tween_core::{Ease, FrameTime, OwnerKey, Scheduler, TargetHandle, TweenMode};

fn populated(n: usize) -> Scheduler {
    let mut s = Scheduler::default();
    for i in 0..n {
        let id = s
            .allocate_vector(
                TweenMode::Position,
                [0.0; 3],
                [i as f32, 1.0, 2.0],
                f32::INFINITY,
                false,
                OwnerKey(i as i64),
                TargetHandle(i as u64),
            )
            .expect("vector mode");
        s.set_ease(id, Ease::ALL[i % Ease::ALL.len()]).expect("live");
    }
    s
}

fn advance_1k_vector_tweens(c: &mut Criterion) {
    let mut s = populated(1024);
    let frame = FrameTime::new(1.0 / 60.0);
    c.bench_function("advance_1k_vector_tweens", |b| {
        b.iter(|| {
            black_box(s.advance(black_box(frame)).changes.len());
        });
    });
}

fn allocate_and_complete(c: &mut Criterion) {
    let mut s = Scheduler::default();
    c.bench_function("allocate_and_complete_64", |b| {
        b.iter(|| {
            for i in 0..64 {
                let _ = s.allocate_vector(
                    TweenMode::Scale,
                    [1.0; 3],
                    [2.0; 3],
                    0.0,
                    false,
                    OwnerKey(i),
                    TargetHandle(i as u64),
                );
            }
            black_box(s.advance(FrameTime::new(0.016)).events.len());
        });
    });
}

criterion_group!(benches, advance_1k_vector_tweens, allocate_and_complete);
criterion_main!(benches);
