use criterion::{criterion_group, criterion_main, Criterion};
use mapty::db::MemoryBlobStore;
use mapty::models::{Coords, Workout, WorkoutId};
use mapty::services::{HtmlWorkoutList, MapBinder, RecordingMap, WorkoutController, WorkoutStore};
use std::hint::black_box;

fn seeded_store(count: usize) -> MemoryBlobStore {
    let blobs = MemoryBlobStore::new();
    let workouts: Vec<Workout> = (0..count)
        .map(|i| {
            let coords = Coords::new(37.0 + i as f64 * 0.001, -122.0);
            if i % 2 == 0 {
                Workout::running(coords, 5.0 + i as f64 * 0.01, 25.0, 175.0)
            } else {
                Workout::cycling(coords, 30.0, 75.0 + i as f64 * 0.1, 250.0)
            }
        })
        .collect();
    WorkoutStore::new(Box::new(blobs.clone())).save(&workouts);
    blobs
}

fn benchmark_reload_and_select(c: &mut Criterion) {
    let blobs = seeded_store(1_000);

    let mut group = c.benchmark_group("workout_collection");

    group.bench_function("reload_1000", |b| {
        b.iter(|| {
            let mut controller = WorkoutController::new(
                WorkoutStore::new(Box::new(blobs.clone())),
                MapBinder::new(RecordingMap::default(), 13),
                HtmlWorkoutList::new(),
            );
            controller.on_position(Ok(Coords::new(37.0, -122.0)));
            black_box(controller.workouts().len())
        })
    });

    let mut controller = WorkoutController::new(
        WorkoutStore::new(Box::new(blobs.clone())),
        MapBinder::new(RecordingMap::default(), 13),
        HtmlWorkoutList::new(),
    );
    controller.on_position(Ok(Coords::new(37.0, -122.0)));
    let last: WorkoutId = controller.workouts()[999].id().clone();

    group.bench_function("select_last_of_1000", |b| {
        b.iter(|| controller.select(black_box(&last)).map(|w| w.clicks()))
    });

    group.finish();
}

criterion_group!(benches, benchmark_reload_and_select);
criterion_main!(benches);
