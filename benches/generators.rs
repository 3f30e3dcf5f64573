use criterion::{criterion_group, criterion_main, Criterion};
use rand::{SeedableRng, XorShiftRng};
use wallmaze::{
    generators,
    units::{ColumnsCount, RowsCount},
};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::from_seed([0x0bad_cafe, 2, 3, 4]);

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::generate(RowsCount(32), ColumnsCount(32), &mut rng))
    });
}

fn bench_recursive_backtracker_maze_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::from_seed([0x0bad_cafe, 5, 6, 7]);

    c.bench_function("recursive_backtracker_maze_128", move |b| {
        b.iter(|| generators::generate(RowsCount(128), ColumnsCount(128), &mut rng))
    });
}

fn bench_shuffle_1000(c: &mut Criterion) {
    let mut rng = XorShiftRng::from_seed([0x0bad_cafe, 8, 9, 10]);
    let mut values: Vec<u32> = (0..1000).collect();

    c.bench_function("shuffle_1000", move |b| {
        b.iter(|| generators::shuffle(&mut rng, &mut values))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_128,
    bench_shuffle_1000
);
criterion_main!(benches);
