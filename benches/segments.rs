use criterion::{criterion_group, criterion_main, Criterion};
use rand::{SeedableRng, XorShiftRng};
use wallmaze::{
    generators,
    segments::{self, SegmentScale},
    units::{CellHeight, CellWidth, ColumnsCount, RowsCount, WallThickness},
};

fn bench_wall_segments_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::from_seed([0x5e9_0000, 2, 3, 4]);
    let maze = generators::generate(RowsCount(32), ColumnsCount(32), &mut rng).unwrap();
    let scale = SegmentScale::new(CellWidth(40.0), CellHeight(40.0), WallThickness(10.0));

    c.bench_function("wall_segments_32", move |b| {
        b.iter(|| segments::wall_segments(&maze, &scale))
    });
}

fn bench_segment_plan_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::from_seed([0x5e9_0000, 5, 6, 7]);
    let maze = generators::generate(RowsCount(32), ColumnsCount(32), &mut rng).unwrap();
    let scale = SegmentScale::new(CellWidth(40.0), CellHeight(40.0), WallThickness(10.0));

    c.bench_function("segment_plan_32", move |b| {
        b.iter(|| segments::segment_plan(&maze, &scale))
    });
}

criterion_group!(benches, bench_wall_segments_32, bench_segment_plan_32);
criterion_main!(benches);
