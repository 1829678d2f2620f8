use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gridstag::{Executor, Filter, ParallelExecutor, PixelGrid, SequentialExecutor};

fn synthetic_grid(width: usize, height: usize) -> PixelGrid {
    PixelGrid::from_fn(width, height, |(y, x)| ((y * 131 + x * 71) ^ (x * y)) as u8).unwrap()
}

fn bench_median(c: &mut Criterion) {
    let grid = synthetic_grid(1024, 768);

    let mut group = c.benchmark_group("median_1024x768");
    group.sample_size(10);
    for mask in [3, 5] {
        group.bench_with_input(BenchmarkId::new("sequential", mask), &mask, |b, &mask| {
            b.iter(|| SequentialExecutor.apply(&grid, Filter::median(mask)).unwrap());
        });
        for workers in [2, 4, 8] {
            let executor = ParallelExecutor::new(workers).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{workers}"), mask),
                &mask,
                |b, &mask| {
                    b.iter(|| executor.apply(&grid, Filter::median(mask)).unwrap());
                },
            );
        }
    }
    group.finish();
}

fn bench_laplacian(c: &mut Criterion) {
    let grid = synthetic_grid(1024, 768);

    let mut group = c.benchmark_group("laplacian_1024x768");
    group.bench_function("sequential", |b| {
        b.iter(|| SequentialExecutor.apply(&grid, Filter::laplacian()).unwrap());
    });
    let executor = ParallelExecutor::new(4).unwrap();
    group.bench_function("parallel_4", |b| {
        b.iter(|| executor.apply(&grid, Filter::laplacian()).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_median, bench_laplacian);
criterion_main!(benches);
