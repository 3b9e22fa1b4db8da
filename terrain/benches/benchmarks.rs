use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use terrain::{Fusion, HeightGrid, Mesh};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn rolling_hills(size: usize) -> HeightGrid {
    let samples: Vec<u8> = (0..size * size)
        .map(|idx| {
            let (col, row) = ((idx % size) as f32, (idx / size) as f32);
            let h = ((col * 0.05).sin() + (row * 0.07).cos() + 2.0) * 63.0;
            h as u8
        })
        .collect();
    HeightGrid::new(size, size, samples).unwrap()
}

fn spiral(size: usize, n: usize) -> Vec<Vec3> {
    let center = size as f32 / 2.0;
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let angle = t * 12.0 * std::f32::consts::PI;
            let r = t * center * 0.9;
            Vec3::new(center + r * angle.cos(), 20.0 + t * 10.0, center + r * angle.sin())
        })
        .collect()
}

fn terrain_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("Terrain Mesh");

    for size in [128, 512] {
        let grid = rolling_hills(size);
        let trail = spiral(size, 2_000);

        group.bench_with_input(BenchmarkId::new("bare", size), &grid, |b, grid| {
            b.iter(|| Mesh::builder().trail(&[]).build(grid).unwrap())
        });

        for fusion in [Fusion::Nearest, Fusion::LastWins] {
            group.bench_with_input(
                BenchmarkId::new(format!("{fusion:?}"), size),
                &(&grid, &trail),
                |b, (grid, trail)| {
                    b.iter(|| {
                        Mesh::builder()
                            .trail(trail)
                            .fusion(fusion)
                            .build(grid)
                            .unwrap()
                    })
                },
            );
        }
    }
}

criterion_group!(benches, terrain_mesh);
criterion_main!(benches);
