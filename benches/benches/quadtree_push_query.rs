// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_quadtree::{Aabb, Config, QuadTree};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Aabb::new(x as f64 * cell, y as f64 * cell, cell, cell));
        }
    }
    out
}

fn gen_grid_rects_i64(n: usize, cell: i64) -> Vec<Aabb<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            out.push(Aabb::new(x as i64 * cell, y as i64 * cell, cell, cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, world: f64, side: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (world - side);
        let y0 = rng.next_f64() * (world - side);
        out.push(Aabb::new(x0, y0, side, side));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Aabb<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((
            spread + rng.next_f64() * (2000.0 - 2.0 * spread),
            spread + rng.next_f64() * (2000.0 - 2.0 * spread),
        ));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Aabb::new(cx + dx, cy + dy, 12.0, 12.0));
        }
    }
    out
}

fn build<T: understory_quadtree::Scalar>(
    world: Aabb<T>,
    config: Config,
    rects: &[Aabb<T>],
) -> QuadTree<T, u32> {
    let mut tree = QuadTree::with_config(world, config);
    for (i, r) in (0_u32..).zip(rects.iter().copied()) {
        let _ = tree.push(r, i);
    }
    tree
}

fn bench_push_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_grid_f64");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        let world = Aabb::new(0.0, 0.0, n as f64 * 10.0, n as f64 * 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("push_then_query_n{}", n), |b| {
            b.iter_batched(
                || QuadTree::<f64, u32>::new(world),
                |mut tree| {
                    for (i, r) in (0_u32..).zip(rects.iter().copied()) {
                        let _ = tree.push(r, i);
                    }
                    let hits = tree
                        .query_region(Aabb::new(100.0, 100.0, 200.0, 200.0))
                        .len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("capacity_random_f64");
    let rects = gen_random_rects(4096, 2000.0, 12.0);
    let world = Aabb::new(0.0, 0.0, 2000.0, 2000.0);
    for &cap in &[1usize, 5, 16, 64] {
        let config = Config::default().with_max_objects(cap);
        group.bench_function(format!("push_all_cap{}", cap), |b| {
            b.iter(|| black_box(build(world, config, &rects).node_count()))
        });
    }
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_heavy");
    let world = Aabb::new(0.0, 0.0, 2000.0, 2000.0);
    let clustered = build(
        world,
        Config::default(),
        &gen_clustered_rects(32, 128, 120.0),
    );
    group.bench_function("clustered_small_windows", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..256 {
                let x = (q % 16) as f64 * 120.0;
                let y = (q / 16) as f64 * 120.0;
                total += clustered
                    .query_region(Aabb::new(x, y, 64.0, 64.0))
                    .len();
            }
            black_box(total)
        })
    });
    group.bench_function("clustered_whole_world", |b| {
        b.iter(|| black_box(clustered.query_region(world).len()))
    });

    let grid = build(
        Aabb::new(0, 0, 1024, 1024),
        Config::default(),
        &gen_grid_rects_i64(128, 8),
    );
    group.bench_function("grid_i64_viewports", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..64_i64 {
                let x = (q % 8) * 120;
                let y = (q / 8) * 120;
                total += grid.query_region(Aabb::new(x, y, 100, 100)).len();
            }
            black_box(total)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_push_grid, bench_capacity, bench_query_heavy);
criterion_main!(benches);
