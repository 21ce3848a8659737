// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use canopy_quadtree::{QuadTree, Rect, px};

/// An n x n grid of adjacent boxes, one CSS-pixel cell apart.
fn grid_rects(n: i32, cell: i32) -> Vec<Rect> {
    let mut out = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            out.push(Rect::new(px(x * cell), px(y * cell), px(cell), px(cell)));
        }
    }
    out
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_insert");
    for n in [32, 64, 128] {
        let rects = grid_rects(n, 24);
        group.throughput(Throughput::Elements(rects.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &rects, |b, rects| {
            b.iter(|| {
                let mut tree: QuadTree<u32> = QuadTree::new();
                for (i, &rect) in rects.iter().enumerate() {
                    tree.insert(rect, i as u32);
                }
                black_box(tree.len())
            });
        });
    }
    group.finish();
}

fn bench_viewport_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree_viewport_query");
    for n in [64, 128] {
        let mut tree: QuadTree<u32> = QuadTree::new();
        for (i, rect) in grid_rects(n, 24).into_iter().enumerate() {
            tree.insert(rect, i as u32);
        }
        // A 1280x720 viewport somewhere inside the populated area.
        let viewport = Rect::new(px(200), px(200), px(1280), px(720));
        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| {
                let mut hits = 0_usize;
                tree.visit_rect(black_box(viewport), |_| hits += 1);
                black_box(hits)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_viewport_query);
criterion_main!(benches);
