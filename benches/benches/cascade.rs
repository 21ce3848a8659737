// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use canopy_style::{
    Aggregate, AggregateValue, BlockId, BoxStyle, CascadedValues, DeclaredValueStore, Display,
    Float, HorizontalEdges, Importance, LengthPercentage, Position, SingleValue,
};

/// Fill a store with `blocks` declaration blocks, each declaring a couple of
/// aggregates, and return their ids in cascade order (newest first).
fn populate_store(blocks: u32) -> (DeclaredValueStore, Vec<BlockId>) {
    let mut store = DeclaredValueStore::new();
    let mut ids = Vec::with_capacity(blocks as usize);
    for i in 0..blocks {
        let id = store.open_block().unwrap();
        store.add_value(
            Importance::Normal,
            &BoxStyle {
                display: SingleValue::Declared(if i % 2 == 0 {
                    Display::Block
                } else {
                    Display::Inline
                }),
                position: SingleValue::Declared(Position::Relative),
                float: SingleValue::Declared(Float::None),
            }
            .into_value(),
        );
        store.add_value(
            Importance::Normal,
            &HorizontalEdges {
                padding_left: SingleValue::Declared(LengthPercentage::Px(i as f32)),
                padding_right: SingleValue::Declared(LengthPercentage::Px(i as f32)),
                ..Default::default()
            }
            .into_value(),
        );
        store.close_block();
        ids.push(id);
    }
    ids.reverse();
    (store, ids)
}

fn bench_block_feed(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_block_feed");
    for blocks in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(u64::from(blocks)));
        group.bench_with_input(BenchmarkId::from_parameter(blocks), &blocks, |b, &blocks| {
            b.iter(|| {
                let (store, ids) = populate_store(black_box(blocks));
                black_box((store.block_count(), ids.len()))
            });
        });
    }
    group.finish();
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_apply");
    for matches in [4, 16, 64] {
        let (store, ids) = populate_store(matches);
        group.bench_with_input(BenchmarkId::from_parameter(matches), &ids, |b, ids| {
            b.iter(|| {
                // Per-element resolution: apply every matching block, newest
                // first, into one aggregate.
                let mut style = BoxStyle::default();
                for &id in ids {
                    store.apply(id, Importance::Normal, &mut style);
                }
                black_box(style)
            });
        });
    }
    group.finish();
}

fn bench_collapse(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_collapse");
    let value: AggregateValue = BoxStyle {
        display: SingleValue::Declared(Display::Block),
        ..Default::default()
    }
    .into_value();
    group.bench_function("set_aggregate_x64", |b| {
        b.iter(|| {
            let mut cascaded = CascadedValues::new();
            for _ in 0..64 {
                cascaded.set_aggregate(black_box(&value));
            }
            black_box(cascaded.tags())
        });
    });
    group.finish();
}

criterion_group!(benches, bench_block_feed, bench_apply, bench_collapse);
criterion_main!(benches);
