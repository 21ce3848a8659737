// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use canopy_box_tree::{
    BlockBox, BlockInfo, BlockKind, BlockRef, BoxTree, StackingContext, StackingContextId,
    StackingContextTree, Subtree, SubtreeId,
};
use canopy_draw_list::DrawList;
use canopy_quadtree::{Rect, Size, Vector, px};

/// A document with one root stacking context over `contexts` child contexts,
/// each containing a column of `blocks_per_context` plain blocks.
fn synthetic_document(contexts: u32, blocks_per_context: u32) -> (BoxTree, StackingContextTree) {
    let per_context = 1 + blocks_per_context;
    let total = 2 + contexts * per_context;

    let mut blocks = Vec::with_capacity(total as usize);

    let mut icb = BlockBox::new(BlockKind::Block(BlockInfo::default()));
    icb.skip = total;
    icb.offsets.border_size = Size::new(px(1920), px(100_000));
    icb.offsets.content_size = icb.offsets.border_size;
    blocks.push(icb);

    let mut root = BlockBox::new(BlockKind::Block(BlockInfo::default()));
    root.skip = total - 1;
    root.offsets.border_size = Size::new(px(1920), px(100_000));
    root.offsets.content_size = root.offsets.border_size;
    root.stacking_context = Some(StackingContextId::new(0));
    blocks.push(root);

    let mut sc_nodes = vec![StackingContext {
        skip: 1 + contexts,
        z_index: 0,
        block: BlockRef::new(SubtreeId::new(0), 1),
        ifcs: Vec::new(),
    }];

    // Children of a context must list negative stack levels first, so the
    // negative contexts are generated before the rest.
    let z_of = |context: u32| (context as i32 % 5) - 2;
    let ordered = (0..contexts)
        .filter(|&context| z_of(context) < 0)
        .chain((0..contexts).filter(|&context| z_of(context) >= 0));

    for context in ordered {
        let block_index = blocks.len() as u32;
        let sc_index = sc_nodes.len() as u32;
        let mut sc_block = BlockBox::new(BlockKind::Block(BlockInfo::default()));
        sc_block.skip = per_context;
        sc_block.offsets.border_pos = Vector::new(0, px(200) * context as i32);
        sc_block.offsets.border_size = Size::new(px(1920), px(200));
        sc_block.offsets.content_size = sc_block.offsets.border_size;
        sc_block.stacking_context = Some(StackingContextId::new(sc_index));
        blocks.push(sc_block);

        sc_nodes.push(StackingContext {
            skip: 1,
            z_index: z_of(context),
            block: BlockRef::new(SubtreeId::new(0), block_index),
            ifcs: Vec::new(),
        });

        for row in 0..blocks_per_context {
            let mut block = BlockBox::new(BlockKind::Block(BlockInfo::default()));
            block.offsets.border_pos = Vector::new(px(8), px(20) * row as i32);
            block.offsets.border_size = Size::new(px(400), px(16));
            block.offsets.content_size = block.offsets.border_size;
            blocks.push(block);
        }
    }

    (
        BoxTree {
            subtrees: vec![Subtree { blocks }],
            ifcs: Vec::new(),
        },
        StackingContextTree { contexts: sc_nodes },
    )
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_list_build");
    for (contexts, blocks) in [(10, 50), (100, 50), (100, 500)] {
        let (box_tree, sc_tree) = synthetic_document(contexts, blocks);
        let drawables = (2 + contexts * (1 + blocks)) as u64;
        group.throughput(Throughput::Elements(drawables));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{contexts}x{blocks}")),
            &(box_tree, sc_tree),
            |b, (box_tree, sc_tree)| {
                b.iter(|| {
                    let list = DrawList::build(black_box(box_tree), black_box(sc_tree)).unwrap();
                    black_box(list.entry_count())
                });
            },
        );
    }
    group.finish();
}

fn bench_cull_and_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_list_cull_and_sort");
    for (contexts, blocks) in [(100, 50), (100, 500)] {
        let (box_tree, sc_tree) = synthetic_document(contexts, blocks);
        let list = DrawList::build(&box_tree, &sc_tree).unwrap();
        let viewport = Rect::new(0, px(5_000), px(1920), px(1080));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{contexts}x{blocks}")),
            &list,
            |b, list| {
                b.iter(|| {
                    let mut visible = list.find_in_rect(black_box(viewport));
                    visible.sort_by_key(|&entry| list.draw_index(entry));
                    black_box(visible.len())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_cull_and_sort);
criterion_main!(benches);
