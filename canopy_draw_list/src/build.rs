// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw-list construction.
//!
//! Construction is two-phase because a parent sub-list discovers its child
//! stacking contexts before the box walk reaches the blocks that position
//! them. Child sub-lists are allocated up front (so the parent can link
//! them in paint order) and parked in `pending`; when the walk reaches the
//! block establishing a child context, the sub-list is promoted to the
//! `ready` queue together with the cursor vector that positions it. The
//! build finishes with an iterative pass assigning every drawable its total
//! draw index.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use canopy_box_tree::{BlockKind, BlockRef, BoxTree, StackingContextTree, SubtreeId};
use canopy_quadtree::{QuadTree, Rect, Unit, Vector};

use crate::list::{BuildError, DrawIndex, DrawList, Drawable, EntryRef, SubList};

pub(crate) fn build(
    box_tree: &BoxTree,
    stacking_contexts: &StackingContextTree,
) -> Result<DrawList, BuildError> {
    let mut builder = Builder {
        box_tree,
        stacking_contexts,
        sub_lists: Vec::new(),
        index: QuadTree::new(),
        pending: vec![None; stacking_contexts.len()],
        ready: VecDeque::new(),
        ifc_origins: vec![None; box_tree.ifcs.len()],
    };
    builder.run()?;
    debug_assert!(
        builder.pending.iter().all(Option::is_none),
        "every allocated sub-list must have been populated"
    );
    let mut sub_lists = builder.sub_lists;
    assign_draw_indices(&mut sub_lists)?;
    Ok(DrawList {
        sub_lists,
        index: builder.index,
    })
}

struct ReadyItem {
    list: u32,
    stacking_context: u32,
    origin: Vector,
}

struct Builder<'a> {
    box_tree: &'a BoxTree,
    stacking_contexts: &'a StackingContextTree,
    sub_lists: Vec<SubList>,
    index: QuadTree<EntryRef>,
    /// Allocated-but-unpopulated sub-list per stacking context.
    pending: Vec<Option<u32>>,
    /// Sub-lists whose positioning vector is known.
    ready: VecDeque<ReadyItem>,
    /// Content origin and containing-block width per inline context,
    /// recorded when the walk passes the container box.
    ifc_origins: Vec<Option<(Vector, Unit)>>,
}

impl Builder<'_> {
    fn run(&mut self) -> Result<(), BuildError> {
        let Some(icb) = self.box_tree.initial_containing_block() else {
            return Ok(());
        };
        let root_list = self.alloc_sub_list()?;

        let icb_box = self.box_tree.block(icb);
        let border_top_left = icb_box.insets + icb_box.offsets.border_pos;
        self.push_entry(
            root_list,
            Drawable::BlockBox {
                block: icb,
                border_top_left,
            },
            Rect::from_pos_size(border_top_left, icb_box.offsets.border_size),
        )?;

        if !self.stacking_contexts.is_empty() {
            let first = self.alloc_sub_list()?;
            let root = &mut self.sub_lists[root_list as usize];
            root.midpoint = 0;
            root.children.push(first);
            let content_top_left = border_top_left + icb_box.offsets.content_pos;
            self.ready.push_back(ReadyItem {
                list: first,
                stacking_context: 0,
                origin: content_top_left,
            });
        }

        while let Some(item) = self.ready.pop_front() {
            self.populate(item.list, item.stacking_context, item.origin)?;
        }
        Ok(())
    }

    /// Fill one sub-list with its stacking context's drawables, allocating
    /// child sub-lists along the way.
    fn populate(&mut self, list: u32, sc_index: u32, origin: Vector) -> Result<(), BuildError> {
        let stacking_contexts = self.stacking_contexts;

        // Link child sub-lists in paint order. The midpoint separates the
        // negative stack levels (painted before this context's content)
        // from the rest.
        let mut midpoint = None;
        let mut count: u32 = 0;
        for child in stacking_contexts.children(sc_index) {
            let z_index = stacking_contexts.context(child).z_index;
            debug_assert!(
                z_index >= 0 || midpoint.is_none(),
                "negative stack levels must precede non-negative ones"
            );
            if z_index >= 0 && midpoint.is_none() {
                midpoint = Some(count);
            }
            let child_list = self.alloc_sub_list()?;
            self.sub_lists[list as usize].children.push(child_list);
            self.pending[child as usize] = Some(child_list);
            count += 1;
        }
        self.sub_lists[list as usize].midpoint = midpoint.unwrap_or(count);

        // The context's own box is entry 0.
        let root_ref = stacking_contexts.context(sc_index).block;
        let root_box = self.box_tree.block(root_ref);
        let border_top_left = origin + root_box.insets + root_box.offsets.border_pos;
        self.push_entry(
            list,
            Drawable::BlockBox {
                block: root_ref,
                border_top_left,
            },
            Rect::from_pos_size(border_top_left, root_box.offsets.border_size),
        )?;

        let content_top_left = border_top_left + root_box.offsets.content_pos;
        self.walk_blocks(list, root_ref, content_top_left)?;

        // Line boxes paint after the context's block descendants.
        for &ifc_id in &stacking_contexts.context(sc_index).ifcs {
            let Some((ifc_origin, width)) = self.ifc_origins[ifc_id.idx()] else {
                debug_assert!(false, "inline context container was not reached by the walk");
                continue;
            };
            let ifc = self.box_tree.ifc(ifc_id);
            for (line_index, line) in ifc.line_boxes.iter().enumerate() {
                let bbox = Rect::new(
                    ifc_origin.x,
                    ifc_origin.y + line.baseline - ifc.ascender,
                    width,
                    ifc.line_height(),
                );
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "Line-box counts are bounded by the 32-bit entry space checked on push."
                )]
                let line_box = line_index as u32;
                self.push_entry(
                    list,
                    Drawable::LineBox {
                        ifc: ifc_id,
                        line_box,
                        origin: ifc_origin,
                    },
                    bbox,
                )?;
            }
        }
        Ok(())
    }

    /// Pre-order walk of the box subtree below `root`, carrying the absolute
    /// content-origin cursor. Subtrees establishing other stacking contexts
    /// are stepped over and their parked sub-lists promoted; proxy leaves
    /// splice in their target subtree at the current cursor.
    fn walk_blocks(
        &mut self,
        list: u32,
        root: BlockRef,
        content_top_left: Vector,
    ) -> Result<(), BuildError> {
        struct WalkFrame {
            subtree: SubtreeId,
            next: u32,
            end: u32,
            cursor: Vector,
        }

        let box_tree = self.box_tree;
        let root_box = box_tree.block(root);
        let mut stack = vec![WalkFrame {
            subtree: root.subtree,
            next: root.index + 1,
            end: root.index + root_box.skip,
            cursor: content_top_left,
        }];

        while let Some(frame) = stack.last_mut() {
            if frame.next >= frame.end {
                stack.pop();
                continue;
            }
            let subtree = frame.subtree;
            let cursor = frame.cursor;
            let index = frame.next;
            let block = box_tree.subtree(subtree).block(index);
            frame.next += block.skip;

            if let Some(sc_id) = block.stacking_context {
                let parked = self.pending[sc_id.idx()].take();
                debug_assert!(
                    parked.is_some(),
                    "stacking context reached before its sub-list was allocated"
                );
                if let Some(parked) = parked {
                    self.ready.push_back(ReadyItem {
                        list: parked,
                        stacking_context: sc_id.index(),
                        origin: cursor,
                    });
                }
                continue;
            }

            match block.kind {
                BlockKind::Block(_) => {
                    let border_top_left = cursor + block.insets + block.offsets.border_pos;
                    self.push_entry(
                        list,
                        Drawable::BlockBox {
                            block: BlockRef::new(subtree, index),
                            border_top_left,
                        },
                        Rect::from_pos_size(border_top_left, block.offsets.border_size),
                    )?;
                    if block.skip > 1 {
                        stack.push(WalkFrame {
                            subtree,
                            next: index + 1,
                            end: index + block.skip,
                            cursor: border_top_left + block.offsets.content_pos,
                        });
                    }
                }
                BlockKind::IfcContainer(ifc_id) => {
                    // Lines are positioned against the container's content
                    // box and enumerated after the walk; the walk itself
                    // does not descend.
                    let ifc_origin = cursor + block.offsets.border_pos + block.offsets.content_pos;
                    self.ifc_origins[ifc_id.idx()] =
                        Some((ifc_origin, block.offsets.border_size.w));
                }
                BlockKind::SubtreeProxy(target) => {
                    let target_subtree = box_tree.subtree(target);
                    if !target_subtree.is_empty() {
                        #[allow(
                            clippy::cast_possible_truncation,
                            reason = "Subtree lengths are bounded by the 32-bit block index space."
                        )]
                        let end = target_subtree.len() as u32;
                        stack.push(WalkFrame {
                            subtree: target,
                            next: 0,
                            end,
                            cursor,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn alloc_sub_list(&mut self) -> Result<u32, BuildError> {
        let index =
            u32::try_from(self.sub_lists.len()).map_err(|_| BuildError::SubListOverflow)?;
        if index == u32::MAX {
            return Err(BuildError::SubListOverflow);
        }
        self.sub_lists.push(SubList::default());
        Ok(index)
    }

    fn push_entry(&mut self, list: u32, entry: Drawable, bbox: Rect) -> Result<(), BuildError> {
        let sub_list = &mut self.sub_lists[list as usize];
        let index = u32::try_from(sub_list.entries.len()).map_err(|_| BuildError::EntryOverflow)?;
        if index == u32::MAX {
            return Err(BuildError::EntryOverflow);
        }
        sub_list.entries.push(entry);
        self.index.insert(
            bbox,
            EntryRef {
                sub_list: list,
                entry: index,
            },
        );
        Ok(())
    }
}

/// Assign every drawable its total draw index: pre-order over the sub-list
/// tree, with each sub-list contributing its root on descent, its remaining
/// entries at the midpoint, and its children on either side.
fn assign_draw_indices(sub_lists: &mut [SubList]) -> Result<(), BuildError> {
    struct IndexFrame {
        list: u32,
        next_child: usize,
        mid_done: bool,
    }

    let Some(first) = sub_lists.first_mut() else {
        return Ok(());
    };
    let mut counter: u32 = 0;
    first.root_draw_index = DrawIndex(counter);
    counter = counter.checked_add(1).ok_or(BuildError::EntryOverflow)?;

    let mut stack = vec![IndexFrame {
        list: 0,
        next_child: 0,
        mid_done: false,
    }];
    while let Some(frame) = stack.last_mut() {
        let list = frame.list as usize;
        if !frame.mid_done && frame.next_child >= sub_lists[list].midpoint as usize {
            frame.mid_done = true;
            sub_lists[list].first_child_draw_index = DrawIndex(counter);
            let non_root = u32::try_from(sub_lists[list].entries.len().saturating_sub(1))
                .map_err(|_| BuildError::EntryOverflow)?;
            counter = counter.checked_add(non_root).ok_or(BuildError::EntryOverflow)?;
            continue;
        }
        if frame.next_child < sub_lists[list].children.len() {
            let child = sub_lists[list].children[frame.next_child];
            frame.next_child += 1;
            sub_lists[child as usize].root_draw_index = DrawIndex(counter);
            counter = counter.checked_add(1).ok_or(BuildError::EntryOverflow)?;
            stack.push(IndexFrame {
                list: child,
                next_child: 0,
                mid_done: false,
            });
            continue;
        }
        stack.pop();
    }
    Ok(())
}
