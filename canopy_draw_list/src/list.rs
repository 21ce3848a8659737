// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The finished draw-order list and its painter-facing queries.

use alloc::vec::Vec;
use core::fmt;

use canopy_box_tree::{BlockRef, BoxTree, IfcId, StackingContextTree};
use canopy_quadtree::{QuadTree, Rect, Vector};

use crate::build;

/// Position of a drawable in the total paint order.
///
/// Lower paints first. Indices are contiguous over a finished
/// [`DrawList`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawIndex(pub(crate) u32);

impl DrawIndex {
    /// The raw index value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Stable reference to one drawable: a sub-list and an entry within it.
///
/// Entry 0 of a sub-list is the drawable of the box establishing that
/// sub-list's stacking context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EntryRef {
    /// Index of the owning sub-list.
    pub sub_list: u32,
    /// Index of the entry within the sub-list.
    pub entry: u32,
}

/// An atomic paintable unit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Drawable {
    /// A block box: background and borders.
    BlockBox {
        /// The box in the box tree.
        block: BlockRef,
        /// Absolute position of the box's border-box origin.
        border_top_left: Vector,
    },
    /// One line of an inline formatting context: its fragments and glyphs.
    LineBox {
        /// The owning inline context.
        ifc: IfcId,
        /// Index of the line within the inline context.
        line_box: u32,
        /// Absolute position of the inline context's content origin.
        origin: Vector,
    },
}

/// The drawables and child sub-lists of one stacking context.
///
/// Paint order within the sub-list is: the root entry, the child sub-lists
/// before `midpoint` (negative stack levels), the remaining entries, then
/// the child sub-lists at and after `midpoint`.
#[derive(Clone, Debug, Default)]
pub struct SubList {
    pub(crate) entries: Vec<Drawable>,
    pub(crate) children: Vec<u32>,
    pub(crate) midpoint: u32,
    pub(crate) root_draw_index: DrawIndex,
    pub(crate) first_child_draw_index: DrawIndex,
}

impl SubList {
    /// The drawables of this sub-list; index 0 is the root.
    #[must_use]
    pub fn entries(&self) -> &[Drawable] {
        &self.entries
    }

    /// Child sub-lists painting before this sub-list's non-root entries.
    #[must_use]
    pub fn children_before(&self) -> &[u32] {
        &self.children[..self.midpoint as usize]
    }

    /// Child sub-lists painting after this sub-list's non-root entries.
    #[must_use]
    pub fn children_after(&self) -> &[u32] {
        &self.children[self.midpoint as usize..]
    }

    /// Paint position of the root entry.
    #[must_use]
    pub fn root_draw_index(&self) -> DrawIndex {
        self.root_draw_index
    }

    /// Paint position of entry 1; later entries follow contiguously.
    #[must_use]
    pub fn first_child_draw_index(&self) -> DrawIndex {
        self.first_child_draw_index
    }
}

/// Build failures. Both bounds are far beyond realistic documents; hitting
/// one means the input is degenerate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// More sub-lists (stacking contexts) than the 32-bit index space.
    SubListOverflow,
    /// More drawables than the 32-bit index space.
    EntryOverflow,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubListOverflow => write!(f, "sub-list index space exhausted"),
            Self::EntryOverflow => write!(f, "drawable index space exhausted"),
        }
    }
}

impl core::error::Error for BuildError {}

/// The linearized paint order of one laid-out document, spatially indexed.
///
/// A `DrawList` is built once from a box tree and its stacking-context tree,
/// and is immutable afterwards. Every drawable has a total [`DrawIndex`];
/// painters cull with [`DrawList::find_in_rect`], sort the survivors by
/// [`DrawList::draw_index`], and read back the concrete
/// [`Drawable`]s with [`DrawList::entry`].
pub struct DrawList {
    pub(crate) sub_lists: Vec<SubList>,
    pub(crate) index: QuadTree<EntryRef>,
}

impl DrawList {
    /// Linearize a box tree into paint order.
    ///
    /// The stacking-context tree must describe `box_tree`: every context's
    /// root block must exist, and each context's children must be ordered
    /// with negative stack levels first. An empty box tree yields an empty
    /// list.
    pub fn build(
        box_tree: &BoxTree,
        stacking_contexts: &StackingContextTree,
    ) -> Result<Self, BuildError> {
        build::build(box_tree, stacking_contexts)
    }

    /// The sub-lists, indexed by their position; sub-list 0 is the root.
    #[must_use]
    pub fn sub_lists(&self) -> &[SubList] {
        &self.sub_lists
    }

    /// Total number of drawables.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.index.len()
    }

    /// Whether the list has no drawables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sub_lists.is_empty()
    }

    /// The drawable behind a reference.
    #[must_use]
    pub fn entry(&self, entry: EntryRef) -> &Drawable {
        &self.sub_lists[entry.sub_list as usize].entries[entry.entry as usize]
    }

    /// The total paint position of a drawable.
    #[must_use]
    pub fn draw_index(&self, entry: EntryRef) -> DrawIndex {
        let sub_list = &self.sub_lists[entry.sub_list as usize];
        if entry.entry == 0 {
            sub_list.root_draw_index
        } else {
            DrawIndex(sub_list.first_child_draw_index.0 + entry.entry - 1)
        }
    }

    /// Collect drawables whose bounding box may intersect `query`, in no
    /// particular order. Painters sort by [`Self::draw_index`].
    #[must_use]
    pub fn find_in_rect(&self, query: Rect) -> Vec<EntryRef> {
        self.index.find_in_rect(query)
    }

    /// Visit drawables whose bounding box may intersect `query` without
    /// allocating result storage.
    pub fn visit_rect<F: FnMut(EntryRef)>(&self, query: Rect, f: F) {
        self.index.visit_rect(query, f);
    }

    /// The topmost drawable whose bounding box covers the given position:
    /// of all covering drawables, the one painted last.
    ///
    /// Hit testing on bounding boxes is conservative for content that does
    /// not fill its box (text lines, transparent backgrounds); callers
    /// wanting precise hits filter further against the concrete
    /// [`Drawable`].
    #[must_use]
    pub fn hit_test(&self, position: Vector) -> Option<EntryRef> {
        let mut best: Option<(DrawIndex, EntryRef)> = None;
        self.index.visit_point(position, |entry| {
            let index = self.draw_index(entry);
            if best.is_none_or(|(top, _)| top < index) {
                best = Some((index, entry));
            }
        });
        best.map(|(_, entry)| entry)
    }

    /// The underlying spatial index.
    #[must_use]
    pub fn quadtree(&self) -> &QuadTree<EntryRef> {
        &self.index
    }

    /// Iterate every drawable in ascending paint order.
    #[must_use]
    pub fn paint_order(&self) -> PaintOrder<'_> {
        let mut stack = Vec::new();
        if !self.sub_lists.is_empty() {
            stack.push(Frame::new(0));
        }
        PaintOrder {
            lists: &self.sub_lists,
            stack,
        }
    }
}

impl fmt::Debug for DrawList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawList")
            .field("sub_lists", &self.sub_lists.len())
            .field("entries", &self.entry_count())
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct Frame {
    list: u32,
    root_emitted: bool,
    next_entry: u32,
    next_child: usize,
    mid_done: bool,
}

impl Frame {
    fn new(list: u32) -> Self {
        Self {
            list,
            root_emitted: false,
            next_entry: 1,
            next_child: 0,
            mid_done: false,
        }
    }
}

/// Iterator over all drawables in paint order. See
/// [`DrawList::paint_order`].
#[derive(Debug)]
pub struct PaintOrder<'a> {
    lists: &'a [SubList],
    stack: Vec<Frame>,
}

impl Iterator for PaintOrder<'_> {
    type Item = EntryRef;

    fn next(&mut self) -> Option<EntryRef> {
        loop {
            let frame = self.stack.last_mut()?;
            let list = &self.lists[frame.list as usize];
            if !frame.root_emitted {
                frame.root_emitted = true;
                return Some(EntryRef {
                    sub_list: frame.list,
                    entry: 0,
                });
            }
            if !frame.mid_done {
                if frame.next_child < list.midpoint as usize {
                    let child = list.children[frame.next_child];
                    frame.next_child += 1;
                    self.stack.push(Frame::new(child));
                    continue;
                }
                if (frame.next_entry as usize) < list.entries.len() {
                    let entry = frame.next_entry;
                    frame.next_entry += 1;
                    return Some(EntryRef {
                        sub_list: frame.list,
                        entry,
                    });
                }
                frame.mid_done = true;
            }
            if frame.next_child < list.children.len() {
                let child = list.children[frame.next_child];
                frame.next_child += 1;
                self.stack.push(Frame::new(child));
                continue;
            }
            self.stack.pop();
        }
    }
}
