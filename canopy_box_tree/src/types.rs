// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers and per-box data produced by layout.

use canopy_quadtree::{Size, Unit, Vector};
use canopy_style::values::{ClipBox, Color};

/// Identifies one flat subtree of block boxes within a [`crate::BoxTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SubtreeId(u32);

impl SubtreeId {
    /// Create an id from a subtree index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The subtree index as a `usize`.
    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifies one inline formatting context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct IfcId(u32);

impl IfcId {
    /// Create an id from an inline-context index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The inline-context index as a `usize`.
    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Identifies one node of the stacking-context tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StackingContextId(u32);

impl StackingContextId {
    /// Create an id from a stacking-context index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The stacking-context index as a `usize`.
    #[must_use]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The stacking-context index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// A block box, addressed by subtree and position within it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlockRef {
    /// The owning subtree.
    pub subtree: SubtreeId,
    /// Pre-order index within the subtree.
    pub index: u32,
}

impl BlockRef {
    /// Create a reference from a subtree id and index.
    #[must_use]
    pub const fn new(subtree: SubtreeId, index: u32) -> Self {
        Self { subtree, index }
    }
}

/// The nested border / padding / content rectangles of a laid-out box.
///
/// `border_pos` is relative to the parent's content origin (the box's insets
/// are applied separately, on top); `padding_pos` and `content_pos` are
/// relative to the border origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BoxOffsets {
    /// Border-box origin, relative to the parent's content origin.
    pub border_pos: Vector,
    /// Border-box extent.
    pub border_size: Size,
    /// Padding-box origin, relative to the border origin.
    pub padding_pos: Vector,
    /// Padding-box extent.
    pub padding_size: Size,
    /// Content-box origin, relative to the border origin.
    pub content_pos: Vector,
    /// Content-box extent.
    pub content_size: Size,
}

/// Used border widths, one per side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SideWidths {
    /// Left border width.
    pub left: Unit,
    /// Right border width.
    pub right: Unit,
    /// Top border width.
    pub top: Unit,
    /// Bottom border width.
    pub bottom: Unit,
}

/// Used border colors, one per side.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SideColors {
    /// Left border color.
    pub left: Color,
    /// Right border color.
    pub right: Color,
    /// Top border color.
    pub top: Color,
    /// Bottom border color.
    pub bottom: Color,
}

impl Default for SideColors {
    fn default() -> Self {
        Self {
            left: Color::TRANSPARENT,
            right: Color::TRANSPARENT,
            top: Color::TRANSPARENT,
            bottom: Color::TRANSPARENT,
        }
    }
}

/// Used background values the painter reads per block box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundPaint {
    /// Background color.
    pub color: Color,
    /// The box the background is clipped to.
    pub clip: ClipBox,
}

impl Default for BackgroundPaint {
    fn default() -> Self {
        Self {
            color: Color::TRANSPARENT,
            clip: ClipBox::BorderBox,
        }
    }
}

/// Paint-relevant used values of an ordinary block box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BlockInfo {
    /// Background color and clip box.
    pub background: BackgroundPaint,
    /// Per-side border colors.
    pub border_colors: SideColors,
}

/// What a block-box slot holds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlockKind {
    /// An ordinary block box with paintable background and borders.
    Block(BlockInfo),
    /// The container of an inline formatting context; its line boxes are
    /// enumerated separately and the walk does not descend into it.
    IfcContainer(IfcId),
    /// A leaf standing in for the root of another subtree.
    SubtreeProxy(SubtreeId),
}

/// One laid-out block box in a flat pre-order subtree.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockBox {
    /// Number of boxes in this box's subtree, itself included. Adding `skip`
    /// to a box's index steps over the whole subtree in O(1).
    pub skip: u32,
    /// What the slot holds.
    pub kind: BlockKind,
    /// Border / padding / content geometry.
    pub offsets: BoxOffsets,
    /// Used border widths.
    pub borders: SideWidths,
    /// Relative-positioning offset, applied on top of `offsets.border_pos`.
    pub insets: Vector,
    /// The stacking context this box establishes, if any.
    pub stacking_context: Option<StackingContextId>,
}

impl BlockBox {
    /// A childless box of the given kind with zeroed geometry.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self {
            skip: 1,
            kind,
            offsets: BoxOffsets::default(),
            borders: SideWidths::default(),
            insets: Vector::ZERO,
            stacking_context: None,
        }
    }
}
