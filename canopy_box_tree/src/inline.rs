// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline formatting contexts and their line boxes.

use alloc::vec::Vec;
use core::ops::Range;

use canopy_quadtree::{Unit, Vector};

/// One positioned glyph of an inline formatting context.
///
/// Glyph ids are font-specific; shaping resolved them before layout. The
/// painter pairs them with the font handle it tracks per inline context.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Glyph id within the font.
    pub id: u32,
    /// Pen position, relative to the inline context's content origin, on
    /// the owning line's baseline.
    pub position: Vector,
}

/// One line of an inline formatting context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineBox {
    /// Baseline offset from the top of the inline context's content box.
    pub baseline: Unit,
    /// The half-open range into [`InlineContext::glyphs`] laid out on this
    /// line.
    pub elements: Range<u32>,
}

/// A laid-out inline formatting context.
///
/// Paint-order construction only needs the vertical metrics and the
/// line-box positions; the glyph stream is carried through untouched for
/// the painter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineContext {
    /// Distance from the baseline to the top of a line (non-negative).
    pub ascender: Unit,
    /// Signed offset from the baseline to the bottom of a line;
    /// non-positive when the line extends below the baseline, so
    /// `ascender - descender` is the line height.
    pub descender: Unit,
    /// The lines, top to bottom.
    pub line_boxes: Vec<LineBox>,
    /// The shaped glyphs, indexed by line via [`LineBox::elements`].
    pub glyphs: Vec<Glyph>,
}

impl InlineContext {
    /// Height of one line: ascent plus descent.
    #[inline]
    #[must_use]
    pub fn line_height(&self) -> Unit {
        self.ascender - self.descender
    }

    /// The glyphs of one line.
    #[must_use]
    pub fn line_glyphs(&self, line: &LineBox) -> &[Glyph] {
        &self.glyphs[line.elements.start as usize..line.elements.end as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_spans_both_sides_of_the_baseline() {
        let ifc = InlineContext {
            ascender: 20,
            descender: -5,
            ..Default::default()
        };
        assert_eq!(ifc.line_height(), 25);
    }

    #[test]
    fn line_glyphs_slice_by_element_range() {
        let glyph = |id, x| Glyph {
            id,
            position: Vector::new(x, 0),
        };
        let ifc = InlineContext {
            ascender: 10,
            descender: -2,
            line_boxes: alloc::vec![
                LineBox {
                    baseline: 10,
                    elements: 0..2,
                },
                LineBox {
                    baseline: 22,
                    elements: 2..3,
                },
            ],
            glyphs: alloc::vec![glyph(7, 0), glyph(8, 40), glyph(9, 0)],
        };
        assert_eq!(ifc.line_glyphs(&ifc.line_boxes[0]).len(), 2);
        assert_eq!(ifc.line_glyphs(&ifc.line_boxes[1]), &[glyph(9, 0)]);
    }
}
