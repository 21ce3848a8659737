// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Concrete CSS value types carried by declared fields.
//!
//! These are *specified* values as produced by a parser: lengths are still in
//! CSS pixels or percentages, nothing has been resolved against a containing
//! block yet. Coercion to layout units happens downstream, in layout.

pub use peniko::Color;

/// Value of the `display` property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Display {
    /// Block-level box.
    Block,
    /// Inline-level box.
    Inline,
    /// Inline-level block container.
    InlineBlock,
    /// No box is generated.
    None,
}

/// Value of the `position` property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    /// Normal flow.
    Static,
    /// Normal flow, shifted by the inset properties afterwards.
    Relative,
    /// Taken out of flow, positioned against the containing block.
    Absolute,
}

/// Value of the `float` property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Float {
    /// Not floated.
    None,
    /// Floated to the left.
    Left,
    /// Floated to the right.
    Right,
}

/// A length or percentage.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LengthPercentage {
    /// Absolute length in CSS pixels.
    Px(f32),
    /// Percentage of the relevant base (0–100).
    Percent(f32),
}

/// A length, percentage, or `auto`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LengthPercentageAuto {
    /// Absolute length in CSS pixels.
    Px(f32),
    /// Percentage of the relevant base (0–100).
    Percent(f32),
    /// Resolved by layout.
    Auto,
}

/// Value of the `width` / `height` properties.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SizeValue {
    /// Absolute length in CSS pixels.
    Px(f32),
    /// Percentage of the containing block.
    Percent(f32),
    /// Resolved by layout.
    Auto,
}

/// Value of the `max-width` / `max-height` properties.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MaxSizeValue {
    /// Absolute length in CSS pixels.
    Px(f32),
    /// Percentage of the containing block.
    Percent(f32),
    /// No maximum.
    None,
}

/// Value of the `z-index` property.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ZIndex {
    /// Stack level of the parent; does not establish a stacking context.
    Auto,
    /// Explicit stack level; establishes a stacking context.
    Integer(i32),
}

/// A painting area keyword, as used by `background-clip`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClipBox {
    /// Paint within the border box.
    BorderBox,
    /// Paint within the padding box.
    PaddingBox,
    /// Paint within the content box.
    ContentBox,
}
