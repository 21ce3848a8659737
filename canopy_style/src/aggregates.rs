// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value aggregates: groups of longhand properties that cascade together.
//!
//! The set of aggregates is closed and known at build time. Each aggregate is
//! a plain struct of [`SingleValue`]/[`MultiValue`] fields; the
//! [`AggregateValue`] sum carries any of them through untyped storage, and a
//! `match` recovers the concrete type. An aggregate either inherits as a
//! whole or not at all, and is either single- or multi-arity for all of its
//! fields.

use crate::declared::{CssWideKeyword, MultiValue, SingleValue};
use crate::values::{
    ClipBox, Color, Display, Float, LengthPercentage, LengthPercentageAuto, MaxSizeValue,
    Position, SizeValue, ZIndex,
};

/// Identifies one aggregate in the closed set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AggregateTag {
    /// `display`, `position`, `float`.
    BoxStyle,
    /// `width`, `min-width`, `max-width`.
    ContentWidth,
    /// `height`, `min-height`, `max-height`.
    ContentHeight,
    /// Left and right padding, border width, and margin.
    HorizontalEdges,
    /// Top and bottom padding, border width, and margin.
    VerticalEdges,
    /// `left`, `right`, `top`, `bottom`.
    Insets,
    /// `z-index`.
    StackOrder,
    /// Per-side border colors.
    BorderColors,
    /// `background-color`.
    BackgroundColor,
    /// `background-clip` (one value per background layer).
    BackgroundClip,
    /// `color`.
    TextColor,
}

/// How many values a field of an aggregate may carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arity {
    /// At most one value per field.
    Single,
    /// An ordered, bounded list of values per field.
    Multi,
}

impl AggregateTag {
    /// Every aggregate tag, in storage order.
    pub const ALL: [Self; 11] = [
        Self::BoxStyle,
        Self::ContentWidth,
        Self::ContentHeight,
        Self::HorizontalEdges,
        Self::VerticalEdges,
        Self::Insets,
        Self::StackOrder,
        Self::BorderColors,
        Self::BackgroundColor,
        Self::BackgroundClip,
        Self::TextColor,
    ];

    /// Whether every field of this aggregate inherits by default.
    #[must_use]
    pub fn inherited(self) -> bool {
        matches!(self, Self::TextColor)
    }

    /// Whether fields of this aggregate carry lists of values.
    #[must_use]
    pub fn arity(self) -> Arity {
        match self {
            Self::BackgroundClip => Arity::Multi,
            _ => Arity::Single,
        }
    }

    /// The singleton [`AggregateSet`] containing this tag.
    #[must_use]
    pub fn bit(self) -> AggregateSet {
        AggregateSet::from_bits_truncate(1 << self as u16)
    }
}

bitflags::bitflags! {
    /// A compact set of [`AggregateTag`]s.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AggregateSet: u16 {
        /// [`AggregateTag::BoxStyle`].
        const BOX_STYLE = 1 << 0;
        /// [`AggregateTag::ContentWidth`].
        const CONTENT_WIDTH = 1 << 1;
        /// [`AggregateTag::ContentHeight`].
        const CONTENT_HEIGHT = 1 << 2;
        /// [`AggregateTag::HorizontalEdges`].
        const HORIZONTAL_EDGES = 1 << 3;
        /// [`AggregateTag::VerticalEdges`].
        const VERTICAL_EDGES = 1 << 4;
        /// [`AggregateTag::Insets`].
        const INSETS = 1 << 5;
        /// [`AggregateTag::StackOrder`].
        const STACK_ORDER = 1 << 6;
        /// [`AggregateTag::BorderColors`].
        const BORDER_COLORS = 1 << 7;
        /// [`AggregateTag::BackgroundColor`].
        const BACKGROUND_COLOR = 1 << 8;
        /// [`AggregateTag::BackgroundClip`].
        const BACKGROUND_CLIP = 1 << 9;
        /// [`AggregateTag::TextColor`].
        const TEXT_COLOR = 1 << 10;
    }
}

/// Common surface of every aggregate struct.
pub trait Aggregate: Clone + Default {
    /// The tag identifying this aggregate.
    const TAG: AggregateTag;

    /// First-writer-wins merge: copy each field of `other` into `self` only
    /// where `self` is still undeclared.
    fn merge(&mut self, other: &Self);

    /// Replace every still-undeclared field with a CSS-wide keyword.
    fn fill(&mut self, keyword: CssWideKeyword);

    /// Whether every field is undeclared.
    fn is_empty(&self) -> bool;

    /// Downcast from the untyped sum.
    fn from_value(value: &AggregateValue) -> Option<&Self>;

    /// Wrap into the untyped sum.
    fn into_value(self) -> AggregateValue;
}

macro_rules! impl_aggregate {
    ($ty:ident { $($field:ident),+ $(,)? }) => {
        impl Aggregate for $ty {
            const TAG: AggregateTag = AggregateTag::$ty;

            fn merge(&mut self, other: &Self) {
                $( self.$field.or_declare(&other.$field); )+
            }

            fn fill(&mut self, keyword: CssWideKeyword) {
                $( self.$field.fill(keyword); )+
            }

            fn is_empty(&self) -> bool {
                $( self.$field.is_undeclared() )&&+
            }

            fn from_value(value: &AggregateValue) -> Option<&Self> {
                match value {
                    AggregateValue::$ty(aggregate) => Some(aggregate),
                    _ => None,
                }
            }

            fn into_value(self) -> AggregateValue {
                AggregateValue::$ty(self)
            }
        }

        impl From<$ty> for AggregateValue {
            fn from(value: $ty) -> Self {
                Self::$ty(value)
            }
        }
    };
}

/// `display`, `position`, and `float`. Non-inherited, single-arity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoxStyle {
    /// The `display` property.
    pub display: SingleValue<Display>,
    /// The `position` property.
    pub position: SingleValue<Position>,
    /// The `float` property.
    pub float: SingleValue<Float>,
}

impl_aggregate!(BoxStyle { display, position, float });

/// Horizontal sizing: `width` and its min/max bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentWidth {
    /// The `width` property.
    pub width: SingleValue<SizeValue>,
    /// The `min-width` property.
    pub min_width: SingleValue<LengthPercentage>,
    /// The `max-width` property.
    pub max_width: SingleValue<MaxSizeValue>,
}

impl_aggregate!(ContentWidth { width, min_width, max_width });

/// Vertical sizing: `height` and its min/max bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentHeight {
    /// The `height` property.
    pub height: SingleValue<SizeValue>,
    /// The `min-height` property.
    pub min_height: SingleValue<LengthPercentage>,
    /// The `max-height` property.
    pub max_height: SingleValue<MaxSizeValue>,
}

impl_aggregate!(ContentHeight { height, min_height, max_height });

/// Left and right padding, border widths, and margins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorizontalEdges {
    /// The `padding-left` property.
    pub padding_left: SingleValue<LengthPercentage>,
    /// The `padding-right` property.
    pub padding_right: SingleValue<LengthPercentage>,
    /// The `border-left-width` property, in CSS pixels.
    pub border_left: SingleValue<f32>,
    /// The `border-right-width` property, in CSS pixels.
    pub border_right: SingleValue<f32>,
    /// The `margin-left` property.
    pub margin_left: SingleValue<LengthPercentageAuto>,
    /// The `margin-right` property.
    pub margin_right: SingleValue<LengthPercentageAuto>,
}

impl_aggregate!(HorizontalEdges {
    padding_left,
    padding_right,
    border_left,
    border_right,
    margin_left,
    margin_right,
});

/// Top and bottom padding, border widths, and margins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerticalEdges {
    /// The `padding-top` property.
    pub padding_top: SingleValue<LengthPercentage>,
    /// The `padding-bottom` property.
    pub padding_bottom: SingleValue<LengthPercentage>,
    /// The `border-top-width` property, in CSS pixels.
    pub border_top: SingleValue<f32>,
    /// The `border-bottom-width` property, in CSS pixels.
    pub border_bottom: SingleValue<f32>,
    /// The `margin-top` property.
    pub margin_top: SingleValue<LengthPercentageAuto>,
    /// The `margin-bottom` property.
    pub margin_bottom: SingleValue<LengthPercentageAuto>,
}

impl_aggregate!(VerticalEdges {
    padding_top,
    padding_bottom,
    border_top,
    border_bottom,
    margin_top,
    margin_bottom,
});

/// The box inset properties used by relative and absolute positioning.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Insets {
    /// The `left` property.
    pub left: SingleValue<LengthPercentageAuto>,
    /// The `right` property.
    pub right: SingleValue<LengthPercentageAuto>,
    /// The `top` property.
    pub top: SingleValue<LengthPercentageAuto>,
    /// The `bottom` property.
    pub bottom: SingleValue<LengthPercentageAuto>,
}

impl_aggregate!(Insets { left, right, top, bottom });

/// `z-index`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackOrder {
    /// The `z-index` property.
    pub z_index: SingleValue<ZIndex>,
}

impl_aggregate!(StackOrder { z_index });

/// Per-side border colors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BorderColors {
    /// The `border-left-color` property.
    pub left: SingleValue<Color>,
    /// The `border-right-color` property.
    pub right: SingleValue<Color>,
    /// The `border-top-color` property.
    pub top: SingleValue<Color>,
    /// The `border-bottom-color` property.
    pub bottom: SingleValue<Color>,
}

impl_aggregate!(BorderColors { left, right, top, bottom });

/// `background-color`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackgroundColor {
    /// The `background-color` property.
    pub color: SingleValue<Color>,
}

impl_aggregate!(BackgroundColor { color });

/// `background-clip`. Multi-arity: one value per background layer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BackgroundClip {
    /// The `background-clip` property.
    pub clip: MultiValue<ClipBox>,
}

impl_aggregate!(BackgroundClip { clip });

/// `color`. The only inherited aggregate in the set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextColor {
    /// The `color` property.
    pub color: SingleValue<Color>,
}

impl_aggregate!(TextColor { color });

/// An aggregate of any tag; the storage currency of the cascade.
#[derive(Clone, Debug, PartialEq)]
pub enum AggregateValue {
    /// A [`BoxStyle`] aggregate.
    BoxStyle(BoxStyle),
    /// A [`ContentWidth`] aggregate.
    ContentWidth(ContentWidth),
    /// A [`ContentHeight`] aggregate.
    ContentHeight(ContentHeight),
    /// A [`HorizontalEdges`] aggregate.
    HorizontalEdges(HorizontalEdges),
    /// A [`VerticalEdges`] aggregate.
    VerticalEdges(VerticalEdges),
    /// An [`Insets`] aggregate.
    Insets(Insets),
    /// A [`StackOrder`] aggregate.
    StackOrder(StackOrder),
    /// A [`BorderColors`] aggregate.
    BorderColors(BorderColors),
    /// A [`BackgroundColor`] aggregate.
    BackgroundColor(BackgroundColor),
    /// A [`BackgroundClip`] aggregate.
    BackgroundClip(BackgroundClip),
    /// A [`TextColor`] aggregate.
    TextColor(TextColor),
}

macro_rules! for_each_variant {
    ($value:expr, $aggregate:ident => $body:expr) => {
        match $value {
            AggregateValue::BoxStyle($aggregate) => $body,
            AggregateValue::ContentWidth($aggregate) => $body,
            AggregateValue::ContentHeight($aggregate) => $body,
            AggregateValue::HorizontalEdges($aggregate) => $body,
            AggregateValue::VerticalEdges($aggregate) => $body,
            AggregateValue::Insets($aggregate) => $body,
            AggregateValue::StackOrder($aggregate) => $body,
            AggregateValue::BorderColors($aggregate) => $body,
            AggregateValue::BackgroundColor($aggregate) => $body,
            AggregateValue::BackgroundClip($aggregate) => $body,
            AggregateValue::TextColor($aggregate) => $body,
        }
    };
}

impl AggregateValue {
    /// An all-undeclared aggregate of the given tag.
    #[must_use]
    pub fn new_default(tag: AggregateTag) -> Self {
        match tag {
            AggregateTag::BoxStyle => Self::BoxStyle(BoxStyle::default()),
            AggregateTag::ContentWidth => Self::ContentWidth(ContentWidth::default()),
            AggregateTag::ContentHeight => Self::ContentHeight(ContentHeight::default()),
            AggregateTag::HorizontalEdges => Self::HorizontalEdges(HorizontalEdges::default()),
            AggregateTag::VerticalEdges => Self::VerticalEdges(VerticalEdges::default()),
            AggregateTag::Insets => Self::Insets(Insets::default()),
            AggregateTag::StackOrder => Self::StackOrder(StackOrder::default()),
            AggregateTag::BorderColors => Self::BorderColors(BorderColors::default()),
            AggregateTag::BackgroundColor => Self::BackgroundColor(BackgroundColor::default()),
            AggregateTag::BackgroundClip => Self::BackgroundClip(BackgroundClip::default()),
            AggregateTag::TextColor => Self::TextColor(TextColor::default()),
        }
    }

    /// The tag of the contained aggregate.
    #[must_use]
    pub fn tag(&self) -> AggregateTag {
        match self {
            Self::BoxStyle(_) => AggregateTag::BoxStyle,
            Self::ContentWidth(_) => AggregateTag::ContentWidth,
            Self::ContentHeight(_) => AggregateTag::ContentHeight,
            Self::HorizontalEdges(_) => AggregateTag::HorizontalEdges,
            Self::VerticalEdges(_) => AggregateTag::VerticalEdges,
            Self::Insets(_) => AggregateTag::Insets,
            Self::StackOrder(_) => AggregateTag::StackOrder,
            Self::BorderColors(_) => AggregateTag::BorderColors,
            Self::BackgroundColor(_) => AggregateTag::BackgroundColor,
            Self::BackgroundClip(_) => AggregateTag::BackgroundClip,
            Self::TextColor(_) => AggregateTag::TextColor,
        }
    }

    /// First-writer-wins merge with an aggregate of the same tag.
    ///
    /// Merging aggregates of different tags is a caller error and leaves
    /// `self` unchanged.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.tag(), other.tag(), "merging mismatched aggregates");
        match (self, other) {
            (Self::BoxStyle(a), Self::BoxStyle(b)) => a.merge(b),
            (Self::ContentWidth(a), Self::ContentWidth(b)) => a.merge(b),
            (Self::ContentHeight(a), Self::ContentHeight(b)) => a.merge(b),
            (Self::HorizontalEdges(a), Self::HorizontalEdges(b)) => a.merge(b),
            (Self::VerticalEdges(a), Self::VerticalEdges(b)) => a.merge(b),
            (Self::Insets(a), Self::Insets(b)) => a.merge(b),
            (Self::StackOrder(a), Self::StackOrder(b)) => a.merge(b),
            (Self::BorderColors(a), Self::BorderColors(b)) => a.merge(b),
            (Self::BackgroundColor(a), Self::BackgroundColor(b)) => a.merge(b),
            (Self::BackgroundClip(a), Self::BackgroundClip(b)) => a.merge(b),
            (Self::TextColor(a), Self::TextColor(b)) => a.merge(b),
            _ => {}
        }
    }

    /// Replace every still-undeclared field with a CSS-wide keyword.
    pub fn fill(&mut self, keyword: CssWideKeyword) {
        for_each_variant!(self, aggregate => aggregate.fill(keyword));
    }

    /// Whether every field is undeclared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        for_each_variant!(self, aggregate => aggregate.is_empty())
    }

    /// Downcast to a concrete aggregate type.
    #[must_use]
    pub fn get<A: Aggregate>(&self) -> Option<&A> {
        A::from_value(self)
    }
}
