// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Style: declared-value storage and per-element cascade collapse.
//!
//! CSS longhands that always travel together are grouped into *aggregates*
//! (for example [`BoxStyle`] holds `display`, `position`, and `float`); each
//! field is a sum over "nothing declared", the CSS-wide keywords, and a
//! concrete value. Two structures build on that:
//!
//! - [`DeclaredValueStore`] keeps one immutable *declaration block* per rule.
//!   A parser feeds each block's declarations in **reverse source order**,
//!   and every field keeps its first writer, so a closed block already holds
//!   the rule's partially cascaded values. The `all` shorthand is recorded
//!   once per importance and absorbs every later write.
//! - [`CascadedValues`] collapses the blocks matching one element. Style
//!   resolution walks the matches in reverse cascade order (origin,
//!   importance, specificity, source) and merges each block in; the result
//!   maps each touched aggregate tag to its winning values.
//!
//! Parsing, selector matching, and value coercion live elsewhere; this crate
//! starts at already-typed declared values.
//!
//! # Example
//!
//! ```rust
//! use canopy_style::{
//!     Aggregate, BoxStyle, DeclaredValueStore, Display, Importance, SingleValue,
//! };
//!
//! let mut store = DeclaredValueStore::new();
//!
//! // `display: block; display: inline;`, fed in reverse source order.
//! let rule = store.open_block()?;
//! store.add_value(
//!     Importance::Normal,
//!     &BoxStyle {
//!         display: SingleValue::Declared(Display::Inline),
//!         ..Default::default()
//!     }
//!     .into_value(),
//! );
//! store.add_value(
//!     Importance::Normal,
//!     &BoxStyle {
//!         display: SingleValue::Declared(Display::Block),
//!         ..Default::default()
//!     }
//!     .into_value(),
//! );
//! store.close_block();
//!
//! // The later declaration (fed first) wins.
//! let mut style = BoxStyle::default();
//! store.apply(rule, Importance::Normal, &mut style);
//! assert_eq!(style.display, SingleValue::Declared(Display::Inline));
//! # Ok::<(), canopy_style::StyleError>(())
//! ```

#![no_std]

extern crate alloc;

mod aggregates;
mod cascaded;
mod declared;
mod error;
mod store;
pub mod values;

pub use aggregates::{
    Aggregate, AggregateSet, AggregateTag, AggregateValue, Arity, BackgroundClip,
    BackgroundColor, BorderColors, BoxStyle, ContentHeight, ContentWidth, HorizontalEdges,
    Insets, StackOrder, TextColor, VerticalEdges,
};
pub use cascaded::CascadedValues;
pub use declared::{CssWideKeyword, MAX_LIST_LEN, MultiValue, SingleValue};
pub use error::StyleError;
pub use store::{BlockId, DeclaredValueStore, Importance};
pub use values::{
    ClipBox, Color, Display, Float, LengthPercentage, LengthPercentageAuto, MaxSizeValue,
    Position, SizeValue, ZIndex,
};
