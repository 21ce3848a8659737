// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-element collapsed declarations.
//!
//! [`CascadedValues`] is the short-lived product of style resolution for one
//! element: callers iterate the element's matching declarations in reverse
//! source-and-specificity-and-origin order and push them in; each field keeps
//! the first writer. Storage is a sorted vector with binary-search lookup,
//! so cost is proportional to the aggregates actually touched.

use smallvec::SmallVec;

use crate::aggregates::{Aggregate, AggregateSet, AggregateTag, AggregateValue};
use crate::declared::CssWideKeyword;

/// Inline capacity for touched aggregates.
///
/// Most elements declare values in only a handful of aggregates, so this
/// avoids heap allocation in the common case.
const INLINE_CAPACITY: usize = 4;

/// The collapsed declarations of one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CascadedValues {
    /// The `all` shorthand, once seen. Suppresses every later write.
    all: Option<CssWideKeyword>,
    /// Touched aggregates, sorted by [`AggregateTag`] for binary search.
    entries: SmallVec<[(AggregateTag, AggregateValue); INLINE_CAPACITY]>,
    /// Bit per tag present in `entries`.
    tags: AggregateSet,
}

impl CascadedValues {
    /// Create an empty cascade.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn find(&self, tag: AggregateTag) -> Result<usize, usize> {
        self.entries.binary_search_by_key(&tag, |(t, _)| *t)
    }

    /// Merge one declaration's aggregate into the cascade.
    ///
    /// Fields already written keep their value; once [`Self::set_all`] has
    /// been called this is a no-op.
    pub fn set_aggregate(&mut self, value: &AggregateValue) {
        if self.all.is_some() {
            return;
        }
        match self.find(value.tag()) {
            Ok(i) => self.entries[i].1.merge(value),
            Err(i) => {
                self.entries.insert(i, (value.tag(), value.clone()));
                self.tags |= value.tag().bit();
            }
        }
    }

    /// Record the `all` shorthand. The first call wins; later calls (and all
    /// later [`Self::set_aggregate`] calls) do nothing.
    pub fn set_all(&mut self, keyword: CssWideKeyword) {
        if self.all.is_none() {
            self.all = Some(keyword);
        }
    }

    /// The recorded `all` keyword, if any.
    #[inline]
    #[must_use]
    pub fn all(&self) -> Option<CssWideKeyword> {
        self.all
    }

    /// The aggregate stored for `tag`, if the element touched it.
    #[must_use]
    pub fn get(&self, tag: AggregateTag) -> Option<&AggregateValue> {
        if !self.tags.contains(tag.bit()) {
            return None;
        }
        self.find(tag).ok().map(|i| &self.entries[i].1)
    }

    /// Typed variant of [`Self::get`].
    #[must_use]
    pub fn get_as<A: Aggregate>(&self) -> Option<&A> {
        self.get(A::TAG).and_then(AggregateValue::get)
    }

    /// The set of aggregates the element touched.
    #[inline]
    #[must_use]
    pub fn tags(&self) -> AggregateSet {
        self.tags
    }

    /// Iterate the touched aggregates in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (AggregateTag, &AggregateValue)> {
        self.entries.iter().map(|(tag, value)| (*tag, value))
    }

    /// Whether nothing has been declared, not even `all`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.all.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregates::{BoxStyle, StackOrder};
    use crate::declared::SingleValue;
    use crate::values::{Display, Position, ZIndex};

    fn display(display: Display) -> AggregateValue {
        BoxStyle {
            display: SingleValue::Declared(display),
            ..Default::default()
        }
        .into_value()
    }

    #[test]
    fn first_writer_wins_across_set_calls() {
        let mut cascaded = CascadedValues::new();
        // Reverse source order: the last declaration arrives first.
        cascaded.set_aggregate(&display(Display::Inline));
        cascaded.set_aggregate(&display(Display::Block));
        cascaded.set_aggregate(&BoxStyle {
            position: SingleValue::Declared(Position::Relative),
            ..Default::default()
        }
        .into_value());

        let style = cascaded.get_as::<BoxStyle>().unwrap();
        assert_eq!(style.display, SingleValue::Declared(Display::Inline));
        assert_eq!(style.position, SingleValue::Declared(Position::Relative));
        assert!(style.float.is_undeclared());
    }

    #[test]
    fn all_suppresses_later_writes() {
        // Feed order is reverse source order, so `all` arriving first means
        // it was the later declaration and wins the whole cascade.
        let mut cascaded = CascadedValues::new();
        cascaded.set_all(CssWideKeyword::Unset);
        cascaded.set_aggregate(&display(Display::Block));

        assert_eq!(cascaded.all(), Some(CssWideKeyword::Unset));
        assert!(cascaded.get(AggregateTag::BoxStyle).is_none());
    }

    #[test]
    fn all_is_first_writer_wins_too() {
        let mut cascaded = CascadedValues::new();
        cascaded.set_all(CssWideKeyword::Inherit);
        cascaded.set_all(CssWideKeyword::Initial);
        assert_eq!(cascaded.all(), Some(CssWideKeyword::Inherit));
    }

    #[test]
    fn writes_before_all_survive() {
        // Source order `all: unset; display: block` arrives as the aggregate
        // first, then `all`: the earlier-in-source `all` must not clobber it.
        let mut cascaded = CascadedValues::new();
        cascaded.set_aggregate(&display(Display::Block));
        cascaded.set_all(CssWideKeyword::Unset);

        let style = cascaded.get_as::<BoxStyle>().unwrap();
        assert_eq!(style.display, SingleValue::Declared(Display::Block));
        assert_eq!(cascaded.all(), Some(CssWideKeyword::Unset));
    }

    #[test]
    fn set_aggregate_is_idempotent() {
        let mut cascaded = CascadedValues::new();
        let value = display(Display::None);
        cascaded.set_aggregate(&value);
        let once = cascaded.clone();
        cascaded.set_aggregate(&value);
        assert_eq!(cascaded, once);
    }

    #[test]
    fn empty_aggregates_do_not_disturb_state() {
        let mut cascaded = CascadedValues::new();
        cascaded.set_aggregate(&display(Display::Inline));
        let before = cascaded.clone();
        cascaded.set_aggregate(&AggregateValue::new_default(AggregateTag::BoxStyle));
        assert_eq!(cascaded, before);
    }

    #[test]
    fn entries_stay_sorted() {
        let mut cascaded = CascadedValues::new();
        cascaded.set_aggregate(&StackOrder {
            z_index: SingleValue::Declared(ZIndex::Integer(1)),
        }
        .into_value());
        cascaded.set_aggregate(&display(Display::Block));

        assert!(cascaded.tags().contains(AggregateTag::BoxStyle.bit()));
        assert!(cascaded.tags().contains(AggregateTag::StackOrder.bit()));
        assert!(cascaded.get(AggregateTag::BoxStyle).is_some());
        assert!(cascaded.get(AggregateTag::StackOrder).is_some());
        assert!(cascaded.get(AggregateTag::Insets).is_none());
    }
}
