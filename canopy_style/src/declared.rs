// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-field declared-value sums and the CSS-wide keywords.
//!
//! Every longhand field of an aggregate is one of these sums: either nothing
//! was declared for it, or one of the CSS-wide keywords, or a concrete value.
//! Cascading is a *first-writer-wins* merge over fields, because callers feed
//! declarations in reverse source-and-specificity order.

use smallvec::SmallVec;

use crate::error::StyleError;

/// Maximum number of items in a multi-arity declared list.
pub const MAX_LIST_LEN: usize = 63;

/// The CSS-wide keywords: `initial`, `inherit`, and `unset`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CssWideKeyword {
    /// Reset to the property's initial value.
    Initial,
    /// Take the parent's computed value.
    Inherit,
    /// `inherit` for inherited properties, `initial` otherwise.
    Unset,
}

/// Declared state of a single-arity longhand field.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SingleValue<T> {
    /// No declaration reached this field yet.
    #[default]
    Undeclared,
    /// Declared as the `initial` keyword.
    Initial,
    /// Declared as the `inherit` keyword.
    Inherit,
    /// Declared as the `unset` keyword.
    Unset,
    /// Declared as a concrete value.
    Declared(T),
}

impl<T> SingleValue<T> {
    /// Whether no declaration has been recorded for this field.
    #[inline]
    #[must_use]
    pub fn is_undeclared(&self) -> bool {
        matches!(self, Self::Undeclared)
    }

    /// The concrete declared value, if any.
    #[inline]
    #[must_use]
    pub fn declared(&self) -> Option<&T> {
        match self {
            Self::Declared(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Clone> SingleValue<T> {
    /// First-writer-wins merge: adopt `other` only while still undeclared.
    #[inline]
    pub fn or_declare(&mut self, other: &Self) {
        if self.is_undeclared() && !other.is_undeclared() {
            *self = other.clone();
        }
    }

    /// Replace an undeclared field with a CSS-wide keyword.
    #[inline]
    pub fn fill(&mut self, keyword: CssWideKeyword) {
        if self.is_undeclared() {
            *self = keyword.into();
        }
    }
}

impl<T> From<CssWideKeyword> for SingleValue<T> {
    fn from(keyword: CssWideKeyword) -> Self {
        match keyword {
            CssWideKeyword::Initial => Self::Initial,
            CssWideKeyword::Inherit => Self::Inherit,
            CssWideKeyword::Unset => Self::Unset,
        }
    }
}

/// Declared state of a multi-arity (comma-separated list) longhand field.
///
/// Declared lists have between 1 and [`MAX_LIST_LEN`] items.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MultiValue<T> {
    /// No declaration reached this field yet.
    #[default]
    Undeclared,
    /// Declared as the `initial` keyword.
    Initial,
    /// Declared as the `inherit` keyword.
    Inherit,
    /// Declared as the `unset` keyword.
    Unset,
    /// Declared as a concrete list of values.
    Declared(SmallVec<[T; 2]>),
}

impl<T> MultiValue<T> {
    /// Build a declared list, rejecting lists longer than [`MAX_LIST_LEN`].
    pub fn declared<I: IntoIterator<Item = T>>(items: I) -> Result<Self, StyleError> {
        let list: SmallVec<[T; 2]> = items.into_iter().collect();
        debug_assert!(!list.is_empty(), "declared lists have at least one item");
        if list.len() > MAX_LIST_LEN {
            return Err(StyleError::TooManyListItems { len: list.len() });
        }
        Ok(Self::Declared(list))
    }

    /// Whether no declaration has been recorded for this field.
    #[inline]
    #[must_use]
    pub fn is_undeclared(&self) -> bool {
        matches!(self, Self::Undeclared)
    }

    /// The concrete declared list, if any.
    #[inline]
    #[must_use]
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Self::Declared(list) => Some(list),
            _ => None,
        }
    }
}

impl<T: Clone> MultiValue<T> {
    /// First-writer-wins merge: adopt `other` only while still undeclared.
    #[inline]
    pub fn or_declare(&mut self, other: &Self) {
        if self.is_undeclared() && !other.is_undeclared() {
            *self = other.clone();
        }
    }

    /// Replace an undeclared field with a CSS-wide keyword.
    #[inline]
    pub fn fill(&mut self, keyword: CssWideKeyword) {
        if self.is_undeclared() {
            *self = match keyword {
                CssWideKeyword::Initial => Self::Initial,
                CssWideKeyword::Inherit => Self::Inherit,
                CssWideKeyword::Unset => Self::Unset,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_writer_wins() {
        let mut field: SingleValue<u8> = SingleValue::Undeclared;
        field.or_declare(&SingleValue::Declared(3));
        field.or_declare(&SingleValue::Declared(9));
        field.or_declare(&SingleValue::Inherit);
        assert_eq!(field, SingleValue::Declared(3));
    }

    #[test]
    fn keywords_count_as_writes() {
        let mut field: SingleValue<u8> = SingleValue::Undeclared;
        field.or_declare(&SingleValue::Unset);
        field.or_declare(&SingleValue::Declared(1));
        assert_eq!(field, SingleValue::Unset);
    }

    #[test]
    fn undeclared_never_overwrites() {
        let mut field = SingleValue::Declared(5_u8);
        field.or_declare(&SingleValue::Undeclared);
        assert_eq!(field, SingleValue::Declared(5));

        let mut empty: SingleValue<u8> = SingleValue::Undeclared;
        empty.or_declare(&SingleValue::Undeclared);
        assert!(empty.is_undeclared());
    }

    #[test]
    fn fill_only_touches_undeclared() {
        let mut a: SingleValue<u8> = SingleValue::Undeclared;
        a.fill(CssWideKeyword::Unset);
        assert_eq!(a, SingleValue::Unset);

        let mut b = SingleValue::Declared(2_u8);
        b.fill(CssWideKeyword::Initial);
        assert_eq!(b, SingleValue::Declared(2));
    }

    #[test]
    fn multi_list_bounds() {
        let ok = MultiValue::declared(0..10_u8).unwrap();
        assert_eq!(ok.items().unwrap().len(), 10);

        let err = MultiValue::declared(0..64_u8).unwrap_err();
        assert_eq!(err, StyleError::TooManyListItems { len: 64 });

        let max = MultiValue::declared(0..63_u8).unwrap();
        assert_eq!(max.items().unwrap().len(), MAX_LIST_LEN);
    }

    #[test]
    fn multi_merge_mirrors_single() {
        let mut field: MultiValue<u8> = MultiValue::Undeclared;
        field.or_declare(&MultiValue::declared([1, 2]).unwrap());
        field.or_declare(&MultiValue::Initial);
        assert_eq!(field.items().unwrap(), &[1, 2]);
    }
}
