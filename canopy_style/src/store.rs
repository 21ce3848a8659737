// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The declared-value store: one partial cascade per declaration block.
//!
//! Parsers feed each rule's declarations into an *open* block, in reverse
//! source order, once per importance. Because every field keeps its first
//! writer, the stored state is already partially cascaded when the block is
//! closed; there is no separate overwrite pass. Blocks are immutable once
//! closed and identified by strictly increasing [`BlockId`]s, whose ordering
//! doubles as the cascade tie-break for callers.

use hashbrown::HashMap;

use crate::aggregates::{Aggregate, AggregateTag, AggregateValue};
use crate::cascaded::CascadedValues;
use crate::declared::CssWideKeyword;
use crate::error::StyleError;

/// Identifier of a declaration block.
///
/// Ids are handed out in strictly increasing order, so comparing two ids
/// compares the blocks' positions in the cascade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u32);

/// Declaration importance: values from `!important` declarations cascade
/// separately from normal ones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Importance {
    /// A normal declaration.
    Normal,
    /// An `!important` declaration.
    Important,
}

impl Importance {
    #[inline]
    fn index(self) -> usize {
        match self {
            Self::Normal => 0,
            Self::Important => 1,
        }
    }
}

#[derive(Debug, Default)]
struct Block {
    /// One partial cascade per importance, indexed by [`Importance::index`].
    values: [CascadedValues; 2],
}

/// Append-only storage for the declared values of every rule in a document.
///
/// # Example
///
/// ```rust
/// use canopy_style::{
///     Aggregate, BoxStyle, DeclaredValueStore, Display, Importance, SingleValue,
/// };
///
/// let mut store = DeclaredValueStore::new();
/// let block = store.open_block()?;
/// // Declarations arrive in reverse source order.
/// store.add_value(
///     Importance::Normal,
///     &BoxStyle {
///         display: SingleValue::Declared(Display::Inline),
///         ..Default::default()
///     }
///     .into_value(),
/// );
/// store.close_block();
///
/// let mut style = BoxStyle::default();
/// store.apply(block, Importance::Normal, &mut style);
/// assert_eq!(style.display, SingleValue::Declared(Display::Inline));
/// # Ok::<(), canopy_style::StyleError>(())
/// ```
#[derive(Debug, Default)]
pub struct DeclaredValueStore {
    blocks: HashMap<BlockId, Block>,
    open: Option<BlockId>,
    next_id: u32,
}

impl DeclaredValueStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of blocks ever opened.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Open a fresh declaration block and make it current.
    ///
    /// At most one block may be open at a time; the previous block must have
    /// been closed with [`Self::close_block`].
    pub fn open_block(&mut self) -> Result<BlockId, StyleError> {
        debug_assert!(self.open.is_none(), "a declaration block is already open");
        if self.next_id == u32::MAX {
            return Err(StyleError::OutOfBlockIds);
        }
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(id, Block::default());
        self.open = Some(id);
        Ok(id)
    }

    /// Mark the open block immutable.
    pub fn close_block(&mut self) {
        debug_assert!(self.open.is_some(), "no declaration block is open");
        self.open = None;
    }

    /// Add one aggregate worth of declarations to the open block.
    ///
    /// Fields already set for this importance keep their value (the feed is
    /// reverse source order, so the first writer is the cascade winner), and
    /// nothing is written once `all` has been recorded for this importance.
    pub fn add_value(&mut self, importance: Importance, value: &AggregateValue) {
        let Some(block) = self.open_block_mut() else {
            return;
        };
        block.values[importance.index()].set_aggregate(value);
    }

    /// Add several aggregates worth of declarations to the open block.
    pub fn add_values<'a, I>(&mut self, importance: Importance, values: I)
    where
        I: IntoIterator<Item = &'a AggregateValue>,
    {
        for value in values {
            self.add_value(importance, value);
        }
    }

    /// Record the `all` shorthand for the open block. The first call per
    /// importance wins; every subsequent field write for that importance is
    /// a no-op.
    pub fn add_all(&mut self, importance: Importance, keyword: CssWideKeyword) {
        let Some(block) = self.open_block_mut() else {
            return;
        };
        block.values[importance.index()].set_all(keyword);
    }

    /// Whether the block recorded anything (fields or `all`) for this
    /// importance. Unknown blocks report `false`.
    #[must_use]
    pub fn has_values(&self, block: BlockId, importance: Importance) -> bool {
        self.blocks
            .get(&block)
            .is_some_and(|b| !b.values[importance.index()].is_empty())
    }

    /// The `all` keyword recorded for this block and importance, if any.
    #[must_use]
    pub fn all(&self, block: BlockId, importance: Importance) -> Option<CssWideKeyword> {
        self.blocks
            .get(&block)
            .and_then(|b| b.values[importance.index()].all())
    }

    /// Merge the stored partial cascade for one aggregate into `dest`.
    ///
    /// Only fields still undeclared in `dest` are written. Fields the block
    /// did not declare read as the block's `all` keyword when one was
    /// recorded, else as undeclared. Unknown blocks contribute nothing.
    pub fn apply<A: Aggregate>(&self, block: BlockId, importance: Importance, dest: &mut A) {
        let Some(values) = self.block_values(block, importance) else {
            return;
        };
        let mut source = values.get_as::<A>().cloned().unwrap_or_default();
        if let Some(keyword) = values.all() {
            source.fill(keyword);
        }
        dest.merge(&source);
    }

    /// Untyped variant of [`Self::apply`]; `dest` must carry the aggregate
    /// named by `tag`.
    pub fn apply_value(
        &self,
        tag: AggregateTag,
        block: BlockId,
        importance: Importance,
        dest: &mut AggregateValue,
    ) {
        debug_assert_eq!(dest.tag(), tag, "destination aggregate tag mismatch");
        let Some(values) = self.block_values(block, importance) else {
            return;
        };
        let mut source = values
            .get(tag)
            .cloned()
            .unwrap_or_else(|| AggregateValue::new_default(tag));
        if let Some(keyword) = values.all() {
            source.fill(keyword);
        }
        dest.merge(&source);
    }

    /// Merge everything one block declared for an importance into a
    /// per-element cascade.
    ///
    /// This is one round of style resolution: call it once per matching
    /// `(block, importance)`, iterating the matches in reverse cascade
    /// order (origin, then importance, then specificity, then source
    /// order). A block's field declarations are offered before its own
    /// `all` keyword, so they win within the block while both suppress
    /// contributions from every later round.
    pub fn collapse_block(
        &self,
        block: BlockId,
        importance: Importance,
        dest: &mut CascadedValues,
    ) {
        let Some(values) = self.block_values(block, importance) else {
            return;
        };
        for (_, value) in values.iter() {
            dest.set_aggregate(value);
        }
        if let Some(keyword) = values.all() {
            dest.set_all(keyword);
        }
    }

    fn block_values(&self, block: BlockId, importance: Importance) -> Option<&CascadedValues> {
        self.blocks
            .get(&block)
            .map(|b| &b.values[importance.index()])
    }

    fn open_block_mut(&mut self) -> Option<&mut Block> {
        let id = self.open;
        debug_assert!(id.is_some(), "no declaration block is open");
        self.blocks.get_mut(&id?)
    }
}
