// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Draw List: stacking-context paint order with spatial indexing.
//!
//! Given a laid-out box tree and its stacking-context tree, [`DrawList::build`]
//! linearizes every paintable unit (block boxes and inline-context line
//! boxes) into the CSS paint order and simultaneously inserts each one into
//! a quadtree keyed by its absolute bounding box.
//!
//! The list mirrors the stacking-context tree: one *sub-list* per context,
//! holding that context's drawables plus links to its child sub-lists, split
//! at a midpoint into the children painting before the context's content
//! (negative `z-index`) and after (the rest). A final pass flattens this
//! structure into a total [`DrawIndex`] per drawable, so a painter can cull
//! against a viewport with [`DrawList::find_in_rect`], sort the survivors by
//! [`DrawList::draw_index`], and paint.
//!
//! Construction is single-pass over the box tree. A sub-list is allocated as
//! soon as its parent discovers the child context (so the parent can link it
//! in order) and populated later, once the box walk reaches the block that
//! positions it, via a two-queue (parked/ready) scheme in the builder.

#![no_std]

extern crate alloc;

mod build;
mod list;

pub use list::{BuildError, DrawIndex, DrawList, Drawable, EntryRef, PaintOrder, SubList};
