// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Quadtree: a fixed-grid spatial index over integer layout units.
//!
//! This crate provides the geometry vocabulary of the formatting engine
//! (sub-pixel [`Unit`]s, [`Vector`]/[`Size`]/[`Rect`], exact [`Ratio`]s) and
//! a [`QuadTree`] that answers "which objects may intersect this rectangle?"
//! with work bounded by the nodes the query touches, independent of document
//! size.
//!
//! The index has two tiers:
//!
//! - a fixed grid of square *patches*, allocated only when occupied, so
//!   sparse, very large coordinate spaces stay cheap; and
//! - within each patch, up to [`MAX_DEPTH`] levels of quadrant subdivision;
//!   an object is stored at the deepest node whose quadrants it does not
//!   straddle.
//!
//! Objects spanning several patches live in a separate large-object list
//! scanned linearly per query.
//!
//! # Example
//!
//! ```rust
//! use canopy_quadtree::{QuadTree, Rect, px};
//!
//! let mut tree: QuadTree<u32> = QuadTree::new();
//! tree.insert(Rect::new(0, 0, px(20), px(10)), 1);
//! tree.insert(Rect::new(px(5000), 0, px(20), px(10)), 2);
//!
//! // Candidates for a viewport; callers filter if they need exactness.
//! let visible = tree.find_in_rect(Rect::new(0, 0, px(1280), px(720)));
//! assert_eq!(visible, vec![1]);
//! ```

#![no_std]

extern crate alloc;

mod quadtree;
mod types;
mod units;

pub use quadtree::{DEFAULT_PATCH_SIZE, MAX_DEPTH, QuadTree};
pub use types::{Rect, Size, Vector};
pub use units::{Ratio, UNITS_PER_PIXEL, Unit, px};
