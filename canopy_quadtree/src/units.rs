// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fixed sub-pixel layout unit and exact rational scaling.

/// Scalar type for all layout geometry.
///
/// A [`Unit`] is a signed integer count of sub-pixel units; one CSS pixel is
/// [`UNITS_PER_PIXEL`] units. Keeping geometry integral makes layout and
/// paint-order construction exactly reproducible.
pub type Unit = i32;

/// Number of layout units per CSS pixel.
///
/// A power of two, so pixel-aligned coordinates and halving (as done by the
/// quadtree subdivision) stay exact.
pub const UNITS_PER_PIXEL: Unit = 64;

/// Convert a whole number of CSS pixels to layout units.
#[inline]
#[must_use]
pub const fn px(pixels: i32) -> Unit {
    pixels * UNITS_PER_PIXEL
}

/// An exact rational, used where layout needs non-integer scale factors
/// (aspect ratios, percentage bases) without accumulating float drift.
///
/// The denominator is kept strictly positive; the sign lives in the
/// numerator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Ratio {
    /// Numerator (carries the sign).
    pub num: i32,
    /// Denominator (always positive).
    pub den: i32,
}

impl Ratio {
    /// The zero ratio.
    pub const ZERO: Self = Self { num: 0, den: 1 };

    /// The identity ratio.
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// Create a ratio, normalizing the sign into the numerator.
    #[must_use]
    pub fn new(num: i32, den: i32) -> Self {
        debug_assert!(den != 0, "ratio denominator must be non-zero");
        if den < 0 {
            Self { num: -num, den: -den }
        } else {
            Self { num, den }
        }
    }

    /// Scale a unit value by this ratio, rounding toward negative infinity.
    ///
    /// The intermediate product is widened to `i64`, so any `Unit` operand is
    /// scaled without overflow.
    #[inline]
    #[must_use]
    pub fn scale(self, value: Unit) -> Unit {
        let wide = i64::from(value) * i64::from(self.num);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Scaled layout geometry is bounded by the unit coordinate space."
        )]
        {
            wide.div_euclid(i64::from(self.den)) as Unit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_is_exact() {
        assert_eq!(px(0), 0);
        assert_eq!(px(1), UNITS_PER_PIXEL);
        assert_eq!(px(-3), -3 * UNITS_PER_PIXEL);
    }

    #[test]
    fn ratio_sign_normalization() {
        let r = Ratio::new(1, -2);
        assert_eq!(r, Ratio::new(-1, 2));
        assert!(r.den > 0);
    }

    #[test]
    fn ratio_scale_floors() {
        let half = Ratio::new(1, 2);
        assert_eq!(half.scale(5), 2);
        assert_eq!(half.scale(-5), -3, "floor division rounds toward -inf");
        assert_eq!(Ratio::ONE.scale(41), 41);
        assert_eq!(Ratio::ZERO.scale(1000), 0);
    }

    #[test]
    fn ratio_scale_widens() {
        // The intermediate product (1e12) overflows i32 but not the widened i64.
        let r = Ratio::new(1_000_000, 500_000);
        assert_eq!(r.scale(1_000_000), 2_000_000);
    }
}
