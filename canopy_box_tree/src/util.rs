// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between layout units and kurbo's f64 CSS-pixel space.
//!
//! Painters and embedders generally speak kurbo; the engine speaks integer
//! sub-pixel units. Unit→pixel conversion is exact (the unit is a power-of-
//! two fraction of a pixel); pixel→unit conversion rounds to the nearest
//! unit.

use canopy_quadtree::{Rect, UNITS_PER_PIXEL, Unit, Vector};

/// A unit value as f64 CSS pixels.
#[inline]
#[must_use]
pub fn unit_to_px(value: Unit) -> f64 {
    f64::from(value) / f64::from(UNITS_PER_PIXEL)
}

/// An f64 CSS-pixel value rounded to the nearest unit.
#[inline]
#[must_use]
pub fn px_to_unit(value: f64) -> Unit {
    round_f64(value * f64::from(UNITS_PER_PIXEL))
}

/// A unit-space rectangle as a kurbo pixel-space rectangle.
#[must_use]
pub fn rect_to_kurbo(rect: Rect) -> kurbo::Rect {
    kurbo::Rect::new(
        unit_to_px(rect.x),
        unit_to_px(rect.y),
        unit_to_px(rect.right()),
        unit_to_px(rect.bottom()),
    )
}

/// A unit-space position as a kurbo pixel-space point.
#[must_use]
pub fn point_to_kurbo(position: Vector) -> kurbo::Point {
    kurbo::Point::new(unit_to_px(position.x), unit_to_px(position.y))
}

/// A kurbo pixel-space rectangle as a unit-space rectangle, edges rounded to
/// the nearest unit.
#[must_use]
pub fn rect_from_kurbo(rect: kurbo::Rect) -> Rect {
    let x0 = px_to_unit(rect.x0);
    let y0 = px_to_unit(rect.y0);
    Rect::new(x0, y0, px_to_unit(rect.x1) - x0, px_to_unit(rect.y1) - y0)
}

/// Round-to-nearest without `std`: truncate, correct toward -inf, then shift
/// by half. Ties round up, matching `f64::round` for the half-up cases that
/// occur at unit boundaries.
fn round_f64(value: f64) -> Unit {
    let shifted = value + 0.5;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pixel-space geometry fed to the engine fits the unit coordinate range."
    )]
    let truncated = shifted as i64;
    let floor = if (truncated as f64) > shifted {
        truncated - 1
    } else {
        truncated
    };
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Pixel-space geometry fed to the engine fits the unit coordinate range."
    )]
    {
        floor as Unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_px_round_trip_is_exact() {
        for value in [-129, -1, 0, 1, 63, 64, 1000] {
            assert_eq!(px_to_unit(unit_to_px(value)), value);
        }
    }

    #[test]
    fn whole_pixels_map_to_unit_multiples() {
        assert_eq!(px_to_unit(1.0), UNITS_PER_PIXEL);
        assert_eq!(px_to_unit(-2.0), -2 * UNITS_PER_PIXEL);
        assert_eq!(unit_to_px(UNITS_PER_PIXEL / 2), 0.5);
    }

    #[test]
    fn fractional_pixels_round_to_nearest_unit() {
        // 0.01 px = 0.64 units, rounds to 1.
        assert_eq!(px_to_unit(0.01), 1);
        // -0.01 px = -0.64 units, rounds to -1.
        assert_eq!(px_to_unit(-0.01), -1);
    }

    #[test]
    fn rect_round_trip() {
        let rect = Rect::new(0, -64, 640, 128);
        let k = rect_to_kurbo(rect);
        assert_eq!(k, kurbo::Rect::new(0.0, -1.0, 10.0, 1.0));
        assert_eq!(rect_from_kurbo(k), rect);
    }
}
