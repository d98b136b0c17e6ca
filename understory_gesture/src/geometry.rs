// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry and units: pixel → device-independent conversion, distances, axis directions.
//!
//! Native toolkits report touches in physical pixels. Everything handed to
//! applications is in device-independent units so thresholds behave the same on
//! every screen density.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::geometry::{distance, to_device_independent};
//!
//! let p = to_device_independent(Point::new(30.0, 60.0), 2.0);
//! assert_eq!(p, Point::new(15.0, 30.0));
//! assert_eq!(distance(Point::ZERO, Point::new(3.0, 4.0)), 5.0);
//! ```

use kurbo::Point;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::types::Directionality;

/// Minimum per-axis travel, in device-independent units, for that axis to
/// contribute a direction.
pub const DIRECTION_DEAD_ZONE: f64 = 3.0;

/// Convert a pixel position to device-independent units.
///
/// `density` is the number of pixels per device-independent unit. Non-positive
/// or non-finite densities are treated as `1.0`.
pub fn to_device_independent(pixel: Point, density: f64) -> Point {
    let density = sanitize_density(density);
    Point::new(pixel.x / density, pixel.y / density)
}

/// Convert a device-independent length to pixels.
pub fn to_pixels(units: f64, density: f64) -> f64 {
    units * sanitize_density(density)
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Direction contributed by the horizontal axis when moving from `start` to `end`.
pub fn horizontal_direction(start: Point, end: Point, dead_zone: f64) -> Directionality {
    axis_direction(
        end.x - start.x,
        dead_zone,
        Directionality::LEFT,
        Directionality::RIGHT,
    )
}

/// Direction contributed by the vertical axis when moving from `start` to `end`.
///
/// Screen coordinates grow downwards.
pub fn vertical_direction(start: Point, end: Point, dead_zone: f64) -> Directionality {
    axis_direction(
        end.y - start.y,
        dead_zone,
        Directionality::UP,
        Directionality::DOWN,
    )
}

/// Classify a signed travel along one axis.
///
/// Travel whose magnitude is below `dead_zone` contributes no direction.
pub fn axis_direction(
    delta: f64,
    dead_zone: f64,
    negative: Directionality,
    positive: Directionality,
) -> Directionality {
    if delta.is_nan() || delta.abs() < dead_zone {
        Directionality::empty()
    } else if delta < 0.0 {
        negative
    } else {
        positive
    }
}

pub(crate) fn sanitize_density(density: f64) -> f64 {
    if density.is_finite() && density > 0.0 {
        density
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_scales_inversely_with_density() {
        let px = Point::new(90.0, 45.0);
        assert_eq!(to_device_independent(px, 1.0), px);
        assert_eq!(to_device_independent(px, 3.0), Point::new(30.0, 15.0));
        let low = to_device_independent(px, 1.5);
        let high = to_device_independent(px, 3.0);
        assert!(high.x < low.x && high.y < low.y);
    }

    #[test]
    fn conversion_is_monotonic() {
        let mut last = f64::NEG_INFINITY;
        for i in -20..20 {
            let p = to_device_independent(Point::new(f64::from(i) * 7.5, 0.0), 2.625);
            assert!(p.x > last, "conversion must preserve ordering");
            last = p.x;
        }
    }

    #[test]
    fn invalid_density_falls_back_to_identity() {
        let px = Point::new(10.0, 20.0);
        assert_eq!(to_device_independent(px, 0.0), px);
        assert_eq!(to_device_independent(px, -2.0), px);
        assert_eq!(to_device_independent(px, f64::NAN), px);
        assert_eq!(to_pixels(8.0, 0.0), 8.0);
        assert_eq!(to_pixels(8.0, 2.0), 16.0);
    }

    #[test]
    fn dead_zone_suppresses_small_travel() {
        let o = Point::ZERO;
        assert_eq!(
            horizontal_direction(o, Point::new(2.9, 0.0), DIRECTION_DEAD_ZONE),
            Directionality::empty()
        );
        assert_eq!(
            horizontal_direction(o, Point::new(3.0, 0.0), DIRECTION_DEAD_ZONE),
            Directionality::RIGHT
        );
        assert_eq!(
            horizontal_direction(o, Point::new(-3.0, 0.0), DIRECTION_DEAD_ZONE),
            Directionality::LEFT
        );
        assert_eq!(
            vertical_direction(o, Point::new(0.0, 10.0), DIRECTION_DEAD_ZONE),
            Directionality::DOWN
        );
        assert_eq!(
            vertical_direction(o, Point::new(0.0, -10.0), DIRECTION_DEAD_ZONE),
            Directionality::UP
        );
    }
}
