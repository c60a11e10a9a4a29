// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `round`
use kurbo::{Point, Vec2};

/// An integer device position, Y‑down, as produced by the host window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelPoint {
    /// Horizontal pixel offset from the panel's left edge.
    pub x: i32,
    /// Vertical pixel offset from the panel's top edge.
    pub y: i32,
}

impl PixelPoint {
    /// The panel origin.
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Creates a pixel position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rounds a fractional device position to the nearest pixel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "device coordinates are far inside i32 range; `as` saturates otherwise"
    )]
    #[must_use]
    pub fn round_from(pt: Point) -> Self {
        Self {
            x: pt.x.round() as i32,
            y: pt.y.round() as i32,
        }
    }

    /// Returns this position as a fractional point.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Returns the offset from `other` to `self`.
    #[must_use]
    pub fn offset_from(self, other: Self) -> Vec2 {
        Vec2::new(
            f64::from(self.x) - f64::from(other.x),
            f64::from(self.y) - f64::from(other.y),
        )
    }

    /// Returns this position translated by `(dx, dy)` pixels.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl From<(i32, i32)> for PixelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Size of a panel or offscreen surface in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the size with each dimension raised to at least `min`.
    #[must_use]
    pub fn at_least(self, min: u32) -> Self {
        Self {
            width: self.width.max(min),
            height: self.height.max(min),
        }
    }

    /// Returns the size as a vector of fractional pixels.
    #[must_use]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }

    /// Returns `true` if `pt` lies inside `[0, width) x [0, height)`.
    #[must_use]
    pub fn contains(self, pt: PixelPoint) -> bool {
        pt.x >= 0
            && pt.y >= 0
            && i64::from(pt.x) < i64::from(self.width)
            && i64::from(pt.y) < i64::from(self.height)
    }
}
