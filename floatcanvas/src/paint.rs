// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What a shape needs to paint itself: the view, and the resolved pen and
//! brush of the current pass.

use floatcanvas_surface::{Brush, Pen, Rgb};
use floatcanvas_view::ViewTransform;
use kurbo::{Point, Vec2};

/// The two passes every object is painted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pass {
    /// Into a visual buffer with the object's own styles.
    Visual,
    /// Into a hit-test buffer, in the object's hit colour.
    Hit(Rgb),
}

/// Pen and brush resolved for one pass.
#[derive(Clone, Debug)]
pub(crate) struct Look {
    pub(crate) pen: Pen,
    pub(crate) brush: Brush,
    /// Set for the hit pass. Text and images then paint their extent
    /// rectangle instead of their content.
    pub(crate) hit: bool,
}

/// World-to-pixel conversions used while painting.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PaintCtx<'a> {
    pub(crate) view: &'a ViewTransform,
    pub(crate) min_hit_line_width: f64,
}

impl PaintCtx<'_> {
    /// World point to the nearest pixel, as a surface coordinate.
    pub(crate) fn px(&self, pt: Point) -> Point {
        self.view.world_to_pixel(pt).to_point()
    }

    pub(crate) fn px_all(&self, pts: &[Point]) -> Vec<Point> {
        self.view
            .world_to_pixel_batch(pts)
            .into_iter()
            .map(|p| p.to_point())
            .collect()
    }

    /// World length vector to pixels, Y flipped.
    pub(crate) fn len_px(&self, len: Vec2) -> Vec2 {
        self.view.scale_world_to_pixel(len)
    }
}
