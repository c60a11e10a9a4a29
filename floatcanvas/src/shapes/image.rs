// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floatcanvas_surface::{Raster, Surface};
use floatcanvas_view::BBox;
use kurbo::{Point, Rect, Size, Vec2};

use crate::anchor::{Axis, TextAnchor};
use crate::object::SizePolicy;
use crate::paint::{Look, PaintCtx};

/// An image drawn at its native pixel size. Its bounding box is the anchor
/// point.
#[derive(Clone, Debug, PartialEq)]
pub struct Bitmap {
    /// Pixels.
    pub raster: Raster,
    /// Anchor point.
    pub xy: Point,
    /// Which point of the image sits on `xy`.
    pub anchor: TextAnchor,
}

impl Bitmap {
    /// An image anchored top-left.
    pub fn new(raster: Raster, xy: Point) -> Self {
        Self {
            raster,
            xy,
            anchor: TextAnchor::TopLeft,
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        let size = self.raster.size().to_vec2().to_size();
        let origin = self.anchor.shift(ctx.px(self.xy), size, 0.0, Axis::Down);
        if look.hit {
            let rect = Rect::from_origin_size(origin, size);
            surface.draw_rectangle(rect, &look.pen, &look.brush);
        } else {
            surface.draw_bitmap(&self.raster, origin);
        }
    }
}

/// An image whose height is in world units; the width follows the aspect
/// ratio.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledBitmap {
    /// Pixels.
    pub raster: Raster,
    /// Anchor point.
    pub xy: Point,
    /// Height in world units.
    pub height: f64,
    /// Which point of the image sits on `xy`.
    pub anchor: TextAnchor,
}

impl ScaledBitmap {
    /// An image anchored top-left.
    pub fn new(raster: Raster, xy: Point, height: f64) -> Self {
        Self {
            raster,
            xy,
            height,
            anchor: TextAnchor::TopLeft,
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    fn aspect(&self) -> f64 {
        f64::from(self.raster.width()) / f64::from(self.raster.height())
    }

    /// World size of the image.
    pub fn world_size(&self) -> Size {
        Size::new(self.height * self.aspect(), self.height)
    }

    pub(super) fn bounding_box(&self) -> BBox {
        let size = self.world_size();
        let top_left = self.anchor.shift(self.xy, size, 0.0, Axis::Up);
        BBox::new(
            Point::new(top_left.x, top_left.y - size.height),
            Point::new(top_left.x + size.width, top_left.y),
        )
    }

    pub(crate) fn paint<S: Surface>(
        &self,
        surface: &mut S,
        ctx: &PaintCtx<'_>,
        look: &Look,
        policy: &SizePolicy,
    ) {
        let h = ctx.len_px(Vec2::new(self.height, self.height)).x;
        let size = Size::new(h * self.aspect(), h);
        if size.width.min(size.height) < policy.min_pixels.max(1.0) {
            return;
        }
        let origin = self.anchor.shift(ctx.px(self.xy), size, 0.0, Axis::Down);
        let rect = Rect::from_origin_size(origin, size);
        if look.hit {
            surface.draw_rectangle(rect, &look.pen, &look.brush);
        } else {
            surface.draw_scaled_bitmap(&self.raster, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use peniko::Color;

    use super::*;

    #[test]
    fn scaled_bitmap_box_keeps_aspect() {
        let raster = Raster::filled(4, 2, Color::BLACK).unwrap();
        let bmp = ScaledBitmap::new(raster, Point::new(1.0, 1.0), 3.0).with_anchor(TextAnchor::Center);
        assert_eq!(bmp.world_size(), Size::new(6.0, 3.0));
        let bb = bmp.bounding_box();
        assert_eq!(bb.min(), Some(Point::new(-2.0, -0.5)));
        assert_eq!(bb.max(), Some(Point::new(4.0, 2.5)));
    }
}
