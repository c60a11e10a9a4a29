// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floatcanvas_surface::{Brush, Surface};
use floatcanvas_view::BBox;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;

use crate::object::SizePolicy;
use crate::paint::{Look, PaintCtx};

/// Wedge colours used when a pie chart is given none, cycled.
const DEFAULT_FILLS: [(u8, u8, u8); 6] = [
    (228, 26, 28),
    (55, 126, 184),
    (77, 175, 74),
    (152, 78, 163),
    (255, 127, 0),
    (255, 255, 51),
];

/// Applies the degenerate-size policy to a pixel extent. `None` means the
/// shape is too small to draw.
pub(super) fn clamp_extent(wh: Vec2, policy: &SizePolicy) -> Option<Vec2> {
    let min = policy.min_pixels;
    let fix = |v: f64| if v.abs() < min { min } else { v };
    let wh = Vec2::new(fix(wh.x), fix(wh.y));
    if policy.disappear_when_small && wh.x.abs().min(wh.y.abs()) <= min {
        None
    } else {
        Some(wh)
    }
}

/// Pixel rectangle of a world corner-and-extent shape.
pub(super) fn pixel_rect(
    ctx: &PaintCtx<'_>,
    xy: Point,
    wh: Vec2,
    policy: &SizePolicy,
) -> Option<Rect> {
    let origin = ctx.px(xy);
    let wh = clamp_extent(ctx.len_px(wh), policy)?;
    Some(Rect::from_points(origin, origin + wh))
}

pub(super) fn paint_circle<S: Surface>(
    surface: &mut S,
    ctx: &PaintCtx<'_>,
    look: &Look,
    xy: Point,
    diameter: f64,
    policy: &SizePolicy,
) {
    let half = Vec2::new(diameter / 2.0, diameter / 2.0);
    if let Some(wh) = clamp_extent(ctx.len_px(half), policy) {
        surface.draw_circle(ctx.px(xy), wh.x.abs(), &look.pen, &look.brush);
    }
}

/// A pie chart: one wedge per value, sized by its share of the total.
#[derive(Clone, Debug, PartialEq)]
pub struct PieChart {
    /// Centre.
    pub xy: Point,
    /// Diameter, in world units when `scaled`, else in pixels.
    pub diameter: f64,
    /// Wedge values.
    pub values: Vec<f64>,
    /// Wedge brushes, cycled when shorter than `values`.
    pub fills: Vec<Brush>,
    /// Whether the chart scales with zoom.
    pub scaled: bool,
}

impl PieChart {
    /// A scaled chart with the default wedge colours.
    pub fn new(xy: Point, diameter: f64, values: Vec<f64>) -> Self {
        Self {
            xy,
            diameter,
            values,
            fills: DEFAULT_FILLS
                .iter()
                .map(|&(r, g, b)| Brush::solid(Color::from_rgb8(r, g, b)))
                .collect(),
            scaled: true,
        }
    }

    /// Sets the wedge brushes.
    #[must_use]
    pub fn with_fills(mut self, fills: Vec<Brush>) -> Self {
        self.fills = fills;
        self
    }

    /// Keeps the chart a fixed pixel size.
    #[must_use]
    pub fn unscaled(mut self) -> Self {
        self.scaled = false;
        self
    }

    /// Cumulative wedge boundaries in degrees, starting at zero and ending at
    /// 360. Empty when the values do not sum to a positive total.
    pub fn angles(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().sum();
        if !(total > 0.0 && total.is_finite()) {
            return Vec::new();
        }
        let mut acc = 0.0;
        core::iter::once(0.0)
            .chain(self.values.iter().map(|v| {
                acc += v;
                360.0 * acc / total
            }))
            .collect()
    }

    pub(super) fn bounding_box(&self) -> BBox {
        if self.scaled {
            let d = Vec2::new(self.diameter, self.diameter);
            BBox::new(self.xy - d, self.xy + d)
        } else {
            BBox::new(self.xy, self.xy)
        }
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        let center = ctx.px(self.xy);
        let diameter = if self.scaled {
            ctx.len_px(Vec2::new(self.diameter, self.diameter)).x
        } else {
            self.diameter
        };
        if look.hit {
            surface.draw_circle(center, (diameter / 2.0).trunc(), &look.pen, &look.brush);
            return;
        }
        if self.fills.is_empty() {
            return;
        }
        let corner = Point::new(
            (center.x - diameter / 2.0).trunc(),
            (center.y - diameter / 2.0).trunc(),
        );
        let rect = Rect::from_origin_size(corner, (diameter.trunc(), diameter.trunc()));
        let angles = self.angles();
        for (i, span) in angles.windows(2).enumerate() {
            let brush = &self.fills[i % self.fills.len()];
            surface.draw_elliptic_arc(rect, span[0], span[1], &look.pen, brush);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_are_cumulative_shares() {
        let pie = PieChart::new(Point::ORIGIN, 10.0, vec![1.0, 1.0, 2.0]);
        assert_eq!(pie.angles(), vec![0.0, 90.0, 180.0, 360.0]);
        assert!(PieChart::new(Point::ORIGIN, 1.0, vec![0.0]).angles().is_empty());
        assert!(PieChart::new(Point::ORIGIN, 1.0, vec![]).angles().is_empty());
    }

    #[test]
    fn small_extents_clamp_or_vanish() {
        let keep = SizePolicy {
            min_pixels: 1.0,
            disappear_when_small: false,
        };
        assert_eq!(
            clamp_extent(Vec2::new(0.2, -5.0), &keep),
            Some(Vec2::new(1.0, -5.0))
        );
        let vanish = SizePolicy::default();
        assert_eq!(clamp_extent(Vec2::new(0.2, -5.0), &vanish), None);
        assert_eq!(clamp_extent(Vec2::new(1.0, 9.0), &vanish), None);
        assert!(clamp_extent(Vec2::new(2.0, -2.0), &vanish).is_some());
    }

    #[test]
    fn unscaled_chart_box_is_its_centre() {
        let pie = PieChart::new(Point::new(3.0, 4.0), 50.0, vec![1.0]).unscaled();
        let bb = pie.bounding_box();
        assert_eq!(bb.width(), 0.0);
        assert_eq!(bb.center(), Some(Point::new(3.0, 4.0)));
        let scaled = PieChart::new(Point::ORIGIN, 2.0, vec![1.0]).bounding_box();
        assert_eq!(scaled.width(), 4.0);
    }
}
