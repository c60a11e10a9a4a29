// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floatcanvas_surface::Surface;
use kurbo::{Point, Rect, Vec2};

use crate::paint::{Look, PaintCtx};

/// Offsets that make a two pixel dot out of four one pixel dots.
const D2_OFFSETS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(1.0, 1.0),
];

/// Dots of one pixel diameter for all points.
///
/// Hit testing does not tell the dots apart; use
/// [`find_closest_point`](Self::find_closest_point) with the hit's world
/// coordinates to recover which one was clicked.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    /// Dot centres.
    pub points: Vec<Point>,
    /// Dot diameter in pixels.
    pub diameter: f64,
}

impl PointSet {
    /// Creates a point set.
    pub fn new(points: Vec<Point>, diameter: f64) -> Self {
        Self { points, diameter }
    }

    /// Index of the point nearest to `xy`. The first wins on ties; `None`
    /// for an empty set.
    pub fn find_closest_point(&self, xy: Point) -> Option<usize> {
        self.points
            .iter()
            .map(|p| (*p - xy).hypot())
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, bd)) if bd <= d => best,
                _ => Some((i, d)),
            })
            .map(|(i, _)| i)
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        let points = ctx.px_all(&self.points);
        if self.diameter <= 1.0 {
            surface.draw_points(&points, &look.pen);
        } else if self.diameter <= 2.0 {
            for offset in D2_OFFSETS {
                let shifted: Vec<Point> = points.iter().map(|p| *p + offset).collect();
                surface.draw_points(&shifted, &look.pen);
            }
        } else {
            let radius = (self.diameter / 2.0).round();
            for p in points {
                surface.draw_circle(p, radius, &look.pen, &look.brush);
            }
        }
    }
}

pub(super) fn paint_point<S: Surface>(
    surface: &mut S,
    ctx: &PaintCtx<'_>,
    look: &Look,
    xy: Point,
    diameter: f64,
) {
    let xy = ctx.px(xy);
    if diameter <= 1.0 {
        surface.draw_points(&[xy], &look.pen);
    } else {
        surface.draw_circle(xy, (diameter / 2.0).round(), &look.pen, &look.brush);
    }
}

pub(super) fn paint_square<S: Surface>(
    surface: &mut S,
    ctx: &PaintCtx<'_>,
    look: &Look,
    xy: Point,
    size: f64,
) {
    let c = ctx.px(xy);
    if size <= 1.0 {
        surface.draw_points(&[c], &look.pen);
    } else {
        let origin = Point::new((c.x - size / 2.0).floor(), (c.y - size / 2.0).floor());
        let rect = Rect::from_origin_size(origin, (size, size));
        surface.draw_rectangle(rect, &look.pen, &look.brush);
    }
}

#[cfg(test)]
mod tests {
    use floatcanvas_surface::{Brush, DrawCall, FixedMetrics, Pen, RecordingSurface};
    use floatcanvas_view::{PixelSize, ViewTransform};
    use peniko::Color;

    use super::*;

    fn look() -> Look {
        Look {
            pen: Pen::new(Color::BLACK, 1.0),
            brush: Brush::solid(Color::BLACK),
            hit: false,
        }
    }

    #[test]
    fn closest_point_prefers_first_on_ties() {
        let set = PointSet::new(
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(-10.0, 0.0),
            ],
            1.0,
        );
        assert_eq!(set.find_closest_point(Point::new(9.0, 1.0)), Some(1));
        assert_eq!(set.find_closest_point(Point::new(-1.0, 0.0)), Some(0));
        assert_eq!(set.find_closest_point(Point::new(5.0, 0.0)), Some(0));
        assert_eq!(PointSet::new(vec![], 1.0).find_closest_point(Point::ORIGIN), None);
    }

    #[test]
    fn dot_size_picks_the_primitive() {
        let view = ViewTransform::new(PixelSize::new(20, 20));
        let ctx = PaintCtx {
            view: &view,
            min_hit_line_width: 3.0,
        };
        let mut s = RecordingSurface::new(PixelSize::new(20, 20), FixedMetrics::default())
            .unwrap();

        PointSet::new(vec![Point::ORIGIN], 1.0).paint(&mut s, &ctx, &look());
        PointSet::new(vec![Point::ORIGIN], 2.0).paint(&mut s, &ctx, &look());
        PointSet::new(vec![Point::ORIGIN], 6.0).paint(&mut s, &ctx, &look());
        let calls = s.take_calls();
        assert_eq!(calls.len(), 1 + 4 + 1, "one, four, one calls: {calls:?}");
        assert!(matches!(&calls[1], DrawCall::Points { points, .. } if points[0] == Point::new(10.0, 10.0)));
        assert!(matches!(&calls[4], DrawCall::Points { points, .. } if points[0] == Point::new(11.0, 11.0)));
        assert!(matches!(calls[5], DrawCall::Circle { radius, .. } if radius == 3.0));
    }

    #[test]
    fn square_is_centred_on_the_pixel() {
        let view = ViewTransform::new(PixelSize::new(20, 20));
        let ctx = PaintCtx {
            view: &view,
            min_hit_line_width: 3.0,
        };
        let mut s = RecordingSurface::new(PixelSize::new(20, 20), FixedMetrics::default())
            .unwrap();
        paint_square(&mut s, &ctx, &look(), Point::ORIGIN, 4.0);
        assert!(matches!(
            s.calls()[0],
            DrawCall::Rectangle { rect, .. } if rect == Rect::new(8.0, 8.0, 12.0, 12.0)
        ));
    }
}
