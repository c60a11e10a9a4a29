// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry of drawable objects.
//!
//! Every [`Shape`] knows its world bounding box, how to translate itself,
//! and how to paint itself. Painting is one routine per variant for both
//! passes: in the hit pass the resolved pen and brush carry the hit colour,
//! and text and images paint their extent rectangle instead of content.

mod areas;
mod image;
mod lines;
mod marks;
mod text;

use floatcanvas_surface::{Surface, TextMeasure};
use floatcanvas_view::BBox;
use kurbo::{Point, Vec2};

use crate::DrawObject;
use crate::object::SizePolicy;
use crate::paint::{Look, PaintCtx};

pub use areas::PieChart;
pub use image::{Bitmap, ScaledBitmap};
pub use lines::{Arrow, ArrowLine};
pub use marks::PointSet;
pub use text::{Alignment, ScaledText, ScaledTextBox, Text};

/// The geometry of a [`DrawObject`], in world coordinates unless noted.
#[derive(Clone, Debug)]
pub enum Shape {
    /// A round dot of fixed pixel diameter. Its bounding box is the point.
    Point {
        /// Centre.
        xy: Point,
        /// Diameter in pixels.
        diameter: f64,
    },
    /// A square dot of fixed pixel size. Its bounding box is the point.
    SquarePoint {
        /// Centre.
        xy: Point,
        /// Side in pixels.
        size: f64,
    },
    /// Many dots sharing one style.
    PointSet(PointSet),
    /// An open polyline.
    Line(Vec<Point>),
    /// A quadratic B-spline through control points.
    Spline(Vec<Point>),
    /// A closed polygon.
    Polygon(Vec<Point>),
    /// A fixed pixel-length arrow.
    Arrow(Arrow),
    /// A polyline with arrow heads.
    ArrowLine(ArrowLine),
    /// An axis-aligned rectangle.
    Rectangle {
        /// One corner.
        xy: Point,
        /// Extent from `xy`; either component may be negative.
        wh: Vec2,
    },
    /// The ellipse inscribed in a rectangle.
    Ellipse {
        /// One corner of the enclosing rectangle.
        xy: Point,
        /// Extent from `xy`.
        wh: Vec2,
    },
    /// A circle.
    Circle {
        /// Centre.
        xy: Point,
        /// Diameter in world units.
        diameter: f64,
    },
    /// A circular arc drawn counter-clockwise, filled as a wedge.
    Arc {
        /// Where the arc starts. Its distance to `center` is the radius.
        start: Point,
        /// Where the arc ends.
        end: Point,
        /// Centre of the circle.
        center: Point,
    },
    /// Fixed pixel-size text.
    Text(Text),
    /// World-sized text.
    ScaledText(ScaledText),
    /// World-sized wrapped text in a box.
    ScaledTextBox(ScaledTextBox),
    /// A native-size image.
    Bitmap(Bitmap),
    /// A world-sized image.
    ScaledBitmap(ScaledBitmap),
    /// A pie chart.
    PieChart(PieChart),
    /// Child objects sharing one hit colour.
    Group(Vec<DrawObject>),
}

impl Shape {
    /// World-space bounding box.
    pub fn bounding_box(&self) -> BBox {
        match self {
            Self::Point { xy, .. } | Self::SquarePoint { xy, .. } => BBox::new(*xy, *xy),
            Self::PointSet(set) => BBox::from_points(set.points.iter().copied()),
            Self::Line(points) | Self::Spline(points) | Self::Polygon(points) => {
                BBox::from_points(points.iter().copied())
            }
            Self::Arrow(arrow) => BBox::new(arrow.xy, arrow.xy),
            Self::ArrowLine(line) => BBox::from_points(line.points.iter().copied()),
            Self::Rectangle { xy, wh } | Self::Ellipse { xy, wh } => BBox::new(*xy, *xy + *wh),
            Self::Circle { xy, diameter } => {
                let r = Vec2::new(diameter / 2.0, diameter / 2.0);
                BBox::new(*xy - r, *xy + r)
            }
            Self::Arc { start, center, .. } => {
                let r = (*start - *center).hypot();
                BBox::new(*center - Vec2::new(r, r), *center + Vec2::new(r, r))
            }
            Self::Text(t) => BBox::new(t.xy, t.xy),
            Self::ScaledText(t) => t.bounding_box(),
            Self::ScaledTextBox(t) => t.bounding_box(),
            Self::Bitmap(b) => BBox::new(b.xy, b.xy),
            Self::ScaledBitmap(b) => b.bounding_box(),
            Self::PieChart(p) => p.bounding_box(),
            Self::Group(children) => BBox::from_bboxes(children.iter().map(DrawObject::bounding_box)),
        }
    }

    /// Moves the geometry by `delta` world units.
    pub fn translate(&mut self, delta: Vec2) {
        let shift = |points: &mut [Point]| points.iter_mut().for_each(|p| *p += delta);
        match self {
            Self::Point { xy, .. }
            | Self::SquarePoint { xy, .. }
            | Self::Rectangle { xy, .. }
            | Self::Ellipse { xy, .. }
            | Self::Circle { xy, .. } => *xy += delta,
            Self::PointSet(set) => shift(&mut set.points),
            Self::Line(points) | Self::Spline(points) | Self::Polygon(points) => shift(points),
            Self::Arrow(arrow) => arrow.xy += delta,
            Self::ArrowLine(line) => shift(&mut line.points),
            Self::Arc { start, end, center } => {
                *start += delta;
                *end += delta;
                *center += delta;
            }
            Self::Text(t) => t.xy += delta,
            Self::ScaledText(t) => t.xy += delta,
            Self::ScaledTextBox(t) => t.xy += delta,
            Self::Bitmap(b) => b.xy += delta,
            Self::ScaledBitmap(b) => b.xy += delta,
            Self::PieChart(p) => p.xy += delta,
            Self::Group(children) => children.iter_mut().for_each(|c| c.translate(delta)),
        }
    }

    pub(crate) fn layout(&mut self, metrics: &dyn TextMeasure) {
        match self {
            Self::ScaledText(t) => t.layout(metrics),
            Self::ScaledTextBox(t) => t.layout(metrics),
            Self::Group(children) => children.iter_mut().for_each(|c| c.layout(metrics)),
            _ => {}
        }
    }

    pub(crate) fn paint<S: Surface>(
        &self,
        surface: &mut S,
        ctx: &PaintCtx<'_>,
        look: &Look,
        policy: &SizePolicy,
    ) {
        match self {
            Self::Point { xy, diameter } => marks::paint_point(surface, ctx, look, *xy, *diameter),
            Self::SquarePoint { xy, size } => marks::paint_square(surface, ctx, look, *xy, *size),
            Self::PointSet(set) => set.paint(surface, ctx, look),
            Self::Line(points) => surface.draw_lines(&ctx.px_all(points), &look.pen),
            Self::Spline(points) => surface.draw_spline(&ctx.px_all(points), &look.pen),
            Self::Polygon(points) => {
                surface.draw_polygon(&ctx.px_all(points), &look.pen, &look.brush);
            }
            Self::Arrow(arrow) => arrow.paint(surface, ctx, look),
            Self::ArrowLine(line) => line.paint(surface, ctx, look),
            Self::Rectangle { xy, wh } => {
                if let Some(rect) = areas::pixel_rect(ctx, *xy, *wh, policy) {
                    surface.draw_rectangle(rect, &look.pen, &look.brush);
                }
            }
            Self::Ellipse { xy, wh } => {
                if let Some(rect) = areas::pixel_rect(ctx, *xy, *wh, policy) {
                    surface.draw_ellipse(rect, &look.pen, &look.brush);
                }
            }
            Self::Circle { xy, diameter } => {
                areas::paint_circle(surface, ctx, look, *xy, *diameter, policy);
            }
            Self::Arc { start, end, center } => surface.draw_arc(
                ctx.px(*start),
                ctx.px(*end),
                ctx.px(*center),
                &look.pen,
                &look.brush,
            ),
            Self::Text(t) => t.paint(surface, ctx, look),
            Self::ScaledText(t) => t.paint(surface, ctx, look, policy),
            Self::ScaledTextBox(t) => t.paint(surface, ctx, look, policy),
            Self::Bitmap(b) => b.paint(surface, ctx, look),
            Self::ScaledBitmap(b) => b.paint(surface, ctx, look, policy),
            Self::PieChart(p) => p.paint(surface, ctx, look),
            Self::Group(children) => {
                for child in children.iter().filter(|c| c.visible) {
                    if look.hit {
                        child.paint_with(surface, ctx, look);
                    } else {
                        child.paint_with(surface, ctx, &child.visual_look());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_extent_box_is_normalized() {
        let shape = Shape::Rectangle {
            xy: Point::new(10.0, 10.0),
            wh: Vec2::new(-4.0, -6.0),
        };
        let bb = shape.bounding_box();
        assert_eq!(bb.min(), Some(Point::new(6.0, 4.0)));
        assert_eq!(bb.max(), Some(Point::new(10.0, 10.0)));
    }

    #[test]
    fn arc_box_is_the_full_circle() {
        let shape = Shape::Arc {
            start: Point::new(5.0, 0.0),
            end: Point::new(0.0, 5.0),
            center: Point::ORIGIN,
        };
        let bb = shape.bounding_box();
        assert_eq!(bb.min(), Some(Point::new(-5.0, -5.0)));
        assert_eq!(bb.max(), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn group_box_merges_children_and_moves_with_them() {
        let mut group = Shape::Group(vec![
            DrawObject::circle(Point::new(0.0, 0.0), 2.0),
            DrawObject::point(Point::new(10.0, 4.0), 3.0),
        ]);
        let bb = group.bounding_box();
        assert_eq!(bb.min(), Some(Point::new(-1.0, -1.0)));
        assert_eq!(bb.max(), Some(Point::new(10.0, 4.0)));

        group.translate(Vec2::new(1.0, 1.0));
        assert_eq!(group.bounding_box().min(), Some(Point::new(0.0, 0.0)));
    }

    #[test]
    fn empty_group_has_null_box() {
        assert!(Shape::Group(Vec::new()).bounding_box().is_null());
        assert!(Shape::Line(Vec::new()).bounding_box().is_null());
    }
}
