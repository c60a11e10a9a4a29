// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

/// Axis‑aligned world‑space bounding box with an explicit null state.
///
/// A null box means "no content yet". It is distinct from a degenerate
/// zero‑size box at the origin: merging with a null box is a no‑op, a null
/// box overlaps nothing, and zooming to a null box resets the view.
///
/// Non‑null boxes always satisfy `min.x <= max.x` and `min.y <= max.y`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BBox(Option<Rect>);

impl BBox {
    /// The null box.
    pub const NULL: Self = Self(None);

    /// Creates a box spanning the two corners, in any order.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        Self(Some(Rect::from_points(a, b)))
    }

    /// Creates a box from a rectangle, normalizing its corners.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        Self(Some(rect.abs()))
    }

    /// Computes the min/max reduction over a batch of points.
    ///
    /// An empty batch yields [`BBox::NULL`].
    #[must_use]
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut out = Self::NULL;
        for pt in points {
            out.merge_point(pt);
        }
        out
    }

    /// Computes the union of a batch of boxes, ignoring null entries.
    #[must_use]
    pub fn from_bboxes<I>(boxes: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut out = Self::NULL;
        for bb in boxes {
            out.merge(&bb);
        }
        out
    }

    /// Returns `true` for the null box.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the box as a rectangle, or `None` when null.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        self.0
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Option<Point> {
        self.0.map(|r| Point::new(r.x0, r.y0))
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Option<Point> {
        self.0.map(|r| Point::new(r.x1, r.y1))
    }

    /// Width in world units; `0.0` when null.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.0.map_or(0.0, |r| r.width())
    }

    /// Height in world units; `0.0` when null.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.0.map_or(0.0, |r| r.height())
    }

    /// Centre of the box.
    #[must_use]
    pub fn center(&self) -> Option<Point> {
        self.0.map(|r| r.center())
    }

    /// Grows this box in place to also cover `other`.
    pub fn merge(&mut self, other: &Self) {
        self.0 = match (self.0, other.0) {
            (Some(a), Some(b)) => Some(a.union(b)),
            (None, b) => b,
            (a, None) => a,
        };
    }

    /// Grows this box in place to also cover `pt`.
    pub fn merge_point(&mut self, pt: Point) {
        self.0 = Some(match self.0 {
            Some(r) => r.union_pt(pt),
            None => Rect::from_points(pt, pt),
        });
    }

    /// Returns the union of two boxes.
    #[must_use]
    pub fn union(mut self, other: &Self) -> Self {
        self.merge(other);
        self
    }

    /// Returns `true` if the boxes share any point, edges included.
    ///
    /// A null box overlaps nothing.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.x0 <= b.x1 && a.x1 >= b.x0 && a.y0 <= b.y1 && a.y1 >= b.y0,
            _ => false,
        }
    }

    /// Returns `true` if this box lies entirely within `other`.
    #[must_use]
    pub fn inside(&self, other: &Self) -> bool {
        match (self.0, other.0) {
            (Some(a), Some(b)) => a.x0 >= b.x0 && a.x1 <= b.x1 && a.y0 >= b.y0 && a.y1 <= b.y1,
            _ => false,
        }
    }

    /// Returns `true` if `pt` lies within the box, edges included.
    #[must_use]
    pub fn point_inside(&self, pt: Point) -> bool {
        self.0
            .is_some_and(|r| pt.x >= r.x0 && pt.x <= r.x1 && pt.y >= r.y0 && pt.y <= r.y1)
    }

    /// Returns the box moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: Vec2) -> Self {
        Self(self.0.map(|r| r + delta))
    }

    /// Returns the box grown by `dx`/`dy` on each side.
    #[must_use]
    pub fn inflate(&self, dx: f64, dy: f64) -> Self {
        Self(self.0.map(|r| r.inflate(dx, dy).abs()))
    }

    /// Returns the box with its X and Y extents multiplied component‑wise.
    ///
    /// Used to express a world box in projected units before fitting.
    #[must_use]
    pub fn scale_components(&self, factors: Vec2) -> Self {
        Self(self.0.map(|r| {
            Rect::from_points(
                Point::new(r.x0 * factors.x, r.y0 * factors.y),
                Point::new(r.x1 * factors.x, r.y1 * factors.y),
            )
        }))
    }
}

impl From<Rect> for BBox {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::BBox;

    fn bb(x0: f64, y0: f64, x1: f64, y1: f64) -> BBox {
        BBox::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    #[test]
    fn merge_with_null_is_identity() {
        let mut a = bb(0.0, 0.0, 10.0, 5.0);
        a.merge(&BBox::NULL);
        assert_eq!(a, bb(0.0, 0.0, 10.0, 5.0));

        let mut n = BBox::NULL;
        n.merge(&a);
        assert_eq!(n, a);

        let mut nn = BBox::NULL;
        nn.merge(&BBox::NULL);
        assert!(nn.is_null());
    }

    #[test]
    fn null_is_distinct_from_zero_box_at_origin() {
        let zero = BBox::from_points([Point::ORIGIN]);
        assert!(!zero.is_null());
        assert_eq!(zero.width(), 0.0);
        assert!(zero.point_inside(Point::ORIGIN));
        assert!(!BBox::NULL.point_inside(Point::ORIGIN));
    }

    #[test]
    fn corners_are_normalized() {
        let b = bb(10.0, 5.0, -2.0, -1.0);
        assert_eq!(b.min(), Some(Point::new(-2.0, -1.0)));
        assert_eq!(b.max(), Some(Point::new(10.0, 5.0)));
        assert_eq!(BBox::from_rect(Rect::new(3.0, 3.0, 1.0, 1.0)).min(), Some(Point::new(1.0, 1.0)));
    }

    #[test]
    fn from_points_reduces_min_max() {
        let b = BBox::from_points([
            Point::new(1.0, 7.0),
            Point::new(-3.0, 2.0),
            Point::new(4.0, -1.0),
        ]);
        assert_eq!(b, bb(-3.0, -1.0, 4.0, 7.0));
        assert!(BBox::from_points(core::iter::empty()).is_null());
    }

    #[test]
    fn overlap_includes_touching_edges() {
        let a = bb(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&bb(10.0, 10.0, 20.0, 20.0)));
        assert!(a.overlaps(&bb(2.0, 2.0, 3.0, 3.0)));
        assert!(!a.overlaps(&bb(10.5, 0.0, 20.0, 10.0)));
        assert!(!a.overlaps(&BBox::NULL));
        assert!(!BBox::NULL.overlaps(&a));
    }

    #[test]
    fn inside_requires_full_containment() {
        let outer = bb(0.0, 0.0, 10.0, 10.0);
        assert!(bb(1.0, 1.0, 9.0, 9.0).inside(&outer));
        assert!(outer.inside(&outer));
        assert!(!bb(-1.0, 1.0, 9.0, 9.0).inside(&outer));
        assert!(!BBox::NULL.inside(&outer));
    }

    #[test]
    fn union_of_batches_skips_nulls() {
        let u = BBox::from_bboxes([BBox::NULL, bb(0.0, 0.0, 1.0, 1.0), bb(5.0, -2.0, 6.0, 0.0)]);
        assert_eq!(u, bb(0.0, -2.0, 6.0, 1.0));
    }

    #[test]
    fn translate_and_scale_components() {
        let b = bb(0.0, 0.0, 2.0, 4.0).translate(Vec2::new(1.0, -1.0));
        assert_eq!(b, bb(1.0, -1.0, 3.0, 3.0));
        let s = b.scale_components(Vec2::new(0.5, 1.0));
        assert_eq!(s, bb(0.5, -1.0, 1.5, 3.0));
        assert!(BBox::NULL.translate(Vec2::new(1.0, 1.0)).is_null());
    }
}
