// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::modes::{CoordSpace, ZoomAnchor};
use crate::{BBox, PixelPoint, PixelSize, Projection, ProjectionError};

/// Smallest panel dimension the transform will accept.
///
/// Some hosts report a `0x0` client area while a window is being created.
const MIN_PANEL: u32 = 2;

/// Fraction of the panel filled by [`ViewTransform::zoom_to_bbox`].
const FIT_MARGIN: f64 = 0.95;

/// World ↔ pixel transform for a canvas panel.
///
/// The transform is fully described by:
/// - `scale`: pixels per world unit,
/// - `projection_vector`: per‑axis factors produced by the [`Projection`],
/// - `center`: the world point shown at the middle of the panel,
/// - `panel_size`: the panel dimensions in pixels.
///
/// Conversions:
///
/// ```text
/// pixel = (world - center) * transform_vector + panel_size / 2
/// world = (pixel - panel_size / 2) / transform_vector + center
/// transform_vector = (scale, -scale) * projection_vector
/// ```
#[derive(Clone, Debug)]
pub struct ViewTransform {
    panel_size: PixelSize,
    scale: f64,
    center: Point,
    projection: Projection,
    projection_vector: Vec2,
    min_scale: Option<f64>,
    max_scale: Option<f64>,
}

impl ViewTransform {
    /// Creates a transform with scale `1.0`, centred on the world origin, with
    /// no projection.
    #[must_use]
    pub fn new(panel_size: PixelSize) -> Self {
        Self {
            panel_size: panel_size.at_least(MIN_PANEL),
            scale: 1.0,
            center: Point::ORIGIN,
            projection: Projection::Identity,
            projection_vector: Vec2::new(1.0, 1.0),
            min_scale: None,
            max_scale: None,
        }
    }

    /// Returns the panel size in pixels.
    #[must_use]
    pub fn panel_size(&self) -> PixelSize {
        self.panel_size
    }

    /// Sets the panel size. Dimensions below two pixels are raised to two.
    pub fn set_panel_size(&mut self, size: PixelSize) {
        self.panel_size = size.at_least(MIN_PANEL);
    }

    /// Half the panel size, the pixel position of [`ViewTransform::center`].
    #[must_use]
    pub fn half_panel(&self) -> Vec2 {
        self.panel_size.to_vec2() * 0.5
    }

    /// Pixels per world unit, before projection.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// World point at the middle of the panel.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Current projection.
    #[must_use]
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Projection vector evaluated at the current centre.
    #[must_use]
    pub fn projection_vector(&self) -> Vec2 {
        self.projection_vector
    }

    /// Combined per‑axis factor, including the Y flip.
    #[must_use]
    pub fn transform_vector(&self) -> Vec2 {
        Vec2::new(
            self.scale * self.projection_vector.x,
            -self.scale * self.projection_vector.y,
        )
    }

    /// Sets the projection, evaluating it at the current centre.
    ///
    /// The previous projection stays in effect if the new one is invalid here.
    pub fn set_projection(&mut self, projection: Projection) -> Result<(), ProjectionError> {
        let v = projection.vector(self.center)?;
        self.projection = projection;
        self.projection_vector = v;
        Ok(())
    }

    /// Sets optional lower and upper bounds on the scale.
    ///
    /// The bounds are normalized so that `min <= max`, and the current scale is
    /// clamped into them.
    pub fn set_scale_limits(&mut self, min_scale: Option<f64>, max_scale: Option<f64>) {
        let (min_scale, max_scale) = match (min_scale, max_scale) {
            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
            other => other,
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.apply_scale(self.scale);
    }

    /// Returns the configured scale limits.
    #[must_use]
    pub fn scale_limits(&self) -> (Option<f64>, Option<f64>) {
        (self.min_scale, self.max_scale)
    }

    /// Converts a world point to an unrounded device position.
    #[must_use]
    pub fn world_to_pixel_f64(&self, pt: Point) -> Point {
        let tv = self.transform_vector();
        let half = self.half_panel();
        Point::new(
            (pt.x - self.center.x) * tv.x + half.x,
            (pt.y - self.center.y) * tv.y + half.y,
        )
    }

    /// Converts a world point to the nearest pixel.
    #[must_use]
    pub fn world_to_pixel(&self, pt: Point) -> PixelPoint {
        PixelPoint::round_from(self.world_to_pixel_f64(pt))
    }

    /// Converts a batch of world points to pixels.
    #[must_use]
    pub fn world_to_pixel_batch(&self, pts: &[Point]) -> Vec<PixelPoint> {
        let tv = self.transform_vector();
        let half = self.half_panel();
        let c = self.center;
        pts.iter()
            .map(|pt| {
                PixelPoint::round_from(Point::new(
                    (pt.x - c.x) * tv.x + half.x,
                    (pt.y - c.y) * tv.y + half.y,
                ))
            })
            .collect()
    }

    /// Converts a possibly fractional device position to world coordinates.
    #[must_use]
    pub fn pixel_to_world_f64(&self, pt: Point) -> Point {
        let tv = self.transform_vector();
        let half = self.half_panel();
        Point::new(
            (pt.x - half.x) / tv.x + self.center.x,
            (pt.y - half.y) / tv.y + self.center.y,
        )
    }

    /// Converts a pixel to world coordinates.
    #[must_use]
    pub fn pixel_to_world(&self, pt: PixelPoint) -> Point {
        self.pixel_to_world_f64(pt.to_point())
    }

    /// Converts a batch of pixels to world coordinates.
    #[must_use]
    pub fn pixel_to_world_batch(&self, pts: &[PixelPoint]) -> Vec<Point> {
        pts.iter().map(|pt| self.pixel_to_world(*pt)).collect()
    }

    /// Converts a world‑space length vector to pixels (Y flipped, unrounded).
    #[must_use]
    pub fn scale_world_to_pixel(&self, len: Vec2) -> Vec2 {
        let tv = self.transform_vector();
        Vec2::new(len.x * tv.x, len.y * tv.y)
    }

    /// Converts a pixel length vector to world units.
    #[must_use]
    pub fn scale_pixel_to_world(&self, len: Vec2) -> Vec2 {
        let tv = self.transform_vector();
        Vec2::new(len.x / tv.x, len.y / tv.y)
    }

    /// World‑space box currently covered by the panel.
    #[must_use]
    pub fn viewport_bbox(&self) -> BBox {
        let size = self.panel_size.to_vec2();
        BBox::new(
            self.pixel_to_world_f64(Point::ORIGIN),
            self.pixel_to_world_f64(size.to_point()),
        )
    }

    /// Pans the viewport by `shift`, expressed in `space` units.
    pub fn move_by(&mut self, shift: Vec2, space: CoordSpace) {
        let tv = self.transform_vector();
        let world_shift = match space {
            CoordSpace::Panel => {
                let size = self.panel_size.to_vec2();
                Vec2::new(-shift.x * size.x / tv.x, shift.y * size.y / tv.y)
            }
            CoordSpace::Pixel => Vec2::new(shift.x / tv.x, shift.y / tv.y),
            CoordSpace::World => shift,
        };
        self.center += world_shift;
        self.refresh_projection();
    }

    /// Multiplies the scale by `factor`.
    ///
    /// Non‑positive or non‑finite factors are ignored. The result is clamped
    /// into the scale limits.
    pub fn zoom(&mut self, factor: f64, anchor: ZoomAnchor) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        match anchor {
            ZoomAnchor::ViewportCenter => {
                self.apply_scale(self.scale * factor);
            }
            ZoomAnchor::RecenterWorld(world) => {
                self.center = world;
                self.refresh_projection();
                self.apply_scale(self.scale * factor);
            }
            ZoomAnchor::RecenterPixel(px) => {
                self.center = self.pixel_to_world(px);
                self.refresh_projection();
                self.apply_scale(self.scale * factor);
            }
            ZoomAnchor::KeepPixel(px) => {
                let world = self.pixel_to_world(px);
                self.apply_scale(self.scale * factor);
                let moved_to = self.world_to_pixel_f64(world);
                self.move_by(moved_to - px.to_point(), CoordSpace::Pixel);
            }
        }
    }

    /// Centres on `bbox` and picks the scale that makes it fill the panel.
    ///
    /// A zero extent on one axis is fitted using the other axis only; a
    /// zero‑size box gets scale `1.0`. A null box resets the transform to its
    /// defaults.
    pub fn zoom_to_bbox(&mut self, bbox: &BBox) {
        let Some(center) = bbox.center() else {
            self.reset();
            return;
        };
        self.center = center;
        self.refresh_projection();

        let projected = bbox.scale_components(self.projection_vector);
        let size = self.panel_size.to_vec2();
        let sx = (projected.width() > 0.0).then(|| size.x / projected.width());
        let sy = (projected.height() > 0.0).then(|| size.y / projected.height());
        let scale = match (sx, sy) {
            (Some(sx), Some(sy)) => sx.min(sy) * FIT_MARGIN,
            (Some(s), None) | (None, Some(s)) => s * FIT_MARGIN,
            (None, None) => 1.0,
        };
        self.apply_scale(scale);
    }

    /// Resets scale and centre to their defaults, keeping the projection and
    /// scale limits.
    pub fn reset(&mut self) {
        self.center = Point::ORIGIN;
        self.refresh_projection();
        self.apply_scale(1.0);
    }

    fn apply_scale(&mut self, scale: f64) {
        let mut scale = scale;
        if let Some(lo) = self.min_scale {
            scale = scale.max(lo);
        }
        if let Some(hi) = self.max_scale {
            scale = scale.min(hi);
        }
        self.scale = scale;
    }

    fn refresh_projection(&mut self) {
        // An invalid vector at the new centre keeps the last good one.
        if let Ok(v) = self.projection.vector(self.center) {
            self.projection_vector = v;
        }
    }
}
