// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::str::FromStr;
use std::path::Path;

use floatcanvas_view::{PixelPoint, PixelSize};
use kurbo::{BezPath, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::{Brush, Font, Pen, Raster, Rgb, SurfaceError, TextMeasure};

/// Raster export formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// Portable Network Graphics.
    Png,
    /// JPEG, without alpha.
    Jpeg,
    /// Windows bitmap, without alpha.
    Bmp,
}

impl FromStr for ImageFormat {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            _ => Err(SurfaceError::UnsupportedFormat(s.to_owned())),
        }
    }
}

impl ImageFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, SurfaceError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .parse()
    }
}

/// A pixel-space drawing target.
///
/// Angles are in degrees, counter-clockwise on screen, with zero pointing
/// right.
pub trait Surface {
    /// Size in pixels.
    fn size(&self) -> PixelSize;

    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    /// Strokes a polyline through `points`.
    fn draw_lines(&mut self, points: &[Point], pen: &Pen);

    /// Draws each point as a dot of the pen's width.
    fn draw_points(&mut self, points: &[Point], pen: &Pen);

    /// Fills and outlines a closed polygon.
    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: &Brush);

    /// Fills and outlines a rectangle.
    fn draw_rectangle(&mut self, rect: Rect, pen: &Pen, brush: &Brush);

    /// Fills and outlines the ellipse inscribed in `rect`.
    fn draw_ellipse(&mut self, rect: Rect, pen: &Pen, brush: &Brush);

    /// Fills and outlines a circle.
    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: &Brush);

    /// Fills and outlines a pie wedge of the ellipse inscribed in `rect`.
    fn draw_elliptic_arc(
        &mut self,
        rect: Rect,
        start_deg: f64,
        end_deg: f64,
        pen: &Pen,
        brush: &Brush,
    );

    /// Draws a circular arc from `start` to `end` counter-clockwise about
    /// `center`, filled as a wedge. Equal end points draw a full circle.
    fn draw_arc(&mut self, start: Point, end: Point, center: Point, pen: &Pen, brush: &Brush) {
        let radius = (start - center).hypot();
        let angle = |p: Point| (-(p.y - center.y)).atan2(p.x - center.x).to_degrees();
        let a0 = angle(start);
        let mut sweep = angle(end) - a0;
        if sweep <= 0.0 {
            sweep += 360.0;
        }
        let rect = Rect::from_center_size(center, (2.0 * radius, 2.0 * radius));
        self.draw_elliptic_arc(rect, a0, a0 + sweep, pen, brush);
    }

    /// Strokes a quadratic B-spline through the control points.
    fn draw_spline(&mut self, points: &[Point], pen: &Pen) {
        let mut flat = Vec::new();
        kurbo::flatten(&spline_path(points), 0.25, |el| {
            if let kurbo::PathEl::MoveTo(p) | kurbo::PathEl::LineTo(p) = el {
                flat.push(p);
            }
        });
        self.draw_lines(&flat, pen);
    }

    /// Draws a single line of text with its top-left corner at `origin`.
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &Font,
        color: Color,
        background: Option<Color>,
    );

    /// Measures a single line of text.
    fn text_extent(&self, text: &str, font: &Font) -> Size;

    /// Draws an image at its native size with its top-left at `origin`.
    fn draw_bitmap(&mut self, raster: &Raster, origin: Point);

    /// Draws an image stretched to fill `rect`.
    fn draw_scaled_bitmap(&mut self, raster: &Raster, rect: Rect);

    /// Copies `source` into this surface, shifted by `offset` pixels.
    fn blit_from(&mut self, source: &Self, offset: Vec2)
    where
        Self: Sized;

    /// Reads one pixel back. `None` outside the surface or for backends
    /// without pixel storage.
    fn pixel(&self, at: PixelPoint) -> Option<Rgb>;

    /// Inverts the colours along a one-pixel rectangle outline. Applying it
    /// twice restores the original pixels.
    fn xor_rectangle(&mut self, rect: Rect);

    /// Encodes the surface as an image file.
    fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, SurfaceError>;
}

/// Creates the surfaces a canvas draws into.
pub trait Backend {
    /// Surface type produced by this backend.
    type Surface: Surface;

    /// Creates a visual surface.
    fn create_surface(&mut self, size: PixelSize) -> Result<Self::Surface, SurfaceError>;

    /// Creates a hit-test surface. Colours painted into it must read back
    /// unchanged, so implementations disable anti-aliasing.
    fn create_hit_surface(&mut self, size: PixelSize) -> Result<Self::Surface, SurfaceError>;

    /// Text metrics used for layout.
    fn metrics(&self) -> &dyn TextMeasure;

    /// Returns `true` if `rgb` survives being painted into a hit-test
    /// surface and read back.
    fn reproduces_color(&mut self, rgb: Rgb) -> bool {
        probe_swatch(self, rgb)
    }
}

/// Paints `rgb` as a wide point onto a black 1x1 hit-test surface and
/// compares the pixel read back.
pub fn probe_swatch<B: Backend + ?Sized>(backend: &mut B, rgb: Rgb) -> bool {
    let Ok(mut swatch) = backend.create_hit_surface(PixelSize::new(1, 1)) else {
        return false;
    };
    swatch.clear(Rgb::BLACK.to_color());
    swatch.draw_points(&[Point::ORIGIN], &Pen::new(rgb.to_color(), 4.0));
    let read = swatch.pixel(PixelPoint::ORIGIN);
    tracing::trace!(%rgb, ?read, "hit colour probe");
    read == Some(rgb)
}

/// Quadratic B-spline through `points`: straight to the first midpoint,
/// quadratic segments between midpoints, straight to the last point.
pub fn spline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some((&first, rest)) = points.split_first() else {
        return path;
    };
    path.move_to(first);
    let Some((&last, inner)) = rest.split_last() else {
        return path;
    };
    let Some((&c0, others)) = inner.split_first() else {
        path.line_to(last);
        return path;
    };
    path.line_to(first.midpoint(c0));
    let mut ctrl = c0;
    for &next in others {
        path.quad_to(ctrl, ctrl.midpoint(next));
        ctrl = next;
    }
    path.quad_to(ctrl, ctrl.midpoint(last));
    path.line_to(last);
    path
}
