// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording backend for tests and debugging.
//!
//! It does **not** rasterize. Every drawing call is appended to the
//! surface's log as a [`DrawCall`], so tests can assert on what a canvas drew
//! and in which order. Pixel read-back always returns `None`.

use floatcanvas_view::{PixelPoint, PixelSize};
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

use crate::{
    Backend, Brush, FixedMetrics, Font, ImageFormat, Pen, Raster, Rgb, Surface, SurfaceError,
    TextMeasure,
};

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// [`Surface::clear`].
    Clear(Color),
    /// [`Surface::draw_lines`].
    Lines {
        /// Polyline vertices.
        points: Vec<Point>,
        /// Outline.
        pen: Pen,
    },
    /// [`Surface::draw_points`].
    Points {
        /// Dot centres.
        points: Vec<Point>,
        /// Dot paint.
        pen: Pen,
    },
    /// [`Surface::draw_polygon`].
    Polygon {
        /// Vertices.
        points: Vec<Point>,
        /// Outline.
        pen: Pen,
        /// Interior.
        brush: Brush,
    },
    /// [`Surface::draw_rectangle`].
    Rectangle {
        /// Rectangle.
        rect: Rect,
        /// Outline.
        pen: Pen,
        /// Interior.
        brush: Brush,
    },
    /// [`Surface::draw_ellipse`].
    Ellipse {
        /// Bounding rectangle.
        rect: Rect,
        /// Outline.
        pen: Pen,
        /// Interior.
        brush: Brush,
    },
    /// [`Surface::draw_circle`].
    Circle {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
        /// Outline.
        pen: Pen,
        /// Interior.
        brush: Brush,
    },
    /// [`Surface::draw_elliptic_arc`].
    EllipticArc {
        /// Bounding rectangle of the full ellipse.
        rect: Rect,
        /// Start angle in degrees.
        start_deg: f64,
        /// End angle in degrees.
        end_deg: f64,
        /// Outline.
        pen: Pen,
        /// Interior.
        brush: Brush,
    },
    /// [`Surface::draw_text`].
    Text {
        /// The string.
        text: String,
        /// Top-left corner.
        origin: Point,
        /// Font.
        font: Font,
        /// Foreground colour.
        color: Color,
        /// Background colour, if filled.
        background: Option<Color>,
    },
    /// [`Surface::draw_bitmap`].
    Bitmap {
        /// Image size.
        size: PixelSize,
        /// Top-left corner.
        origin: Point,
    },
    /// [`Surface::draw_scaled_bitmap`].
    ScaledBitmap {
        /// Image size.
        size: PixelSize,
        /// Target rectangle.
        rect: Rect,
    },
    /// [`Surface::blit_from`].
    Blit {
        /// Number of calls the source surface had recorded.
        source_calls: usize,
        /// Shift applied.
        offset: Vec2,
    },
    /// [`Surface::xor_rectangle`].
    XorRectangle(Rect),
}

/// Backend producing [`RecordingSurface`]s.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    metrics: FixedMetrics,
    /// Sizes of every surface created, in order, with `true` for hit surfaces.
    pub created: Vec<(PixelSize, bool)>,
}

impl Backend for RecordingBackend {
    type Surface = RecordingSurface;

    fn create_surface(&mut self, size: PixelSize) -> Result<RecordingSurface, SurfaceError> {
        self.created.push((size, false));
        RecordingSurface::new(size, self.metrics)
    }

    fn create_hit_surface(&mut self, size: PixelSize) -> Result<RecordingSurface, SurfaceError> {
        self.created.push((size, true));
        RecordingSurface::new(size, self.metrics)
    }

    fn metrics(&self) -> &dyn TextMeasure {
        &self.metrics
    }

    fn reproduces_color(&mut self, _rgb: Rgb) -> bool {
        true
    }
}

/// A surface that logs its drawing calls.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    size: PixelSize,
    metrics: FixedMetrics,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Creates an empty log for a surface of `size`.
    pub fn new(size: PixelSize, metrics: FixedMetrics) -> Result<Self, SurfaceError> {
        if size.width == 0 || size.height == 0 {
            return Err(SurfaceError::InvalidSize {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            size,
            metrics,
            calls: Vec::new(),
        })
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Takes the recorded calls, leaving the log empty.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        core::mem::take(&mut self.calls)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> PixelSize {
        self.size
    }

    fn clear(&mut self, color: Color) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_lines(&mut self, points: &[Point], pen: &Pen) {
        self.calls.push(DrawCall::Lines {
            points: points.to_vec(),
            pen: *pen,
        });
    }

    fn draw_points(&mut self, points: &[Point], pen: &Pen) {
        self.calls.push(DrawCall::Points {
            points: points.to_vec(),
            pen: *pen,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: &Brush) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            pen: *pen,
            brush: *brush,
        });
    }

    fn draw_rectangle(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        self.calls.push(DrawCall::Rectangle {
            rect,
            pen: *pen,
            brush: *brush,
        });
    }

    fn draw_ellipse(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        self.calls.push(DrawCall::Ellipse {
            rect,
            pen: *pen,
            brush: *brush,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: &Brush) {
        self.calls.push(DrawCall::Circle {
            center,
            radius,
            pen: *pen,
            brush: *brush,
        });
    }

    fn draw_elliptic_arc(
        &mut self,
        rect: Rect,
        start_deg: f64,
        end_deg: f64,
        pen: &Pen,
        brush: &Brush,
    ) {
        self.calls.push(DrawCall::EllipticArc {
            rect,
            start_deg,
            end_deg,
            pen: *pen,
            brush: *brush,
        });
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &Font,
        color: Color,
        background: Option<Color>,
    ) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            origin,
            font: font.clone(),
            color,
            background,
        });
    }

    fn text_extent(&self, text: &str, font: &Font) -> Size {
        self.metrics.text_extent(text, font)
    }

    fn draw_bitmap(&mut self, raster: &Raster, origin: Point) {
        self.calls.push(DrawCall::Bitmap {
            size: raster.size(),
            origin,
        });
    }

    fn draw_scaled_bitmap(&mut self, raster: &Raster, rect: Rect) {
        self.calls.push(DrawCall::ScaledBitmap {
            size: raster.size(),
            rect,
        });
    }

    fn blit_from(&mut self, source: &Self, offset: Vec2) {
        self.calls.push(DrawCall::Blit {
            source_calls: source.calls.len(),
            offset,
        });
    }

    fn pixel(&self, _at: PixelPoint) -> Option<Rgb> {
        None
    }

    fn xor_rectangle(&mut self, rect: Rect) {
        self.calls.push(DrawCall::XorRectangle(rect));
    }

    fn encode(&self, _format: ImageFormat) -> Result<Vec<u8>, SurfaceError> {
        Err(SurfaceError::NoPixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let mut backend = RecordingBackend::default();
        let mut s = backend.create_surface(PixelSize::new(10, 10)).unwrap();
        let pen = Pen::new(Rgb::new(1, 2, 3).to_color(), 2.0);
        s.clear(Rgb::BLACK.to_color());
        s.draw_lines(&[Point::ORIGIN, Point::new(3.0, 4.0)], &pen);
        assert_eq!(s.calls().len(), 2);
        assert!(matches!(s.calls()[0], DrawCall::Clear(_)));
        assert!(matches!(&s.calls()[1], DrawCall::Lines { points, .. } if points.len() == 2));
        assert_eq!(s.take_calls().len(), 2);
        assert!(s.calls().is_empty());
    }

    #[test]
    fn arc_and_spline_use_primitive_calls() {
        let mut s = RecordingSurface::new(PixelSize::new(10, 10), FixedMetrics::default()).unwrap();
        let pen = Pen::new(Rgb::new(9, 9, 9).to_color(), 1.0);
        s.draw_arc(
            Point::new(10.0, 0.0),
            Point::new(0.0, -10.0),
            Point::ORIGIN,
            &pen,
            &Brush::transparent(),
        );
        let DrawCall::EllipticArc {
            rect,
            start_deg,
            end_deg,
            ..
        } = &s.calls()[0]
        else {
            panic!("expected an elliptic arc, got {:?}", s.calls()[0]);
        };
        assert_eq!(*rect, Rect::new(-10.0, -10.0, 10.0, 10.0));
        // Screen Y is down: (0, -10) is straight up, a quarter turn counter-clockwise.
        assert!(start_deg.abs() < 1e-9);
        assert!((end_deg - 90.0).abs() < 1e-9);

        s.draw_spline(
            &[Point::ORIGIN, Point::new(5.0, 5.0), Point::new(10.0, 0.0)],
            &pen,
        );
        assert!(matches!(&s.calls()[1], DrawCall::Lines { points, .. } if points.len() > 3));
    }

    #[test]
    fn reports_every_colour_reproducible_and_no_pixels() {
        let mut backend = RecordingBackend::default();
        assert!(backend.reproduces_color(Rgb::new(255, 255, 255)));
        let s = backend.create_hit_surface(PixelSize::new(1, 1)).unwrap();
        assert_eq!(s.pixel(PixelPoint::ORIGIN), None);
        assert!(matches!(s.encode(ImageFormat::Png), Err(SurfaceError::NoPixels)));
        assert_eq!(backend.created, [(PixelSize::new(1, 1), true)]);
    }
}
