// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless raster backend on `tiny-skia`.

use core::fmt;

use floatcanvas_view::{PixelPoint, PixelSize};
use kurbo::{Arc, BezPath, Circle, Ellipse, PathEl, Point, Rect, Shape, Size, Vec2};
use peniko::Color;
use tiny_skia::{
    BlendMode, ColorU8, FillRule, FilterQuality, LineCap, LineJoin, Paint, PathBuilder, Pattern,
    Pixmap, PixmapPaint, SpreadMode, Stroke, StrokeDash, Transform,
};

use crate::{
    Backend, Brush, FillStyle, FixedMetrics, Font, ImageFormat, Pen, Raster, Rgb, Surface,
    SurfaceError, TextMeasure,
};

/// Tolerance used when converting curves to paths.
const CURVE_TOLERANCE: f64 = 0.1;

/// Side of the repeating hatch tile.
const HATCH_TILE: u32 = 8;

/// Backend producing [`PixmapSurface`]s.
#[derive(Clone, Debug, Default)]
pub struct PixmapBackend {
    metrics: FixedMetrics,
}

impl PixmapBackend {
    /// Creates a backend laying out text with `metrics`.
    pub fn new(metrics: FixedMetrics) -> Self {
        Self { metrics }
    }
}

impl Backend for PixmapBackend {
    type Surface = PixmapSurface;

    fn create_surface(&mut self, size: PixelSize) -> Result<PixmapSurface, SurfaceError> {
        PixmapSurface::new(size, true, self.metrics)
    }

    fn create_hit_surface(&mut self, size: PixelSize) -> Result<PixmapSurface, SurfaceError> {
        PixmapSurface::new(size, false, self.metrics)
    }

    fn metrics(&self) -> &dyn TextMeasure {
        &self.metrics
    }
}

/// A `tiny-skia` pixmap with the [`Surface`] drawing calls.
///
/// Text is drawn as solid block glyphs laid out with [`FixedMetrics`]; there
/// is no font rasterizer.
#[derive(Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
    anti_alias: bool,
    metrics: FixedMetrics,
}

impl fmt::Debug for PixmapSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixmapSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("anti_alias", &self.anti_alias)
            .finish_non_exhaustive()
    }
}

impl PixmapSurface {
    /// Allocates a transparent surface.
    pub fn new(
        size: PixelSize,
        anti_alias: bool,
        metrics: FixedMetrics,
    ) -> Result<Self, SurfaceError> {
        let pixmap =
            Pixmap::new(size.width, size.height).ok_or(SurfaceError::InvalidSize {
                width: size.width,
                height: size.height,
            })?;
        tracing::trace!(width = size.width, height = size.height, anti_alias, "pixmap surface");
        Ok(Self {
            pixmap,
            anti_alias,
            metrics,
        })
    }

    /// The underlying pixmap.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    fn paint(&self, color: Color) -> Paint<'static> {
        let c = color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(c.r, c.g, c.b, c.a);
        paint.anti_alias = self.anti_alias;
        paint
    }

    fn stroke(&mut self, path: &BezPath, pen: &Pen) {
        if !pen.is_visible() {
            return;
        }
        let Some(path) = to_skia_path(path, Vec2::new(0.5, 0.5)) else {
            return;
        };
        let paint = self.paint(pen.color);
        self.pixmap
            .stroke_path(&path, &paint, &stroke_for(pen), Transform::identity(), None);
    }

    fn fill(&mut self, path: &BezPath, offset: Vec2, brush: &Brush) {
        if !brush.is_visible() {
            return;
        }
        let Some(path) = to_skia_path(path, offset) else {
            return;
        };
        let tile = hatch_tile(brush);
        let mut paint = self.paint(brush.color);
        if let Some(tile) = &tile {
            paint.shader = Pattern::new(
                tile.as_ref(),
                SpreadMode::Repeat,
                FilterQuality::Nearest,
                1.0,
                Transform::identity(),
            );
        }
        self.pixmap
            .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }

    fn fill_and_stroke(&mut self, path: &BezPath, pen: &Pen, brush: &Brush) {
        self.fill(path, Vec2::new(0.5, 0.5), brush);
        self.stroke(path, pen);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.abs();
        if let Some(r) = tiny_skia::Rect::from_ltrb(
            to_f32(rect.x0),
            to_f32(rect.y0),
            to_f32(rect.x1),
            to_f32(rect.y1),
        ) {
            let paint = self.paint(color);
            self.pixmap.fill_rect(r, &paint, Transform::identity(), None);
        }
    }

    fn invert(&mut self, x: u32, y: u32) {
        let idx = y as usize * self.pixmap.width() as usize + x as usize;
        if let Some(px) = self.pixmap.pixels_mut().get_mut(idx) {
            let c = px.demultiply();
            *px = ColorU8::from_rgba(
                255 - c.red(),
                255 - c.green(),
                255 - c.blue(),
                c.alpha(),
            )
            .premultiply();
        }
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> PixelSize {
        PixelSize::new(self.pixmap.width(), self.pixmap.height())
    }

    fn clear(&mut self, color: Color) {
        let c = color.to_rgba8();
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a));
    }

    fn draw_lines(&mut self, points: &[Point], pen: &Pen) {
        if points.len() < 2 {
            return;
        }
        self.stroke(&polyline(points, false), pen);
    }

    fn draw_points(&mut self, points: &[Point], pen: &Pen) {
        if !pen.is_visible() {
            return;
        }
        let brush = Brush::solid(pen.color);
        for &p in points {
            if pen.width <= 1.0 {
                self.fill_rect(Rect::from_origin_size(p, (1.0, 1.0)), pen.color);
            } else {
                let dot = Circle::new(p, pen.width / 2.0).to_path(CURVE_TOLERANCE);
                self.fill(&dot, Vec2::new(0.5, 0.5), &brush);
            }
        }
    }

    fn draw_polygon(&mut self, points: &[Point], pen: &Pen, brush: &Brush) {
        if points.len() < 2 {
            return;
        }
        self.fill_and_stroke(&polyline(points, true), pen, brush);
    }

    fn draw_rectangle(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        let rect = rect.abs();
        self.fill(&rect.to_path(CURVE_TOLERANCE), Vec2::ZERO, brush);
        let outline = Rect::new(
            rect.x0,
            rect.y0,
            (rect.x1 - 1.0).max(rect.x0),
            (rect.y1 - 1.0).max(rect.y0),
        );
        self.stroke(&outline.to_path(CURVE_TOLERANCE), pen);
    }

    fn draw_ellipse(&mut self, rect: Rect, pen: &Pen, brush: &Brush) {
        let path = Ellipse::from_rect(rect.abs()).to_path(CURVE_TOLERANCE);
        self.fill_and_stroke(&path, pen, brush);
    }

    fn draw_circle(&mut self, center: Point, radius: f64, pen: &Pen, brush: &Brush) {
        let path = Circle::new(center, radius.abs()).to_path(CURVE_TOLERANCE);
        self.fill_and_stroke(&path, pen, brush);
    }

    fn draw_elliptic_arc(
        &mut self,
        rect: Rect,
        start_deg: f64,
        end_deg: f64,
        pen: &Pen,
        brush: &Brush,
    ) {
        let rect = rect.abs();
        let sweep = end_deg - start_deg;
        if sweep.abs() >= 360.0 {
            self.draw_ellipse(rect, pen, brush);
            return;
        }
        let center = rect.center();
        let arc = Arc {
            center,
            radii: Vec2::new(rect.width() / 2.0, rect.height() / 2.0),
            // Screen Y points down, so counter-clockwise is a negative angle.
            start_angle: -start_deg.to_radians(),
            sweep_angle: -sweep.to_radians(),
            x_rotation: 0.0,
        };
        let mut wedge = BezPath::new();
        wedge.move_to(center);
        for el in arc.path_elements(CURVE_TOLERANCE) {
            match el {
                PathEl::MoveTo(p) => wedge.line_to(p),
                other => wedge.push(other),
            }
        }
        wedge.close_path();
        self.fill_and_stroke(&wedge, pen, brush);
    }

    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        font: &Font,
        color: Color,
        background: Option<Color>,
    ) {
        let extent = self.metrics.text_extent(text, font);
        if let Some(bg) = background {
            self.fill_rect(Rect::from_origin_size(origin, extent), bg);
        }
        let advance = self.metrics.advance(font);
        let h = extent.height;
        let mut x = origin.x;
        for ch in text.chars() {
            if !ch.is_whitespace() {
                let glyph = Rect::new(
                    x + advance * 0.15,
                    origin.y + h * 0.25,
                    x + advance * 0.85,
                    origin.y + h * 0.8,
                );
                self.fill_rect(glyph, color);
            }
            x += advance;
        }
        if font.underlined {
            let y = origin.y + (h * 0.9).floor();
            self.fill_rect(Rect::new(origin.x, y, origin.x + extent.width, y + 1.0), color);
        }
    }

    fn text_extent(&self, text: &str, font: &Font) -> Size {
        self.metrics.text_extent(text, font)
    }

    fn draw_bitmap(&mut self, raster: &Raster, origin: Point) {
        let Some(image) = raster_to_pixmap(raster) else {
            return;
        };
        self.pixmap.draw_pixmap(
            to_i32(origin.x),
            to_i32(origin.y),
            image.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn draw_scaled_bitmap(&mut self, raster: &Raster, rect: Rect) {
        let Some(image) = raster_to_pixmap(raster) else {
            return;
        };
        let rect = rect.abs();
        let sx = rect.width() / f64::from(raster.width());
        let sy = rect.height() / f64::from(raster.height());
        if sx <= 0.0 || sy <= 0.0 {
            return;
        }
        let paint = PixmapPaint {
            quality: FilterQuality::Nearest,
            ..PixmapPaint::default()
        };
        let transform = Transform::from_row(
            to_f32(sx),
            0.0,
            0.0,
            to_f32(sy),
            to_f32(rect.x0),
            to_f32(rect.y0),
        );
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }

    fn blit_from(&mut self, source: &Self, offset: Vec2) {
        let paint = PixmapPaint {
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        self.pixmap.draw_pixmap(
            to_i32(offset.x),
            to_i32(offset.y),
            source.pixmap.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
    }

    fn pixel(&self, at: PixelPoint) -> Option<Rgb> {
        let x = u32::try_from(at.x).ok()?;
        let y = u32::try_from(at.y).ok()?;
        // `Pixmap::pixel` indexes `y * width + x` without checking `x`.
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgb::new(c.red(), c.green(), c.blue()))
    }

    fn xor_rectangle(&mut self, rect: Rect) {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let rect = rect.abs();
        let clamp_x = |v: f64| to_i32(v).clamp(0, to_i32(f64::from(w)) - 1);
        let clamp_y = |v: f64| to_i32(v).clamp(0, to_i32(f64::from(h)) - 1);
        let (x0, x1) = (clamp_x(rect.x0), clamp_x(rect.x1));
        let (y0, y1) = (clamp_y(rect.y0), clamp_y(rect.y1));
        let mut rows = vec![y0];
        if y1 != y0 {
            rows.push(y1);
        }
        for y in rows {
            for x in x0..=x1 {
                self.invert(x.unsigned_abs(), y.unsigned_abs());
            }
        }
        for y in (y0 + 1)..y1 {
            self.invert(x0.unsigned_abs(), y.unsigned_abs());
            if x1 != x0 {
                self.invert(x1.unsigned_abs(), y.unsigned_abs());
            }
        }
    }

    fn encode(&self, format: ImageFormat) -> Result<Vec<u8>, SurfaceError> {
        let codec = match format {
            ImageFormat::Png => {
                return self
                    .pixmap
                    .encode_png()
                    .map_err(|e| SurfaceError::Encode(e.to_string()));
            }
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        };
        let rgb: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue()]
            })
            .collect();
        let img = image::RgbImage::from_raw(self.pixmap.width(), self.pixmap.height(), rgb)
            .ok_or(SurfaceError::NoPixels)?;
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, codec)
            .map_err(|e| SurfaceError::Encode(e.to_string()))?;
        tracing::trace!(?format, bytes = out.get_ref().len(), "encoded surface");
        Ok(out.into_inner())
    }
}

fn stroke_for(pen: &Pen) -> Stroke {
    let width = to_f32(pen.width.max(0.0));
    let mut stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    let intervals = pen.style.dash_intervals();
    if !intervals.is_empty() {
        let unit = width.max(1.0);
        stroke.dash = StrokeDash::new(intervals.iter().map(|i| i * unit).collect(), 0.0);
    }
    stroke
}

fn polyline(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    if closed {
        path.close_path();
    }
    path
}

fn to_skia_path(path: &BezPath, offset: Vec2) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    let pt = |p: Point| {
        let p = p + offset;
        (to_f32(p.x), to_f32(p.y))
    };
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                let (x, y) = pt(p);
                pb.move_to(x, y);
            }
            PathEl::LineTo(p) => {
                let (x, y) = pt(p);
                pb.line_to(x, y);
            }
            PathEl::QuadTo(c, p) => {
                let ((cx, cy), (x, y)) = (pt(c), pt(p));
                pb.quad_to(cx, cy, x, y);
            }
            PathEl::CurveTo(c1, c2, p) => {
                let ((ax, ay), (bx, by), (x, y)) = (pt(c1), pt(c2), pt(p));
                pb.cubic_to(ax, ay, bx, by, x, y);
            }
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn hatch_tile(brush: &Brush) -> Option<Pixmap> {
    if !brush.style.is_hatch() {
        return None;
    }
    let mut tile = Pixmap::new(HATCH_TILE, HATCH_TILE)?;
    let c = brush.color.to_rgba8();
    let ink = ColorU8::from_rgba(c.r, c.g, c.b, c.a).premultiply();
    let side = HATCH_TILE as usize;
    let last = side - 1;
    for (i, px) in tile.pixels_mut().iter_mut().enumerate() {
        let (x, y) = (i % side, i / side);
        let on = match brush.style {
            FillStyle::BiDiagonalHatch => x + y == last,
            FillStyle::FDiagonalHatch => x == y,
            FillStyle::CrossDiagHatch => x == y || x + y == last,
            FillStyle::CrossHatch => x == 0 || y == 0,
            FillStyle::HorizontalHatch => y == 0,
            FillStyle::VerticalHatch => x == 0,
            FillStyle::Solid | FillStyle::Transparent => false,
        };
        if on {
            *px = ink;
        }
    }
    Some(tile)
}

fn raster_to_pixmap(raster: &Raster) -> Option<Pixmap> {
    let mut image = Pixmap::new(raster.width(), raster.height())?;
    for (dst, src) in image
        .pixels_mut()
        .iter_mut()
        .zip(raster.data().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Some(image)
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "tiny-skia geometry is f32; pixel-space values fit comfortably"
)]
fn to_f32(v: f64) -> f32 {
    v as f32
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "pixel offsets are rounded and saturate at the i32 range"
)]
fn to_i32(v: f64) -> i32 {
    v.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface(w: u32, h: u32, anti_alias: bool) -> PixmapSurface {
        let mut s =
            PixmapSurface::new(PixelSize::new(w, h), anti_alias, FixedMetrics::default()).unwrap();
        s.clear(Rgb::BLACK.to_color());
        s
    }

    #[test]
    fn zero_size_is_rejected() {
        assert!(matches!(
            PixmapSurface::new(PixelSize::new(0, 4), true, FixedMetrics::default()),
            Err(SurfaceError::InvalidSize { width: 0, height: 4 })
        ));
    }

    #[test]
    fn hit_surface_reads_back_exact_colour() {
        let mut backend = PixmapBackend::default();
        for rgb in [Rgb::new(0, 0, 1), Rgb::new(17, 200, 3), Rgb::new(255, 255, 254)] {
            assert!(backend.reproduces_color(rgb), "{rgb} should round-trip");
        }
    }

    #[test]
    fn filled_rectangle_covers_its_pixels() {
        let mut s = surface(10, 10, false);
        let red = Rgb::new(200, 0, 0);
        s.draw_rectangle(
            Rect::new(2.0, 2.0, 6.0, 6.0),
            &Pen::transparent(),
            &Brush::solid(red.to_color()),
        );
        assert_eq!(s.pixel(PixelPoint::new(2, 2)), Some(red));
        assert_eq!(s.pixel(PixelPoint::new(5, 5)), Some(red));
        assert_eq!(s.pixel(PixelPoint::new(6, 6)), Some(Rgb::BLACK));
        assert_eq!(s.pixel(PixelPoint::new(-1, 0)), None);
        assert_eq!(s.pixel(PixelPoint::new(10, 0)), None);
        assert_eq!(s.pixel(PixelPoint::new(10, 2)), None);
        assert_eq!(s.pixel(PixelPoint::new(2, 10)), None);
    }

    #[test]
    fn line_is_centred_on_pixels() {
        let mut s = surface(10, 10, false);
        let green = Rgb::new(0, 180, 0);
        s.draw_lines(
            &[Point::new(1.0, 4.0), Point::new(8.0, 4.0)],
            &Pen::new(green.to_color(), 1.0),
        );
        assert_eq!(s.pixel(PixelPoint::new(4, 4)), Some(green));
        assert_eq!(s.pixel(PixelPoint::new(4, 6)), Some(Rgb::BLACK));
    }

    #[test]
    fn xor_twice_restores() {
        let mut s = surface(8, 8, true);
        s.clear(Rgb::new(10, 20, 30).to_color());
        let r = Rect::new(1.0, 1.0, 6.0, 5.0);
        s.xor_rectangle(r);
        assert_eq!(s.pixel(PixelPoint::new(1, 1)), Some(Rgb::new(245, 235, 225)));
        assert_eq!(s.pixel(PixelPoint::new(6, 3)), Some(Rgb::new(245, 235, 225)));
        assert_eq!(s.pixel(PixelPoint::new(3, 3)), Some(Rgb::new(10, 20, 30)));
        s.xor_rectangle(r);
        assert_eq!(s.pixel(PixelPoint::new(1, 1)), Some(Rgb::new(10, 20, 30)));
        assert_eq!(s.pixel(PixelPoint::new(6, 5)), Some(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn blit_shifts_content() {
        let mut src = surface(6, 6, false);
        let blue = Rgb::new(0, 0, 220);
        src.draw_rectangle(
            Rect::new(0.0, 0.0, 2.0, 2.0),
            &Pen::transparent(),
            &Brush::solid(blue.to_color()),
        );
        let mut dst = surface(6, 6, false);
        dst.blit_from(&src, Vec2::new(3.0, 2.0));
        assert_eq!(dst.pixel(PixelPoint::new(3, 2)), Some(blue));
        assert_eq!(dst.pixel(PixelPoint::new(0, 0)), Some(Rgb::BLACK));
    }

    #[test]
    fn text_background_fills_extent() {
        let mut s = surface(40, 20, false);
        let bg = Rgb::new(90, 90, 90);
        let font = Font::new(10.0);
        let white = Rgb::new(255, 255, 255);
        s.draw_text(
            "ab",
            Point::new(0.0, 0.0),
            &font,
            white.to_color(),
            Some(bg.to_color()),
        );
        // Glyph advance is 6px, line height 12px: the top row is background.
        assert_eq!(s.pixel(PixelPoint::new(0, 0)), Some(bg));
        assert_eq!(s.pixel(PixelPoint::new(11, 11)), Some(bg));
        assert_eq!(s.pixel(PixelPoint::new(12, 0)), Some(Rgb::BLACK));
        assert_eq!(s.pixel(PixelPoint::new(3, 6)), Some(white));
    }

    #[test]
    fn scaled_bitmap_fills_target() {
        let mut s = surface(8, 8, false);
        let raster = Raster::filled(2, 2, Rgb::new(7, 77, 177).to_color()).unwrap();
        s.draw_scaled_bitmap(&raster, Rect::new(2.0, 2.0, 6.0, 6.0));
        assert_eq!(s.pixel(PixelPoint::new(2, 2)), Some(Rgb::new(7, 77, 177)));
        assert_eq!(s.pixel(PixelPoint::new(5, 5)), Some(Rgb::new(7, 77, 177)));
        assert_eq!(s.pixel(PixelPoint::new(7, 7)), Some(Rgb::BLACK));
    }

    #[test]
    fn png_export_has_signature() {
        let s = surface(3, 3, true);
        let bytes = s.encode(ImageFormat::Png).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn opaque_formats_export_without_alpha() {
        let mut s = surface(4, 4, true);
        s.clear(Rgb::new(40, 80, 120).to_color());
        let jpeg = s.encode(ImageFormat::Jpeg).unwrap();
        assert_eq!(&jpeg[..2], &[0xff, 0xd8]);
        let bmp = s.encode(ImageFormat::Bmp).unwrap();
        assert_eq!(&bmp[..2], b"BM");
    }
}
