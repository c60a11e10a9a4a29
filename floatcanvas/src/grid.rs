// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-wide overlays drawn under or over the objects.

use core::fmt;

use floatcanvas_surface::{Brush, Pen, Surface};
use floatcanvas_view::ViewTransform;
use kurbo::{Point, Vec2};
use peniko::Color;

/// Closest two grid points may sit on screen before the grid is skipped.
const MIN_PIXEL_SPACING: f64 = 1.0;

/// Something drawn across the whole viewport on every draw.
///
/// Install one with [`Canvas::set_grid_under`](crate::Canvas::set_grid_under)
/// or [`Canvas::set_grid_over`](crate::Canvas::set_grid_over).
pub trait Grid: fmt::Debug {
    /// Draws the grid for the current view. `surface` is the size of the
    /// panel.
    fn draw(&self, surface: &mut dyn Surface, view: &ViewTransform);
}

/// Dots, or small crosses, at a regular world spacing.
#[derive(Clone, Debug, PartialEq)]
pub struct DotGrid {
    /// World distance between grid points along each axis.
    pub spacing: Vec2,
    /// Dot diameter, or cross arm length, in pixels.
    pub size: f64,
    /// Marker colour.
    pub color: Color,
    /// Draw crosses instead of dots.
    pub cross: bool,
    /// Line width of crosses.
    pub cross_thickness: f64,
}

impl DotGrid {
    /// Two pixel black dots every `spacing` world units.
    pub fn new(spacing: Vec2) -> Self {
        Self {
            spacing,
            size: 2.0,
            color: Color::BLACK,
            cross: false,
            cross_thickness: 1.0,
        }
    }

    /// Sets the marker size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the marker colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Draws crosses of `thickness` instead of dots.
    pub fn with_cross(mut self, thickness: f64) -> Self {
        self.cross = true;
        self.cross_thickness = thickness;
        self
    }

    /// World positions of every grid point covering the viewport, one
    /// spacing past each edge.
    ///
    /// Empty when the points would sit closer than one pixel apart.
    pub fn points(&self, view: &ViewTransform) -> Vec<Point> {
        let Vec2 { x: sx, y: sy } = self.spacing;
        if !(sx > 0.0 && sy > 0.0) {
            return Vec::new();
        }
        let on_screen = view.scale_world_to_pixel(self.spacing);
        if !(on_screen.x.abs() >= MIN_PIXEL_SPACING && on_screen.y.abs() >= MIN_PIXEL_SPACING) {
            tracing::trace!(?on_screen, "grid spacing below one pixel, skipped");
            return Vec::new();
        }
        let bb = view.viewport_bbox();
        let (Some(min), Some(max)) = (bb.min(), bb.max()) else {
            return Vec::new();
        };
        let (x0, y0) = ((min.x / sx).floor() * sx, (min.y / sy).floor() * sy);
        let (x1, y1) = ((max.x / sx).ceil() * sx, (max.y / sy).ceil() * sy);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "spacing of at least a pixel bounds the steps by the panel size"
        )]
        let steps = |lo: f64, hi: f64, s: f64| ((hi - lo) / s).round() as usize + 1;
        let (nx, ny) = (steps(x0, x1, sx), steps(y0, y1, sy));
        let Some(count) = nx.checked_mul(ny) else {
            return Vec::new();
        };
        let mut points = Vec::with_capacity(count);
        for j in 0..ny {
            for i in 0..nx {
                points.push(Point::new(x0 + i as f64 * sx, y0 + j as f64 * sy));
            }
        }
        points
    }
}

impl Grid for DotGrid {
    fn draw(&self, surface: &mut dyn Surface, view: &ViewTransform) {
        let pixels: Vec<Point> = view
            .world_to_pixel_batch(&self.points(view))
            .into_iter()
            .map(|p| p.to_point())
            .collect();
        tracing::trace!(count = pixels.len(), "drawing dot grid");
        let pen = Pen::new(self.color, self.cross_thickness);
        if self.cross {
            let s = self.size;
            for p in &pixels {
                surface.draw_lines(&[*p + Vec2::new(s, 0.0), *p + Vec2::new(-s, 0.0)], &pen);
                surface.draw_lines(&[*p + Vec2::new(0.0, s), *p + Vec2::new(0.0, -s)], &pen);
            }
        } else if self.size <= 1.0 {
            surface.draw_points(&pixels, &pen);
        } else if self.size <= 2.0 {
            for offset in [
                Vec2::new(0.0, -1.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(-1.0, 0.0),
            ] {
                let shifted: Vec<Point> = pixels.iter().map(|p| *p + offset).collect();
                surface.draw_points(&shifted, &pen);
            }
        } else {
            let radius = (self.size / 2.0).round();
            let brush = Brush::solid(self.color);
            for p in pixels {
                surface.draw_circle(p, radius, &pen, &brush);
            }
        }
    }
}
