// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::f64::consts::PI;

use floatcanvas_surface::Surface;
use kurbo::{Point, Vec2};

use crate::paint::{Look, PaintCtx};

const DEFAULT_HEAD_SIZE: f64 = 8.0;
const DEFAULT_HEAD_ANGLE: f64 = 30.0;

/// Unit arrow-head wings for a shaft pointing along `theta` (radians,
/// Y down), spread by the half angle `phi`.
fn head(theta: f64, phi: f64, size: f64) -> [Vec2; 3] {
    [
        Vec2::new((theta - phi).cos(), -(theta - phi).sin()) * size,
        Vec2::ZERO,
        Vec2::new((theta + phi).cos(), -(theta + phi).sin()) * size,
    ]
}

/// A fixed pixel-length arrow starting at a world point.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    /// Tail of the arrow.
    pub xy: Point,
    /// Shaft length in pixels.
    pub length: f64,
    /// Degrees clockwise from straight up.
    pub direction: f64,
    /// Length of the head wings in pixels.
    pub head_size: f64,
    /// Full opening angle of the head in degrees.
    pub head_angle: f64,
}

impl Arrow {
    /// An arrow with an 8 pixel, 30 degree head.
    pub fn new(xy: Point, length: f64, direction: f64) -> Self {
        Self {
            xy,
            length,
            direction,
            head_size: DEFAULT_HEAD_SIZE,
            head_angle: DEFAULT_HEAD_ANGLE,
        }
    }

    /// Sets the head size and opening angle.
    #[must_use]
    pub fn with_head(mut self, size: f64, angle: f64) -> Self {
        self.head_size = size;
        self.head_angle = angle;
        self
    }

    /// Pixel offsets from the tail: tail, tip, wing, tip, wing.
    pub fn offsets(&self) -> [Vec2; 5] {
        let phi = self.head_angle * PI / 360.0;
        let theta = (270.0 - self.direction) * PI / 180.0;
        let tip = Vec2::new(-self.length * theta.cos(), self.length * theta.sin());
        let [w1, _, w2] = head(theta, phi, self.head_size);
        [Vec2::ZERO, tip, tip + w1, tip, tip + w2]
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        let tail = ctx.px(self.xy);
        let points = self.offsets().map(|v| tail + v);
        surface.draw_lines(&points, &look.pen);
    }
}

/// A polyline with an arrow head at the far end of each segment.
#[derive(Clone, Debug, PartialEq)]
pub struct ArrowLine {
    /// Vertices.
    pub points: Vec<Point>,
    /// Length of the head wings in pixels.
    pub head_size: f64,
    /// Full opening angle of the heads in degrees.
    pub head_angle: f64,
}

impl ArrowLine {
    /// An arrow line with 8 pixel, 30 degree heads.
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            head_size: DEFAULT_HEAD_SIZE,
            head_angle: DEFAULT_HEAD_ANGLE,
        }
    }

    /// Sets the head size and opening angle.
    #[must_use]
    pub fn with_head(mut self, size: f64, angle: f64) -> Self {
        self.head_size = size;
        self.head_angle = angle;
        self
    }

    /// Pixel wing offsets of each head, relative to the segment's end.
    pub fn heads(&self) -> Vec<[Vec2; 3]> {
        let phi = self.head_angle * PI / 360.0;
        self.points
            .windows(2)
            .map(|seg| {
                let d = seg[0] - seg[1];
                head(d.y.atan2(d.x), phi, self.head_size)
            })
            .collect()
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        let points = ctx.px_all(&self.points);
        surface.draw_lines(&points, &look.pen);
        for (end, wings) in points.iter().skip(1).zip(self.heads()) {
            surface.draw_lines(&wings.map(|w| *end + w), &look.pen);
        }
    }
}
