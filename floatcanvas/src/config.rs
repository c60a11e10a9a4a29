// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use floatcanvas_view::Projection;
use peniko::Color;

/// Construction-time settings of a [`Canvas`](crate::Canvas).
///
/// ```rust
/// use core::time::Duration;
/// use floatcanvas::CanvasConfig;
///
/// let config = CanvasConfig::default()
///     .with_blit_interval(100)
///     .with_resize_debounce(Duration::from_millis(20));
/// assert_eq!(config.blit_interval, 100);
/// ```
#[derive(Clone, Debug)]
pub struct CanvasConfig {
    /// Colour the background buffer is cleared to.
    pub background: Color,
    /// Number of objects drawn between partial blits to the screen during a
    /// background redraw.
    pub blit_interval: usize,
    /// Delay between a resize and the buffer rebuild.
    pub resize_debounce: Duration,
    /// Delay between the last pan step and the full redraw.
    pub pan_redraw_delay: Duration,
    /// Smallest allowed scale.
    pub min_scale: Option<f64>,
    /// Largest allowed scale.
    pub max_scale: Option<f64>,
    /// Projection applied to the world axes.
    pub projection: Projection,
    /// Smallest pen width used in the hit pass.
    pub min_hit_line_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            blit_interval: 500,
            resize_debounce: Duration::from_millis(50),
            pan_redraw_delay: Duration::from_millis(30),
            min_scale: None,
            max_scale: None,
            projection: Projection::Identity,
            min_hit_line_width: 3.0,
        }
    }
}

impl CanvasConfig {
    /// Sets the background colour.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Sets how many objects are drawn between partial blits. Zero is
    /// treated as one.
    #[must_use]
    pub fn with_blit_interval(mut self, blit_interval: usize) -> Self {
        self.blit_interval = blit_interval.max(1);
        self
    }

    /// Sets the resize debounce delay.
    #[must_use]
    pub fn with_resize_debounce(mut self, delay: Duration) -> Self {
        self.resize_debounce = delay;
        self
    }

    /// Sets the delay before a full redraw after panning.
    #[must_use]
    pub fn with_pan_redraw_delay(mut self, delay: Duration) -> Self {
        self.pan_redraw_delay = delay;
        self
    }

    /// Sets the scale limits.
    #[must_use]
    pub fn with_scale_limits(mut self, min_scale: Option<f64>, max_scale: Option<f64>) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Sets the projection.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Sets the minimum hit-pass pen width.
    #[must_use]
    pub fn with_min_hit_line_width(mut self, width: f64) -> Self {
        self.min_hit_line_width = width;
        self
    }
}
