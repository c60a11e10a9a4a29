// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::Font;

/// Measures text for layout.
pub trait TextMeasure {
    /// Width and height of a single line of `text` in pixels.
    fn text_extent(&self, text: &str, font: &Font) -> Size;
}

/// Deterministic metrics: every glyph advances by the same whole number of
/// pixels, and line height is a fixed multiple of the font size.
///
/// Advances are rounded per font size, so widths do not scale exactly
/// linearly with the size. Scaled text layout has to tolerate that drift.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMetrics {
    /// Glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Line height as a fraction of the font size.
    pub height_ratio: f64,
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            height_ratio: 1.2,
        }
    }
}

impl FixedMetrics {
    /// Whole-pixel advance of one glyph.
    pub fn advance(&self, font: &Font) -> f64 {
        (font.size * self.advance_ratio).round().max(1.0)
    }

    /// Whole-pixel line height.
    pub fn line_height(&self, font: &Font) -> f64 {
        (font.size * self.height_ratio).round().max(1.0)
    }
}

impl TextMeasure for FixedMetrics {
    fn text_extent(&self, text: &str, font: &Font) -> Size {
        #[allow(
            clippy::cast_precision_loss,
            reason = "glyph counts are far below 2^52"
        )]
        let glyphs = text.chars().count() as f64;
        Size::new(glyphs * self.advance(font), self.line_height(font))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_counts_glyphs() {
        let m = FixedMetrics::default();
        let size = m.text_extent("hello", &Font::new(10.0));
        assert_eq!(size, Size::new(30.0, 12.0));
        assert_eq!(m.text_extent("", &Font::new(10.0)).width, 0.0);
    }

    #[test]
    fn advances_are_whole_pixels() {
        let m = FixedMetrics::default();
        assert_eq!(m.advance(&Font::new(11.0)), 7.0);
        assert_eq!(m.advance(&Font::new(0.1)), 1.0);
    }
}
