// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floatcanvas_surface::{Font, FontFamily, Surface, TextMeasure};
use floatcanvas_view::BBox;
use kurbo::{Point, Rect, Size, Vec2};
use peniko::Color;

use crate::anchor::{Axis, TextAnchor};
use crate::object::SizePolicy;
use crate::paint::{Look, PaintCtx};

/// Pixel size of [`Text`] unless set otherwise.
const DEFAULT_TEXT_SIZE: f64 = 14.0;
/// Font size [`ScaledText`] is measured at for its bounding box.
const MEASURE_SIZE: f64 = 40.0;
/// Font size [`ScaledTextBox`] is laid out at.
const LAYOUT_SIZE: f64 = 16.0;
/// Largest pixel font size scaled text is drawn at.
const MAX_FONT_SIZE: f64 = 1000.0;

fn default_font(size: f64) -> Font {
    Font {
        family: FontFamily::Modern,
        ..Font::new(size)
    }
}

/// Pixel font size of a world text size, or `None` when too small to draw.
fn scaled_font_size(ctx: &PaintCtx<'_>, size: f64, policy: &SizePolicy) -> Option<f64> {
    let px = ctx
        .len_px(Vec2::new(size, size))
        .y
        .abs()
        .clamp(policy.min_pixels, MAX_FONT_SIZE.max(policy.min_pixels));
    (!(policy.disappear_when_small && px <= policy.min_pixels)).then_some(px)
}

/// A block `size` anchored at world `xy`, as a world box.
fn anchored_box(anchor: TextAnchor, xy: Point, size: Size) -> BBox {
    let top_left = anchor.shift(xy, size, 0.0, Axis::Up);
    BBox::new(
        Point::new(top_left.x, top_left.y - size.height),
        Point::new(top_left.x + size.width, top_left.y),
    )
}

/// A single line of text with a fixed pixel size.
///
/// Its bounding box is the anchor point; the extent is measured when drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    /// The string.
    pub text: String,
    /// Anchor point.
    pub xy: Point,
    /// Which point of the text sits on `xy`.
    pub anchor: TextAnchor,
    /// Font, with the size in pixels.
    pub font: Font,
    /// Glyph colour.
    pub color: Color,
    /// Filled behind the glyphs when set.
    pub background: Option<Color>,
}

impl Text {
    /// Black 14 pixel text, anchored top-left.
    pub fn new(text: impl Into<String>, xy: Point) -> Self {
        Self {
            text: text.into(),
            xy,
            anchor: TextAnchor::TopLeft,
            font: default_font(DEFAULT_TEXT_SIZE),
            color: Color::BLACK,
            background: None,
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the font.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the background colour.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        let extent = surface.text_extent(&self.text, &self.font);
        let origin = self
            .anchor
            .shift(ctx.px(self.xy), extent, 0.0, Axis::Down);
        if look.hit {
            let rect = Rect::from_origin_size(origin, extent);
            surface.draw_rectangle(rect, &look.pen, &look.brush);
        } else {
            surface.draw_text(&self.text, origin, &self.font, self.color, self.background);
        }
    }
}

/// A single line of text whose size is in world units.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledText {
    /// The string.
    pub text: String,
    /// Anchor point.
    pub xy: Point,
    /// Font height in world units.
    pub size: f64,
    /// Which point of the text sits on `xy`.
    pub anchor: TextAnchor,
    /// Font attributes. The size is replaced when drawing.
    pub font: Font,
    /// Glyph colour.
    pub color: Color,
    /// Filled behind the glyphs when set.
    pub background: Option<Color>,
    extent: Size,
}

impl ScaledText {
    /// Black text anchored top-left.
    pub fn new(text: impl Into<String>, xy: Point, size: f64) -> Self {
        Self {
            text: text.into(),
            xy,
            size,
            anchor: TextAnchor::TopLeft,
            font: default_font(size),
            color: Color::BLACK,
            background: None,
            extent: Size::ZERO,
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the font attributes.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// Sets the background colour.
    #[must_use]
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = Some(background);
        self
    }

    /// World extent from the last layout. Fonts do not scale linearly, so
    /// this is measured at a fixed size and scaled.
    pub fn extent(&self) -> Size {
        self.extent
    }

    pub(super) fn layout(&mut self, metrics: &dyn TextMeasure) {
        let measured = metrics.text_extent(&self.text, &self.font.with_size(MEASURE_SIZE));
        self.extent = measured * (self.size / MEASURE_SIZE);
    }

    pub(super) fn bounding_box(&self) -> BBox {
        anchored_box(self.anchor, self.xy, self.extent)
    }

    pub(crate) fn paint<S: Surface>(
        &self,
        surface: &mut S,
        ctx: &PaintCtx<'_>,
        look: &Look,
        policy: &SizePolicy,
    ) {
        let Some(px) = scaled_font_size(ctx, self.size, policy) else {
            return;
        };
        let font = self.font.with_size(px);
        let extent = surface.text_extent(&self.text, &font);
        let origin = self
            .anchor
            .shift(ctx.px(self.xy), extent, 0.0, Axis::Down);
        if look.hit {
            let rect = Rect::from_origin_size(origin, extent);
            surface.draw_rectangle(rect, &look.pen, &look.brush);
        } else {
            surface.draw_text(&self.text, origin, &font, self.color, self.background);
        }
    }
}

/// Horizontal placement of lines inside a [`ScaledTextBox`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Flush with the left padding.
    #[default]
    Left,
    /// Centred in the box.
    Center,
    /// Flush with the right padding.
    Right,
}

/// Word positions of a laid-out text box, relative to its top-left corner.
#[derive(Clone, Debug, Default, PartialEq)]
struct BoxLayout {
    words: Vec<String>,
    offsets: Vec<Vec2>,
    size: Size,
}

/// Multi-line, optionally wrapped text inside a padded box, sized in world
/// units.
///
/// Word positions are laid out once at a reference font size and scaled, so
/// the layout stays put in world space while the glyphs themselves drift
/// slightly with zoom. The box outline and background come from the owning
/// object's line and fill style.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledTextBox {
    /// The string. `\n` starts a new line.
    pub text: String,
    /// Anchor point.
    pub xy: Point,
    /// Font height in world units.
    pub size: f64,
    /// Which point of the box sits on `xy`.
    pub anchor: TextAnchor,
    /// Line placement.
    pub alignment: Alignment,
    /// Font attributes. The size is replaced when drawing.
    pub font: Font,
    /// Glyph colour.
    pub color: Color,
    /// Box width in world units; lines are wrapped to fit when set.
    pub width: Option<f64>,
    /// Padding in world units; a tenth of `size` when unset.
    pub pad: Option<f64>,
    /// Line height as a multiple of the font's.
    pub line_spacing: f64,
    layout: BoxLayout,
}

impl ScaledTextBox {
    /// Black, left-aligned, unwrapped text anchored top-left.
    pub fn new(text: impl Into<String>, xy: Point, size: f64) -> Self {
        Self {
            text: text.into(),
            xy,
            size,
            anchor: TextAnchor::TopLeft,
            alignment: Alignment::Left,
            font: default_font(size),
            color: Color::BLACK,
            width: None,
            pad: None,
            line_spacing: 1.0,
            layout: BoxLayout::default(),
        }
    }

    /// Sets the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the alignment.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Wraps to a fixed world width.
    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Sets the padding.
    #[must_use]
    pub fn with_pad(mut self, pad: f64) -> Self {
        self.pad = Some(pad);
        self
    }

    /// Sets the line spacing.
    #[must_use]
    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Sets the font attributes.
    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    /// The padding in effect.
    pub fn pad_size(&self) -> f64 {
        self.pad.unwrap_or(self.size / 10.0)
    }

    /// Box size in world units from the last layout.
    pub fn box_size(&self) -> Size {
        self.layout.size
    }

    /// Laid-out words with their world top-left corners.
    pub fn words(&self) -> impl Iterator<Item = (&str, Point)> + '_ {
        let top_left = self.top_left();
        self.layout
            .words
            .iter()
            .zip(&self.layout.offsets)
            .map(move |(w, o)| (w.as_str(), top_left + *o))
    }

    fn top_left(&self) -> Point {
        match self.bounding_box().rect() {
            Some(r) => Point::new(r.x0, r.y1),
            None => self.xy,
        }
    }

    fn wrap(&self, lines: Vec<String>, metrics: &dyn TextMeasure, font: &Font) -> Vec<String> {
        let Some(width) = self.width else {
            return lines;
        };
        let limit = (width - 2.0 * self.pad_size()) / (self.size / LAYOUT_SIZE);
        let measure = |s: &str| metrics.text_extent(s, font).width;
        let mut out = Vec::new();
        for line in lines {
            let mut words = line.split(' ');
            let mut current = words.next().unwrap_or_default().to_owned();
            let mut len = measure(&current);
            for word in words {
                let spaced = format!(" {word}");
                if len + measure(&spaced) <= limit {
                    current.push_str(&spaced);
                    len = measure(&current);
                } else {
                    out.push(core::mem::replace(&mut current, word.to_owned()));
                    len = measure(word);
                }
            }
            out.push(current);
        }
        out
    }

    pub(super) fn layout(&mut self, metrics: &dyn TextMeasure) {
        let font = self.font.with_size(LAYOUT_SIZE);
        let scale = self.size / LAYOUT_SIZE;
        let pad = self.pad_size();
        let lines = self.text.split('\n').map(str::to_owned).collect();
        let lines = self.wrap(lines, metrics, &font);

        let text_height = metrics.text_extent("X", &font).height;
        let space = metrics.text_extent(" ", &font).width;
        let line_height = text_height * self.line_spacing;

        let mut words = Vec::new();
        let mut rows: Vec<(Vec<Vec2>, f64)> = Vec::new();
        let mut y = 0.0;
        for line in &lines {
            let mut line_width = 0.0;
            let mut offsets = Vec::new();
            for (j, word) in line.split(' ').enumerate() {
                if j > 0 {
                    line_width += space;
                }
                words.push(word.to_owned());
                offsets.push(Vec2::new(line_width, y));
                line_width += metrics.text_extent(word, &font).width;
            }
            y -= line_height;
            rows.push((offsets, line_width));
        }

        let text_width = rows.iter().map(|(_, w)| *w).fold(0.0, f64::max);
        let box_width = self.width.unwrap_or(text_width * scale + 2.0 * pad);
        let mut offsets = Vec::with_capacity(words.len());
        for (row, line_width) in rows {
            let dx = match self.alignment {
                Alignment::Left => pad,
                Alignment::Center => (box_width - line_width * scale) / 2.0,
                Alignment::Right => box_width - line_width * scale - pad,
            };
            offsets.extend(row.into_iter().map(|o| Vec2::new(o.x * scale + dx, o.y * scale)));
        }
        let last_y = offsets.last().map_or(0.0, |o| o.y);
        let box_height = -(last_y - text_height * scale) + 2.0 * pad;
        offsets.iter_mut().for_each(|o| o.y -= pad);

        self.layout = BoxLayout {
            words,
            offsets,
            size: Size::new(box_width, box_height),
        };
    }

    pub(super) fn bounding_box(&self) -> BBox {
        anchored_box(self.anchor, self.xy, self.layout.size)
    }

    pub(crate) fn paint<S: Surface>(
        &self,
        surface: &mut S,
        ctx: &PaintCtx<'_>,
        look: &Look,
        policy: &SizePolicy,
    ) {
        let top_left = self.top_left();
        let origin = ctx.px(top_left);
        let size = ctx.len_px(self.layout.size.to_vec2());
        let rect = Rect::from_origin_size(origin, (size.x.abs(), size.y.abs()));
        if look.hit {
            surface.draw_rectangle(rect, &look.pen, &look.brush);
            return;
        }
        if look.pen.is_visible() || look.brush.is_visible() {
            surface.draw_rectangle(rect, &look.pen, &look.brush);
        }
        let Some(px) = scaled_font_size(ctx, self.size, policy) else {
            return;
        };
        let font = self.font.with_size(px);
        for (word, at) in self.words() {
            surface.draw_text(word, ctx.px(at), &font, self.color, None);
        }
    }
}
