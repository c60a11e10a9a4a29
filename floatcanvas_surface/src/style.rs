// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pens, brushes, fonts and raster images.

use core::fmt;

use floatcanvas_view::PixelSize;
use peniko::Color;

use crate::SurfaceError;

/// Dash pattern of a [`Pen`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// No line at all.
    Transparent,
    /// Dotted line.
    Dot,
    /// Long dashes.
    LongDash,
    /// Short dashes.
    ShortDash,
    /// Alternating dots and dashes.
    DotDash,
}

impl LineStyle {
    /// Dash intervals in multiples of the pen width; empty for solid lines.
    pub fn dash_intervals(self) -> &'static [f32] {
        match self {
            Self::Solid | Self::Transparent => &[],
            Self::Dot => &[1.0, 2.0],
            Self::LongDash => &[8.0, 4.0],
            Self::ShortDash => &[4.0, 4.0],
            Self::DotDash => &[8.0, 3.0, 1.0, 3.0],
        }
    }
}

/// Fill pattern of a [`Brush`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillStyle {
    /// Solid fill.
    #[default]
    Solid,
    /// No fill.
    Transparent,
    /// Diagonal lines in both directions.
    BiDiagonalHatch,
    /// Crossed diagonal lines.
    CrossDiagHatch,
    /// Forward diagonal lines.
    FDiagonalHatch,
    /// Horizontal and vertical lines.
    CrossHatch,
    /// Horizontal lines.
    HorizontalHatch,
    /// Vertical lines.
    VerticalHatch,
}

impl FillStyle {
    /// Returns `true` for the hatched styles.
    pub fn is_hatch(self) -> bool {
        !matches!(self, Self::Solid | Self::Transparent)
    }
}

/// Outline paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Line colour.
    pub color: Color,
    /// Line width in pixels. Zero draws a one-pixel hairline.
    pub width: f64,
    /// Dash pattern.
    pub style: LineStyle,
}

impl Pen {
    /// A solid pen.
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Solid,
        }
    }

    /// A pen that draws nothing.
    pub fn transparent() -> Self {
        Self {
            color: Color::from_rgba8(0, 0, 0, 0),
            width: 0.0,
            style: LineStyle::Transparent,
        }
    }

    /// Returns this pen with another dash pattern.
    pub const fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns `false` if the pen paints nothing.
    pub fn is_visible(&self) -> bool {
        self.style != LineStyle::Transparent
    }
}

/// Interior paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Brush {
    /// Fill colour.
    pub color: Color,
    /// Fill pattern.
    pub style: FillStyle,
}

impl Brush {
    /// A solid brush.
    pub const fn solid(color: Color) -> Self {
        Self {
            color,
            style: FillStyle::Solid,
        }
    }

    /// A brush that fills nothing.
    pub fn transparent() -> Self {
        Self {
            color: Color::from_rgba8(0, 0, 0, 0),
            style: FillStyle::Transparent,
        }
    }

    /// Returns this brush with another fill pattern.
    pub const fn with_style(mut self, style: FillStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns `false` if the brush paints nothing.
    pub fn is_visible(&self) -> bool {
        self.style != FillStyle::Transparent
    }
}

/// Font family class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Platform default.
    #[default]
    Default,
    /// Sans-serif.
    Swiss,
    /// Serif.
    Roman,
    /// Fixed pitch.
    Modern,
    /// Handwriting.
    Script,
    /// Display face.
    Decorative,
    /// Typewriter.
    Teletype,
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    /// Regular.
    #[default]
    Normal,
    /// Light.
    Light,
    /// Bold.
    Bold,
}

/// Font slant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Upright.
    #[default]
    Normal,
    /// Oblique.
    Slant,
    /// Italic.
    Italic,
}

/// A font request. `size` is the em height in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Em height in pixels.
    pub size: f64,
    /// Family class.
    pub family: FontFamily,
    /// Weight.
    pub weight: FontWeight,
    /// Slant.
    pub style: FontStyle,
    /// Draw an underline.
    pub underlined: bool,
    /// Specific face name, if any.
    pub face_name: Option<String>,
}

impl Font {
    /// A regular font of the given pixel size.
    pub fn new(size: f64) -> Self {
        Self {
            size,
            family: FontFamily::Default,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
            underlined: false,
            face_name: None,
        }
    }

    /// Returns the same font at another pixel size.
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }
}

/// Exact 8-bit colour used as a hit-test key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Black, the clear colour of hit-test surfaces.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a colour key.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Opaque paint colour with these components.
    pub fn to_color(self) -> Color {
        Color::from_rgb8(self.r, self.g, self.b)
    }

    /// Quantizes a paint colour, dropping alpha.
    pub fn from_color(color: Color) -> Self {
        let c = color.to_rgba8();
        Self::new(c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A raster image in straight (non-premultiplied) RGBA8, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Raster {
    /// Wraps RGBA8 data, checking its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SurfaceError> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        if data.len() != expected {
            return Err(SurfaceError::RasterData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A raster filled with one colour.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self, SurfaceError> {
        let c = color.to_rgba8();
        let count = width as usize * height as usize;
        let data = [c.r, c.g, c.b, c.a].repeat(count);
        Self::new(width, height, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size in pixels.
    pub fn size(&self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_round_trips_through_paint_colour() {
        let key = Rgb::new(1, 2, 250);
        assert_eq!(Rgb::from_color(key.to_color()), key);
        assert_eq!(key.to_string(), "#0102fa");
    }

    #[test]
    fn raster_checks_length() {
        assert!(Raster::new(2, 2, vec![0; 16]).is_ok());
        assert!(matches!(
            Raster::new(2, 2, vec![0; 15]),
            Err(SurfaceError::RasterData {
                expected: 16,
                actual: 15
            })
        ));
        assert!(matches!(
            Raster::new(0, 3, Vec::new()),
            Err(SurfaceError::InvalidSize { .. })
        ));
    }

    #[test]
    fn filled_raster_repeats_colour() {
        let r = Raster::filled(3, 1, Color::from_rgba8(9, 8, 7, 255)).unwrap();
        assert_eq!(r.data(), &[9, 8, 7, 255, 9, 8, 7, 255, 9, 8, 7, 255]);
    }

    #[test]
    fn transparent_styles_are_invisible() {
        assert!(!Pen::transparent().is_visible());
        assert!(!Brush::transparent().is_visible());
        assert!(Brush::solid(Rgb::new(1, 1, 1).to_color()).is_visible());
        assert!(FillStyle::CrossHatch.is_hatch());
        assert!(!FillStyle::Solid.is_hatch());
        assert!(LineStyle::Solid.dash_intervals().is_empty());
    }
}
