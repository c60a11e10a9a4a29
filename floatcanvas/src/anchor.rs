// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::str::FromStr;

use kurbo::{Point, Size};

use crate::CanvasError;

/// Which point of a text or image block sits on the object's anchor
/// coordinate.
///
/// Parsed from the two-letter codes `tl` … `br`: the first letter picks the
/// row (top, centre, bottom), the second the column (left, centre, right).
///
/// ```rust
/// use floatcanvas::TextAnchor;
///
/// let anchor: TextAnchor = "cc".parse().unwrap();
/// assert_eq!(anchor, TextAnchor::Center);
/// assert!("xx".parse::<TextAnchor>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `tl`
    #[default]
    TopLeft,
    /// `tc`
    TopCenter,
    /// `tr`
    TopRight,
    /// `cl`
    CenterLeft,
    /// `cc`
    Center,
    /// `cr`
    CenterRight,
    /// `bl`
    BottomLeft,
    /// `bc`
    BottomCenter,
    /// `br`
    BottomRight,
}

/// Axis direction of the space an anchor shift is computed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Axis {
    /// Pixel space, Y down.
    Down,
    /// World space, Y up.
    Up,
}

impl TextAnchor {
    /// All anchors in row-major order.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// The two-letter code.
    pub fn code(self) -> &'static str {
        match self {
            Self::TopLeft => "tl",
            Self::TopCenter => "tc",
            Self::TopRight => "tr",
            Self::CenterLeft => "cl",
            Self::Center => "cc",
            Self::CenterRight => "cr",
            Self::BottomLeft => "bl",
            Self::BottomCenter => "bc",
            Self::BottomRight => "br",
        }
    }

    /// Moves `xy` from the anchor to the block's top-left corner.
    ///
    /// The left column is pushed in by `pad`, the right column pulled back
    /// by `pad`; the top and bottom rows likewise. In world space the top
    /// edge is the larger Y.
    pub(crate) fn shift(self, xy: Point, size: Size, pad: f64, axis: Axis) -> Point {
        let (w, h) = (size.width, size.height);
        let world = match axis {
            Axis::Down => 0.0,
            Axis::Up => 1.0,
        };
        let x = match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => xy.x + pad,
            Self::TopCenter | Self::Center | Self::BottomCenter => xy.x - w / 2.0,
            Self::TopRight | Self::CenterRight | Self::BottomRight => xy.x - w - pad,
        };
        let y = match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => xy.y + pad - 2.0 * world * pad,
            Self::CenterLeft | Self::Center | Self::CenterRight => xy.y - h / 2.0 + world * h,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => {
                xy.y - h + 2.0 * world * h - pad + world * 2.0 * pad
            }
        };
        Point::new(x, y)
    }
}

impl FromStr for TextAnchor {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.code() == s)
            .ok_or_else(|| CanvasError::InvalidAnchor(s.to_owned()))
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
