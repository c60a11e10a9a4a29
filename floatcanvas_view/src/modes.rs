// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

use crate::PixelPoint;

/// Unit in which a pan shift is expressed.
///
/// Consulted by [`crate::ViewTransform::move_by`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordSpace {
    /// Fractions of the panel size; `(1.0, 0.0)` moves the image one full
    /// panel width to the right.
    Panel,
    /// Device pixels; positive X moves the viewport right, positive Y moves it
    /// down the screen.
    Pixel,
    /// World units, applied directly to the viewport centre.
    World,
}

/// What stays fixed when the scale changes.
///
/// Consulted by [`crate::ViewTransform::zoom`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomAnchor {
    /// Keep the current viewport centre.
    ViewportCenter,
    /// Move the viewport centre to this world point.
    RecenterWorld(Point),
    /// Move the viewport centre to the world point currently under this pixel.
    RecenterPixel(PixelPoint),
    /// Keep the world point under this pixel under the same pixel after
    /// zooming, as with mouse‑wheel zoom.
    KeepPixel(PixelPoint),
}
