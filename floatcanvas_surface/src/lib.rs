// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FloatCanvas Surface: the drawing interface a canvas paints through.
//!
//! A canvas never talks to a windowing toolkit directly. It asks a
//! [`Backend`] for offscreen [`Surface`]s (visual buffers, hit-test buffers
//! and the visible screen) and issues pixel-space drawing calls on them.
//!
//! Two backends ship with this crate:
//!
//! - [`PixmapBackend`]: a headless raster backend on top of `tiny-skia`.
//!   Visual surfaces are anti-aliased; hit-test surfaces are not, so a colour
//!   painted into them reads back exactly.
//! - [`RecordingBackend`]: records every call as a [`DrawCall`] for tests and
//!   debugging. It does not rasterize.
//!
//! Style values ([`Pen`], [`Brush`], [`Font`]) are plain data, and paint
//! colours are [`peniko::Color`]. Hit-test keys are exact 8-bit [`Rgb`]
//! triples.
//!
//! ## Coordinates
//!
//! All geometry is in device pixels, Y down. An integer coordinate names a
//! pixel; strokes and points are centred on that pixel, fills cover the
//! pixels whose centres fall inside the shape.
//!
//! ## Colour round-trip probe
//!
//! [`Backend::reproduces_color`] answers whether painting a colour into a
//! hit-test surface reads back as the same colour. The default
//! implementation renders a 1x1 swatch with a wide pen on black and reads
//! the pixel back.
//!
//! ```rust
//! use floatcanvas_surface::{Backend, PixmapBackend, Rgb};
//!
//! let mut backend = PixmapBackend::default();
//! assert!(backend.reproduces_color(Rgb::new(0, 0, 1)));
//! ```

mod error;
mod metrics;
mod pixmap;
mod recording;
mod style;
mod surface;

pub use error::SurfaceError;
pub use metrics::{FixedMetrics, TextMeasure};
pub use pixmap::{PixmapBackend, PixmapSurface};
pub use recording::{DrawCall, RecordingBackend, RecordingSurface};
pub use style::{
    Brush, FillStyle, Font, FontFamily, FontStyle, FontWeight, LineStyle, Pen, Raster, Rgb,
};
pub use surface::{Backend, ImageFormat, Surface, probe_swatch, spline_path};
