// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FloatCanvas: a zoomable, pannable canvas of 2D objects with colour-keyed
//! hit testing.
//!
//! A [`Canvas`] owns a list of [`DrawObject`]s placed in floating-point world
//! coordinates, a [`ViewTransform`](floatcanvas_view::ViewTransform) that maps
//! them onto the panel, and the off-screen buffers they are painted into.
//! Drawing goes through a [`Backend`](floatcanvas_surface::Backend), so the
//! same canvas runs headless on a pixmap, under a recorder in tests, or on
//! top of a windowing toolkit.
//!
//! ## Tiers
//!
//! Objects live in the background tier unless moved to the foreground.
//! Background objects are cached in a buffer that is repainted only when
//! one of them changes or the view moves; foreground objects are repainted
//! over that cache on every draw.
//!
//! ## Hit testing
//!
//! [`Canvas::bind`] attaches a callback to an object for one
//! [`HitEventKind`]. Bound objects are painted a second time into a hit
//! buffer in a colour unique to them, so finding the object under the
//! pointer is a single pixel read. Callbacks may edit the object they are
//! given; the canvas re-measures and redraws it.
//!
//! ## Interaction
//!
//! The host forwards input with [`Canvas::handle_pointer`] and
//! [`Canvas::handle_key`]. The active [`GuiMode`] decides what it does:
//! hit testing in [`MouseMode`], panning in [`PanMode`], zooming in
//! [`ZoomInMode`] and [`ZoomOutMode`], or box selection in
//! [`RubberBandMode`]. Input no mode or callback consumes is raised back to
//! the host as [`CanvasEvent`]s.
//!
//! ```rust
//! use floatcanvas::{Canvas, CanvasConfig, CanvasEvent, DrawObject, PointerEvent, PointerKind};
//! use floatcanvas_surface::RecordingBackend;
//! use floatcanvas_view::{PixelPoint, PixelSize};
//! use kurbo::{Point, Vec2};
//!
//! let mut canvas =
//!     Canvas::new(RecordingBackend::default(), PixelSize::new(400, 300), CanvasConfig::default())?;
//! canvas.add_object(DrawObject::circle(Point::new(0.0, 0.0), 10.0));
//! canvas.add_object(DrawObject::rectangle(Point::new(20.0, 20.0), Vec2::new(30.0, 10.0)));
//! canvas.zoom_to_bb(None, true)?;
//!
//! canvas.handle_pointer(&PointerEvent::new(PointerKind::Move, PixelPoint::new(200, 150)))?;
//! let events = canvas.take_events();
//! assert!(matches!(events[..], [CanvasEvent::Pointer { kind: PointerKind::Move, .. }]));
//! # Ok::<(), floatcanvas::CanvasError>(())
//! ```

mod anchor;
mod canvas;
mod config;
mod draw_list;
mod error;
mod events;
mod grid;
mod hit;
mod modes;
mod object;
mod paint;
mod shapes;

pub use anchor::TextAnchor;
pub use canvas::{Canvas, DrawStats};
pub use config::CanvasConfig;
pub use draw_list::{DrawList, ObjectId};
pub use error::CanvasError;
pub use events::{
    CanvasEvent, Cursor, KeyEvent, KeyState, Modifiers, MouseButtons, PointerButton, PointerEvent,
    PointerKind,
};
pub use grid::{DotGrid, Grid};
pub use hit::{HitCallback, HitColorGenerator, HitEvent, HitEventKind, HitIndex};
pub use modes::{GuiMode, MouseMode, PanMode, RubberBandMode, ZoomInMode, ZoomOutMode};
pub use object::{DrawObject, HitStyle, PaintStyle, SizePolicy, Tier};
pub use shapes::{
    Alignment, Arrow, ArrowLine, Bitmap, PieChart, PointSet, ScaledBitmap, ScaledText,
    ScaledTextBox, Shape, Text,
};
