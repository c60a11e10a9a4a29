// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! FloatCanvas View: world/pixel coordinate math for a zoomable canvas.
//!
//! This crate provides the headless coordinate model behind a FloatCanvas:
//! - A [`ViewTransform`] mapping floating‑point, Y‑up **world** coordinates
//!   onto integer, Y‑down **pixel** coordinates of a panel.
//! - Pluggable [`Projection`]s for non‑uniform X/Y scaling (for example the
//!   flat‑earth longitude correction used for geographic data).
//! - A null‑aware axis‑aligned [`BBox`] used for culling and zoom‑to‑fit.
//!
//! It does **not** own any drawable objects or rendering backend. Callers
//! keep their own scene and use [`ViewTransform`] to convert coordinates and
//! to compute the visible world region.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use floatcanvas_view::{BBox, PixelSize, ViewTransform};
//!
//! let mut view = ViewTransform::new(PixelSize::new(800, 600));
//!
//! // Fit some content into the panel.
//! let content = BBox::from_points([Point::new(0.0, 0.0), Point::new(100.0, 50.0)]);
//! view.zoom_to_bbox(&content);
//!
//! // Convert the centre of the content to a pixel and back.
//! let px = view.world_to_pixel(Point::new(50.0, 25.0));
//! assert_eq!((px.x, px.y), (400, 300));
//! let back = view.pixel_to_world(px);
//! assert!((back.x - 50.0).abs() < 1e-9);
//! ```
//!
//! ## Conventions
//!
//! - Pixel coordinates are rounded to the nearest integer everywhere a world
//!   value is converted to a pixel, so `pixel_to_world(world_to_pixel(p))`
//!   is always within half a pixel of `p`.
//! - The world Y axis points up; the pixel Y axis points down. The flip is
//!   folded into [`ViewTransform::transform_vector`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod bbox;
mod modes;
mod pixel;
mod projection;
mod transform;

pub use bbox::BBox;
pub use modes::{CoordSpace, ZoomAnchor};
pub use pixel::{PixelPoint, PixelSize};
pub use projection::{Projection, ProjectionError};
pub use transform::ViewTransform;
