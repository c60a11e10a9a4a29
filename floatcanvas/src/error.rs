// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floatcanvas_surface::SurfaceError;
use floatcanvas_view::ProjectionError;
use thiserror::Error;

use crate::ObjectId;

/// Errors raised by canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Every hit-test colour the backend can reproduce is in use.
    #[error("no hit-test colours left: every reproducible colour is in use")]
    HitColorsExhausted,
    /// The handle does not name a live object on this canvas.
    #[error("object {0:?} is not on this canvas")]
    UnknownObject(ObjectId),
    /// A text anchor other than the nine two-letter positions.
    #[error("invalid text anchor {0:?}: expected one of tl, tc, tr, cl, cc, cr, bl, bc, br")]
    InvalidAnchor(String),
    /// The projection was rejected.
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// A surface could not be created, drawn or encoded.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
