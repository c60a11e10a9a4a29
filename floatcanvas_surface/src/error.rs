// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors raised by drawing surfaces and backends.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// A surface of this size cannot be allocated.
    #[error("cannot allocate a {width}x{height} surface")]
    InvalidSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
    /// Raster data does not match its declared dimensions.
    #[error("raster data holds {actual} bytes, expected {expected}")]
    RasterData {
        /// Bytes required by `width * height * 4`.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },
    /// The requested image export format is not supported.
    #[error("unsupported image format `{0}`")]
    UnsupportedFormat(String),
    /// The surface holds no pixels to export.
    #[error("surface has no pixel data to export")]
    NoPixels,
    /// Encoding the image failed.
    #[error("image encoding failed: {0}")]
    Encode(String),
    /// Writing the image failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
