// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `cos`
use kurbo::{Point, Vec2};

/// Latitude clamp for [`Projection::FlatEarth`], in degrees.
const MAX_LATITUDE: f64 = 75.0;

/// Per‑axis world scaling applied on top of the uniform zoom.
///
/// The projection is re‑evaluated whenever the viewport centre changes,
/// which lets the X scale depend on where the view currently is.
#[derive(Clone, Copy, Debug, Default)]
pub enum Projection {
    /// No projection: the vector is `(1, 1)`.
    #[default]
    Identity,
    /// Flat‑earth approximation for `(longitude, latitude)` data: X is scaled
    /// by `cos(latitude)` of the viewport centre, with the latitude clamped to
    /// ±75 degrees.
    FlatEarth,
    /// A fixed ratio between the axes. Build it with [`Projection::fixed`].
    Fixed(Vec2),
    /// A caller supplied function of the viewport centre.
    Custom(fn(Point) -> Vec2),
}

impl Projection {
    /// Creates a fixed projection, rejecting zero, negative, or non‑finite
    /// factors.
    pub fn fixed(sx: f64, sy: f64) -> Result<Self, ProjectionError> {
        let v = Vec2::new(sx, sy);
        validate(v)?;
        Ok(Self::Fixed(v))
    }

    /// Evaluates the projection vector for a viewport centre.
    pub fn vector(&self, center: Point) -> Result<Vec2, ProjectionError> {
        let v = match self {
            Self::Identity => Vec2::new(1.0, 1.0),
            Self::FlatEarth => {
                let lat = center.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
                Vec2::new((lat.to_radians()).cos(), 1.0)
            }
            Self::Fixed(v) => *v,
            Self::Custom(f) => f(center),
        };
        validate(v)?;
        Ok(v)
    }
}

fn validate(v: Vec2) -> Result<(), ProjectionError> {
    if v.x.is_finite() && v.y.is_finite() && v.x > 0.0 && v.y > 0.0 {
        Ok(())
    } else {
        Err(ProjectionError { vector: v })
    }
}

/// Error returned when a projection yields an unusable scaling vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionError {
    /// The offending vector.
    pub vector: Vec2,
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projection vector ({}, {}) must have finite, positive components",
            self.vector.x, self.vector.y
        )
    }
}

impl core::error::Error for ProjectionError {}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::Projection;

    #[test]
    fn identity_is_unit() {
        assert_eq!(
            Projection::Identity.vector(Point::new(3.0, 4.0)).unwrap(),
            Vec2::new(1.0, 1.0)
        );
    }

    #[test]
    fn flat_earth_scales_longitude_and_clamps_latitude() {
        let at_60 = Projection::FlatEarth.vector(Point::new(0.0, 60.0)).unwrap();
        assert!((at_60.x - 0.5).abs() < 1e-12);
        assert_eq!(at_60.y, 1.0);

        let pole = Projection::FlatEarth.vector(Point::new(0.0, 90.0)).unwrap();
        let clamp = Projection::FlatEarth.vector(Point::new(0.0, 75.0)).unwrap();
        assert_eq!(pole, clamp);
        assert!(pole.x > 0.0);
    }

    #[test]
    fn fixed_rejects_bad_factors() {
        assert!(Projection::fixed(2.0, 1.0).is_ok());
        assert!(Projection::fixed(0.0, 1.0).is_err());
        assert!(Projection::fixed(1.0, -1.0).is_err());
        assert!(Projection::fixed(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn custom_results_are_validated() {
        fn broken(_: Point) -> Vec2 {
            Vec2::new(0.0, 1.0)
        }
        fn doubled(c: Point) -> Vec2 {
            Vec2::new(2.0, 1.0 + c.x.abs())
        }
        assert!(Projection::Custom(broken).vector(Point::ORIGIN).is_err());
        assert_eq!(
            Projection::Custom(doubled)
                .vector(Point::new(-1.0, 0.0))
                .unwrap(),
            Vec2::new(2.0, 2.0)
        );
    }
}
