//! Radius-to-bounding-box conversion for hazard avoidance.
//!
//! Uses a flat-Earth small-angle approximation: one degree of latitude is
//! taken as [`METERS_PER_DEGREE`] metres everywhere, and a degree of
//! longitude shrinks with `cos(latitude)`. Good enough for radii of a few
//! hundred metres; not meant for continental distances.

use geo::{Coord, Rect};
use thiserror::Error;

use crate::Coordinates;

/// Approximate metres per degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Smallest `cos(latitude)` accepted before the longitude span is deemed
/// unbounded. Roughly 0.00006 degrees from either pole.
pub const MIN_LONGITUDE_SCALE: f64 = 1.0e-6;

/// Errors returned by [`avoidance_box`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeofenceError {
    /// Radius was zero, negative or not finite.
    #[error("avoidance radius must be a positive number of metres, got {radius_meters}")]
    InvalidRadius {
        /// Offending radius.
        radius_meters: f64,
    },
    /// Center coordinate was outside WGS84 bounds or not finite.
    #[error("invalid center coordinate ({latitude}, {longitude})")]
    InvalidCoordinate {
        /// Offending latitude.
        latitude: f64,
        /// Offending longitude.
        longitude: f64,
    },
    /// Center sits so close to a pole that the longitude span diverges.
    #[error("latitude {latitude} is too close to a pole to bound longitude")]
    PolarLatitude {
        /// Offending latitude.
        latitude: f64,
    },
}

/// Axis-aligned rectangle a route planner must keep out of.
///
/// Stored as a [`Rect`] with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvoidanceBox {
    rect: Rect<f64>,
}

impl AvoidanceBox {
    /// Build a box from its south-west and north-east corners.
    #[must_use]
    pub fn from_corners(south_west: Coordinates, north_east: Coordinates) -> Self {
        Self {
            rect: Rect::new(Coord::from(south_west), Coord::from(north_east)),
        }
    }

    /// Minimum latitude and longitude corner.
    #[must_use]
    pub fn south_west(&self) -> Coordinates {
        self.rect.min().into()
    }

    /// Maximum latitude and longitude corner.
    #[must_use]
    pub fn north_east(&self) -> Coordinates {
        self.rect.max().into()
    }

    /// Half the latitude span in degrees.
    #[must_use]
    pub fn delta_latitude(&self) -> f64 {
        self.rect.height() / 2.0
    }

    /// Half the longitude span in degrees.
    #[must_use]
    pub fn delta_longitude(&self) -> f64 {
        self.rect.width() / 2.0
    }

    /// Underlying geometry.
    #[must_use]
    pub const fn rect(&self) -> &Rect<f64> {
        &self.rect
    }
}

/// Validate an avoidance radius in metres.
///
/// # Errors
///
/// Returns [`GeofenceError::InvalidRadius`] unless the radius is finite and
/// strictly positive.
pub fn validate_radius(radius_meters: f64) -> Result<(), GeofenceError> {
    if radius_meters.is_finite() && radius_meters > 0.0 {
        Ok(())
    } else {
        Err(GeofenceError::InvalidRadius { radius_meters })
    }
}

/// Compute the box enclosing a circle of `radius_meters` around `center`.
///
/// `deltaLat = r / 111320` and `deltaLon = r / (111320 * cos(lat))`. The box
/// is not wrapped at the antimeridian.
///
/// # Errors
///
/// - [`GeofenceError::InvalidRadius`] for a non-positive or non-finite radius.
/// - [`GeofenceError::InvalidCoordinate`] for a center outside WGS84 bounds.
/// - [`GeofenceError::PolarLatitude`] when `cos(lat)` drops below
///   [`MIN_LONGITUDE_SCALE`].
///
/// # Examples
/// ```
/// use firepath_core::{Coordinates, avoidance_box};
///
/// let bbox = avoidance_box(Coordinates::new(60.0, 0.0), 111_320.0)?;
/// assert!((bbox.delta_latitude() - 1.0).abs() < 1e-9);
/// assert!((bbox.delta_longitude() - 2.0).abs() < 1e-9);
/// # Ok::<(), firepath_core::GeofenceError>(())
/// ```
pub fn avoidance_box(center: Coordinates, radius_meters: f64) -> Result<AvoidanceBox, GeofenceError> {
    validate_radius(radius_meters)?;
    let Coordinates {
        latitude,
        longitude,
    } = center;
    if !latitude.is_finite() || !longitude.is_finite() || latitude.abs() > 90.0 {
        return Err(GeofenceError::InvalidCoordinate {
            latitude,
            longitude,
        });
    }

    let longitude_scale = latitude.to_radians().cos();
    if longitude_scale < MIN_LONGITUDE_SCALE {
        return Err(GeofenceError::PolarLatitude { latitude });
    }

    let delta_lat = radius_meters / METERS_PER_DEGREE;
    let delta_lon = radius_meters / (METERS_PER_DEGREE * longitude_scale);

    Ok(AvoidanceBox::from_corners(
        Coordinates::new(latitude - delta_lat, longitude - delta_lon),
        Coordinates::new(latitude + delta_lat, longitude + delta_lon),
    ))
}
