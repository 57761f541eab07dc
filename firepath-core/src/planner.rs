//! Contract for the external route planner.
//!
//! The planner computes an actual road route; this crate only assembles the
//! request (start, end, hazard boxes) and formats the answer.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::{AvoidanceBox, Coordinates, GeofenceError, PoiId, PoiRegistry};

/// Avoidance radius applied around hazards when planning a route.
pub const DEFAULT_AVOIDANCE_RADIUS_METERS: f64 = 15.0;

/// Inputs handed to a [`RoutePlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    /// Where the route starts.
    pub start: Coordinates,
    /// Where the route ends.
    pub end: Coordinates,
    /// Areas the route must not enter.
    pub avoid: Vec<AvoidanceBox>,
}

impl RouteRequest {
    /// Build a request from `start` to a registered destination.
    ///
    /// Every hazard except the destination itself is avoided, so a hazard
    /// can be routed to. Returns `Ok(None)` when the destination is no longer
    /// registered.
    ///
    /// # Errors
    ///
    /// Propagates [`GeofenceError`] from box derivation.
    pub fn towards(
        registry: &PoiRegistry,
        start: Coordinates,
        destination: PoiId,
        radius_meters: f64,
    ) -> Result<Option<Self>, GeofenceError> {
        let Some(end) = registry.get(destination).map(|poi| poi.coordinates) else {
            return Ok(None);
        };
        let avoid = registry.avoidance_boxes(radius_meters, Some(destination))?;
        Ok(Some(Self { start, end, avoid }))
    }
}

/// A single turn-by-turn instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Maneuver {
    /// Human-readable instruction.
    pub instruction: String,
    /// Planner-specific action name, e.g. `LEFT_TURN`.
    pub action: String,
    /// Where the maneuver happens.
    pub location: Coordinates,
}

/// Route returned by a [`RoutePlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Polyline from start to end.
    pub geometry: Vec<Coordinates>,
    /// Estimated travel time.
    pub duration: Duration,
    /// Route length in metres.
    pub length_meters: u32,
    /// Instructions in travel order.
    pub maneuvers: Vec<Maneuver>,
}

impl PlannedRoute {
    /// Travel time and distance for display.
    #[must_use]
    pub const fn summary(&self) -> RouteSummary {
        RouteSummary {
            duration: self.duration,
            length_meters: self.length_meters,
        }
    }
}

/// Errors reported by a [`RoutePlanner`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutePlanError {
    /// No route exists that honours the avoidance areas.
    #[error("no route found: {message}")]
    NoRoute {
        /// Planner explanation.
        message: String,
    },
    /// The planner itself failed.
    #[error("route planner failed: {message}")]
    Planner {
        /// Planner explanation.
        message: String,
    },
}

/// External routing engine.
pub trait RoutePlanner {
    /// Compute a route for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`RoutePlanError`] when no route can be produced.
    fn plan(&self, request: &RouteRequest) -> Result<PlannedRoute, RoutePlanError>;
}

/// Time and distance of a planned route.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use firepath_core::RouteSummary;
///
/// let summary = RouteSummary { duration: Duration::from_secs(125), length_meters: 940 };
/// assert_eq!(summary.to_string(), "Time: 2:05 \nDistance: 940 metres");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSummary {
    /// Estimated travel time.
    pub duration: Duration,
    /// Route length in metres.
    pub length_meters: u32,
}

impl fmt::Display for RouteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time: {} \nDistance: {} metres",
            format_travel_time(self.duration),
            self.length_meters
        )
    }
}

/// Render a travel time as `m:ss`, or `h:mm:ss` from one hour up.
#[must_use]
pub fn format_travel_time(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
