//! Core domain types for the Firepath hazard-avoidance engine.
//!
//! Responsibilities:
//! - Model points of interest and their closed category set.
//! - Keep the authoritative in-process registry of those points.
//! - Derive hazard avoidance boxes for the external route planner.
//! - Define the contracts of the rendering and route-planning collaborators.
//!
//! Boundaries:
//! - No I/O. Remote synchronisation lives in `firepath-data`.
//! - No global mutable state; registries are explicit values.

#![forbid(unsafe_code)]

pub mod geofence;
pub mod interaction;
mod planner;
mod poi;
mod registry;
mod submission;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(not(test), doc(hidden))]
pub mod test_support;

pub use geofence::{AvoidanceBox, GeofenceError, avoidance_box};
pub use interaction::MarkerRenderer;
pub use planner::{
    DEFAULT_AVOIDANCE_RADIUS_METERS, Maneuver, PlannedRoute, RoutePlanError, RoutePlanner,
    RouteRequest, RouteSummary, format_travel_time,
};
pub use poi::{Category, Coordinates, MarkerStyle, PointOfInterest, VisualHandle};
pub use registry::{PoiId, PoiRegistry};
pub use submission::{Submission, SubmissionError, USER_SUBMITTED_SUFFIX};
