//! Facade crate for the Firepath hazard-avoidance engine.
//!
//! This crate re-exports the core domain types and, behind the `remote`
//! feature, the remote store and synchronisation layer.

#![forbid(unsafe_code)]

pub use firepath_core::{
    AvoidanceBox, Category, Coordinates, DEFAULT_AVOIDANCE_RADIUS_METERS, GeofenceError, Maneuver,
    MarkerRenderer, MarkerStyle, PlannedRoute, PoiId, PoiRegistry, PointOfInterest, RoutePlanError,
    RoutePlanner, RouteRequest, RouteSummary, Submission, SubmissionError, VisualHandle,
    avoidance_box, format_travel_time, interaction,
};

#[cfg(feature = "remote")]
pub use firepath_data::remote::{
    DocumentTransport, HttpDocumentTransport, HttpDocumentTransportConfig, PoiRecord,
    RemoteStore, RemoteStoreError, RemovalOutcome,
};

#[cfg(feature = "remote")]
pub use firepath_data::sync::{PendingRemoval, SyncCoordinator, SyncError};
