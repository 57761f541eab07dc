//! Test doubles for the rendering and route-planning collaborators.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::time::Duration;

use crate::{
    MarkerRenderer, PlannedRoute, PointOfInterest, RoutePlanError, RoutePlanner, RouteRequest,
    VisualHandle,
};

/// Renderer that mints sequential handles and tracks which are drawn.
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    next: u64,
    drawn: BTreeSet<VisualHandle>,
    titles: Vec<String>,
}

impl RecordingRenderer {
    /// Whether `handle` is currently on the map.
    #[must_use]
    pub fn is_drawn(&self, handle: VisualHandle) -> bool {
        self.drawn.contains(&handle)
    }

    /// Number of markers currently on the map.
    #[must_use]
    pub fn drawn_count(&self) -> usize {
        self.drawn.len()
    }

    /// Titles of every record drawn so far, including removed ones.
    #[must_use]
    pub fn drawn_titles(&self) -> &[String] {
        &self.titles
    }
}

impl MarkerRenderer for RecordingRenderer {
    fn create_visual(&mut self, poi: &PointOfInterest) -> VisualHandle {
        let handle = VisualHandle::new(self.next);
        self.next += 1;
        self.drawn.insert(handle);
        self.titles.push(poi.title.clone());
        handle
    }

    fn remove_visual(&mut self, handle: VisualHandle) {
        self.drawn.remove(&handle);
    }
}

/// Route planner returning a canned answer and remembering its last input.
#[derive(Debug)]
pub struct StubRoutePlanner {
    response: Result<PlannedRoute, RoutePlanError>,
    last_request: RefCell<Option<RouteRequest>>,
}

impl StubRoutePlanner {
    /// Planner answering with a straight route of the given time and length.
    #[must_use]
    pub fn with_summary(duration: Duration, length_meters: u32) -> Self {
        Self::with_response(Ok(PlannedRoute {
            geometry: Vec::new(),
            duration,
            length_meters,
            maneuvers: Vec::new(),
        }))
    }

    /// Planner that always fails with `error`.
    #[must_use]
    pub fn with_error(error: RoutePlanError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: Result<PlannedRoute, RoutePlanError>) -> Self {
        Self {
            response,
            last_request: RefCell::new(None),
        }
    }

    /// The most recent request passed to [`RoutePlanner::plan`].
    #[must_use]
    pub fn last_request(&self) -> Option<RouteRequest> {
        self.last_request.borrow().clone()
    }
}

impl RoutePlanner for StubRoutePlanner {
    fn plan(&self, request: &RouteRequest) -> Result<PlannedRoute, RoutePlanError> {
        self.last_request.replace(Some(request.clone()));
        self.response.clone()
    }
}
