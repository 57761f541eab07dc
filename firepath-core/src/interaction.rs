//! Marker-level operations that pair registry changes with the renderer.
//!
//! Building a record, registering it and drawing it are separate steps. The
//! helpers here run them in order so callers handling taps and dialogs do
//! not have to.

use log::debug;

use crate::{Category, Coordinates, PoiId, PoiRegistry, PointOfInterest, VisualHandle};

/// Rendering collaborator that owns marker lifecycles.
pub trait MarkerRenderer {
    /// Draw a marker for `poi` and return a handle to it.
    fn create_visual(&mut self, poi: &PointOfInterest) -> VisualHandle;

    /// Remove a previously drawn marker. Unknown handles are ignored.
    fn remove_visual(&mut self, handle: VisualHandle);
}

/// Register `poi`, draw it, and remember the marker.
pub fn register_with_visual<R>(
    registry: &mut PoiRegistry,
    renderer: &mut R,
    poi: PointOfInterest,
) -> PoiId
where
    R: MarkerRenderer + ?Sized,
{
    let handle = renderer.create_visual(&poi);
    let id = registry.add(poi);
    registry.attach_visual(id, handle);
    id
}

/// Drop an empty touch point where the operator tapped.
///
/// Any earlier touch point stays registered and drawn; call
/// [`discard_touch_point`] first to tear it down.
pub fn place_touch_point<R>(
    registry: &mut PoiRegistry,
    renderer: &mut R,
    coordinates: Coordinates,
) -> PoiId
where
    R: MarkerRenderer + ?Sized,
{
    let poi = PointOfInterest::new(Category::TouchPoint, "", "", coordinates);
    register_with_visual(registry, renderer, poi)
}

/// Remove the current touch point and its marker.
pub fn discard_touch_point<R>(
    registry: &mut PoiRegistry,
    renderer: &mut R,
) -> Option<PointOfInterest>
where
    R: MarkerRenderer + ?Sized,
{
    let id = registry.last_touch_point()?;
    remove_with_visual(registry, renderer, id)
}

/// Mark the record drawn with `handle` as resolved.
///
/// Removes the marker and the local record only; the remote document is
/// untouched.
pub fn resolve_marker<R>(
    registry: &mut PoiRegistry,
    renderer: &mut R,
    handle: VisualHandle,
) -> Option<PointOfInterest>
where
    R: MarkerRenderer + ?Sized,
{
    let Some(id) = registry.find_by_visual_handle(handle) else {
        debug!("no record drawn with marker {}", handle.raw());
        return None;
    };
    remove_with_visual(registry, renderer, id)
}

/// Remove `id` and its marker, if it has one.
pub fn remove_with_visual<R>(
    registry: &mut PoiRegistry,
    renderer: &mut R,
    id: PoiId,
) -> Option<PointOfInterest>
where
    R: MarkerRenderer + ?Sized,
{
    let poi = registry.remove(id)?;
    if let Some(handle) = poi.visual_handle {
        renderer.remove_visual(handle);
    }
    Some(poi)
}
