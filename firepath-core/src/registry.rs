//! In-process registry of points of interest.
//!
//! The registry is an explicit object rather than process-wide state. It is
//! mutated only through `&mut self`, so a registry shared across threads has
//! to be wrapped in a lock by its owner; the type never synchronises
//! internally.

use std::fmt;

use log::debug;

use crate::geofence::{AvoidanceBox, GeofenceError, avoidance_box, validate_radius};
use crate::{Category, PointOfInterest, VisualHandle};

/// Identity issued by [`PoiRegistry::add`].
///
/// Identities are never reused within one registry, so a stale id simply
/// misses after its record is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PoiId(u64);

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "poi#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: PoiId,
    poi: PointOfInterest,
}

/// Authoritative in-memory set of points of interest.
///
/// Iteration order is insertion order. Titles are not unique and records are
/// never deduplicated.
///
/// # Examples
/// ```
/// use firepath_core::{Category, Coordinates, PoiRegistry, PointOfInterest};
///
/// let mut registry = PoiRegistry::new();
/// let first = registry.add(PointOfInterest::new(
///     Category::TouchPoint, "", "", Coordinates::new(0.0, 0.0),
/// ));
/// let second = registry.add(PointOfInterest::new(
///     Category::TouchPoint, "", "", Coordinates::new(1.0, 1.0),
/// ));
///
/// assert_eq!(registry.last_touch_point(), Some(second));
/// assert!(registry.get(first).is_some());
/// ```
#[derive(Debug, Default, Clone)]
pub struct PoiRegistry {
    entries: Vec<Entry>,
    next_id: u64,
    last_touch_point: Option<PoiId>,
}

impl PoiRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record and return its identity.
    ///
    /// A touch point becomes the current touch point. The previous one stays
    /// registered; its owner must remove it.
    pub fn add(&mut self, poi: PointOfInterest) -> PoiId {
        let id = PoiId(self.next_id);
        self.next_id += 1;
        if poi.category == Category::TouchPoint {
            if let Some(previous) = self.last_touch_point.replace(id) {
                debug!("touch point {id} supersedes {previous}; {previous} remains registered");
            }
        }
        self.entries.push(Entry { id, poi });
        id
    }

    /// Evict a record, returning it if it was present.
    ///
    /// Removing an absent id is a no-op. Removing the current touch point
    /// clears that slot.
    pub fn remove(&mut self, id: PoiId) -> Option<PointOfInterest> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        if self.last_touch_point == Some(id) {
            self.last_touch_point = None;
        }
        Some(self.entries.remove(index).poi)
    }

    /// Look up a record by id.
    #[must_use]
    pub fn get(&self, id: PoiId) -> Option<&PointOfInterest> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.poi)
    }

    /// Every record in insertion order.
    ///
    /// The borrow prevents mutation while the iterator is alive.
    pub fn all(&self) -> impl Iterator<Item = (PoiId, &PointOfInterest)> + '_ {
        self.entries.iter().map(|entry| (entry.id, &entry.poi))
    }

    /// Records of `category` in insertion order.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<(PoiId, &PointOfInterest)> {
        self.by_category_excluding(category, None)
    }

    /// Records of `category` other than `exclude`, in insertion order.
    #[must_use]
    pub fn by_category_excluding(
        &self,
        category: Category,
        exclude: Option<PoiId>,
    ) -> Vec<(PoiId, &PointOfInterest)> {
        self.all()
            .filter(|(id, poi)| poi.category == category && Some(*id) != exclude)
            .collect()
    }

    /// One avoidance box per hazard other than `exclude`.
    ///
    /// # Errors
    ///
    /// Fails with the first [`GeofenceError`] produced, including an invalid
    /// radius when no hazards are registered.
    pub fn avoidance_boxes(
        &self,
        radius_meters: f64,
        exclude: Option<PoiId>,
    ) -> Result<Vec<AvoidanceBox>, GeofenceError> {
        validate_radius(radius_meters)?;
        self.by_category_excluding(Category::Hazard, exclude)
            .into_iter()
            .map(|(_, poi)| avoidance_box(poi.coordinates, radius_meters))
            .collect()
    }

    /// Record drawn with `handle`, if any.
    #[must_use]
    pub fn find_by_visual_handle(&self, handle: VisualHandle) -> Option<PoiId> {
        self.entries
            .iter()
            .find(|entry| entry.poi.visual_handle == Some(handle))
            .map(|entry| entry.id)
    }

    /// Remember the marker drawn for `id`. Returns `false` if `id` is absent.
    pub fn attach_visual(&mut self, id: PoiId, handle: VisualHandle) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.poi.visual_handle = Some(handle);
                true
            }
            None => false,
        }
    }

    /// Markers for every record that has one, in insertion order.
    #[must_use]
    pub fn visual_handles(&self) -> Vec<VisualHandle> {
        self.entries
            .iter()
            .filter_map(|entry| entry.poi.visual_handle)
            .collect()
    }

    /// The most recently added touch point, unless it was removed.
    #[must_use]
    pub const fn last_touch_point(&self) -> Option<PoiId> {
        self.last_touch_point
    }

    /// Number of registered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<PointOfInterest> for PoiRegistry {
    fn extend<I: IntoIterator<Item = PointOfInterest>>(&mut self, iter: I) {
        for poi in iter {
            self.add(poi);
        }
    }
}
