//! Behavioural tests for [`PoiRegistry`] touch-point tracking and geofences.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

use firepath_core::{
    AvoidanceBox, Category, Coordinates, GeofenceError, PoiId, PoiRegistry, PointOfInterest,
};

/// Outcome of an avoidance box query.
type BoxesCell = RefCell<Option<Result<Vec<AvoidanceBox>, GeofenceError>>>;

#[fixture]
fn registry() -> RefCell<PoiRegistry> {
    RefCell::new(PoiRegistry::new())
}

#[fixture]
fn ids() -> RefCell<Vec<PoiId>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn boxes() -> BoxesCell {
    RefCell::new(None)
}

fn hazard_at(latitude: f64, longitude: f64) -> PointOfInterest {
    PointOfInterest::new(
        Category::Hazard,
        "Fire",
        "",
        Coordinates::new(latitude, longitude),
    )
}

fn assert_close(actual: f64, expected: f64) {
    let delta = (actual - expected).abs();
    assert!(
        delta <= 1.0e-9,
        "expected {expected}, got {actual} (|delta| = {delta})"
    );
}

fn single_box(boxes: &BoxesCell) -> AvoidanceBox {
    let borrowed = boxes.borrow();
    let result = borrowed.as_ref().expect("boxes were derived");
    let list = result.as_ref().expect("expected boxes");
    assert_eq!(list.len(), 1, "expected a single box");
    list[0]
}

// --- Given steps ---

#[given("an empty registry")]
fn empty_registry(#[from(registry)] registry: &RefCell<PoiRegistry>) {
    *registry.borrow_mut() = PoiRegistry::new();
}

#[given("a registry holding three hazards")]
fn three_hazards(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(ids)] ids: &RefCell<Vec<PoiId>>,
) {
    let mut registry = registry.borrow_mut();
    let mut ids = ids.borrow_mut();
    for latitude in [42.988, 42.983, 42.985] {
        ids.push(registry.add(hazard_at(latitude, -81.24)));
    }
}

#[given("a registry holding a hazard on the equator")]
fn equator_hazard(#[from(registry)] registry: &RefCell<PoiRegistry>) {
    registry.borrow_mut().add(hazard_at(0.0, 0.0));
}

#[given("a registry holding a hazard at sixty degrees north")]
fn sixty_north_hazard(#[from(registry)] registry: &RefCell<PoiRegistry>) {
    registry.borrow_mut().add(hazard_at(60.0, 0.0));
}

// --- When steps ---

#[when("two touch points are added")]
fn add_two_touch_points(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(ids)] ids: &RefCell<Vec<PoiId>>,
) {
    let mut registry = registry.borrow_mut();
    for longitude in [0.0, 1.0] {
        let poi = PointOfInterest::new(
            Category::TouchPoint,
            "",
            "",
            Coordinates::new(0.0, longitude),
        );
        ids.borrow_mut().push(registry.add(poi));
    }
}

#[when("avoidance boxes are derived excluding the second hazard")]
fn derive_excluding_second(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(ids)] ids: &RefCell<Vec<PoiId>>,
    #[from(boxes)] boxes: &BoxesCell,
) {
    let exclude = ids.borrow().get(1).copied();
    assert!(exclude.is_some(), "three hazards must be registered");
    *boxes.borrow_mut() = Some(registry.borrow().avoidance_boxes(15.0, exclude));
}

#[when("avoidance boxes are derived for a radius of 111320 metres")]
fn derive_one_degree(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(boxes)] boxes: &BoxesCell,
) {
    *boxes.borrow_mut() = Some(registry.borrow().avoidance_boxes(111_320.0, None));
}

#[when("avoidance boxes are derived for a radius of 0 metres")]
fn derive_zero_radius(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(boxes)] boxes: &BoxesCell,
) {
    *boxes.borrow_mut() = Some(registry.borrow().avoidance_boxes(0.0, None));
}

// --- Then steps ---

#[then("the last touch point is the second one")]
fn last_touch_point_is_second(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(ids)] ids: &RefCell<Vec<PoiId>>,
) {
    let second = ids.borrow().get(1).copied();
    assert_eq!(registry.borrow().last_touch_point(), second);
}

#[then("both touch points remain registered")]
fn both_touch_points_registered(
    #[from(registry)] registry: &RefCell<PoiRegistry>,
    #[from(ids)] ids: &RefCell<Vec<PoiId>>,
) {
    let registry = registry.borrow();
    let touch_points: Vec<PoiId> = registry
        .by_category(Category::TouchPoint)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(touch_points, *ids.borrow());
}

#[then("two avoidance boxes are returned")]
fn two_boxes(#[from(boxes)] boxes: &BoxesCell) {
    let borrowed = boxes.borrow();
    let result = borrowed.as_ref().expect("boxes were derived");
    let list = result.as_ref().expect("expected boxes");
    assert_eq!(list.len(), 2);
}

#[then("the box spans one degree of latitude and one degree of longitude")]
fn spans_one_by_one(#[from(boxes)] boxes: &BoxesCell) {
    let bbox = single_box(boxes);
    assert_close(bbox.delta_latitude(), 1.0);
    assert_close(bbox.delta_longitude(), 1.0);
}

#[then("the box spans one degree of latitude and two degrees of longitude")]
fn spans_one_by_two(#[from(boxes)] boxes: &BoxesCell) {
    let bbox = single_box(boxes);
    assert_close(bbox.delta_latitude(), 1.0);
    assert_close(bbox.delta_longitude(), 2.0);
}

#[then("an invalid radius error is returned")]
fn invalid_radius(#[from(boxes)] boxes: &BoxesCell) {
    let borrowed = boxes.borrow();
    assert!(
        matches!(
            &*borrowed,
            Some(Err(GeofenceError::InvalidRadius { .. }))
        ),
        "expected InvalidRadius, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/registry.feature", name = $title)]
        fn $fn_name(registry: RefCell<PoiRegistry>, ids: RefCell<Vec<PoiId>>, boxes: BoxesCell) {
            let _ = (registry, ids, boxes);
        }
    };
}

register_scenario!(
    touch_point_slot_follows_latest,
    "the touch point slot follows the latest touch point"
);
register_scenario!(
    avoidance_skips_destination,
    "avoidance boxes skip the destination hazard"
);
register_scenario!(
    equator_geofence,
    "a geofence on the equator spans one degree each way"
);
register_scenario!(
    sixty_north_geofence,
    "a geofence at sixty degrees north doubles its longitude span"
);
register_scenario!(rejects_non_positive_radius, "a non-positive radius is rejected");
