//! Point-of-interest records and their closed category set.

use std::fmt;

use geo::Coord;

/// Classification of a [`PointOfInterest`].
///
/// The set is closed: remote documents naming any other category are
/// rejected during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum Category {
    /// Where routes start, e.g. the responding station.
    Origin,
    /// Something routes must steer around.
    Hazard,
    /// Ephemeral marker left where the operator tapped the map.
    TouchPoint,
    /// People reported at a location.
    People,
}

/// Colour used by the rendering collaborator for a category's marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// Friendly locations.
    Green,
    /// Locations needing attention.
    Red,
}

impl Category {
    /// Wire name used by the remote document.
    ///
    /// # Examples
    /// ```
    /// use firepath_core::Category;
    ///
    /// assert_eq!(Category::TouchPoint.as_str(), "touchPoint");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Hazard => "hazard",
            Self::TouchPoint => "touchPoint",
            Self::People => "people",
        }
    }

    /// Marker colour for this category.
    #[must_use]
    pub const fn marker_style(self) -> MarkerStyle {
        match self {
            Self::Origin | Self::TouchPoint => MarkerStyle::Green,
            Self::Hazard | Self::People => MarkerStyle::Red,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

impl Coordinates {
    /// Build a coordinate pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for Coord<f64> {
    fn from(value: Coordinates) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinates {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

/// Opaque reference to a marker owned by the rendering collaborator.
///
/// The registry stores handles so markers can be mapped back to their
/// records; it never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualHandle(u64);

impl VisualHandle {
    /// Wrap a renderer-specific token.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The renderer-specific token.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// A titled, described, geolocated record.
///
/// Construction is pure: building a value neither registers it nor draws
/// it. Use [`crate::PoiRegistry::add`] and a [`crate::MarkerRenderer`] for
/// those steps.
///
/// # Examples
/// ```
/// use firepath_core::{Category, Coordinates, PointOfInterest};
///
/// let poi = PointOfInterest::new(
///     Category::Hazard,
///     "Fire",
///     "100 degrees C",
///     Coordinates::new(42.988274, -81.240670),
/// );
/// assert_eq!(
///     poi.to_string(),
///     "Title: Fire, Desc: 100 degrees C, Lat: 42.9883, Long: -81.2407"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PointOfInterest {
    /// Category driving avoidance and sync behaviour.
    pub category: Category,
    /// Display title; not unique.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Where the point sits.
    pub coordinates: Coordinates,
    /// `true` when entered by an operator rather than an automated source.
    pub user_submitted: bool,
    /// Marker drawn for this record, if any.
    pub visual_handle: Option<VisualHandle>,
}

impl PointOfInterest {
    /// Construct an automated (not user-submitted) record without a marker.
    pub fn new(
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            category,
            title: title.into(),
            description: description.into(),
            coordinates,
            user_submitted: false,
            visual_handle: None,
        }
    }

    /// Set the provenance flag.
    #[must_use]
    pub fn with_user_submitted(mut self, user_submitted: bool) -> Self {
        self.user_submitted = user_submitted;
        self
    }

    /// Whether this record is a hazard routes must avoid.
    #[must_use]
    pub fn is_hazard(&self) -> bool {
        self.category == Category::Hazard
    }
}

impl fmt::Display for PointOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Desc: {}, Lat: {:.4}, Long: {:.4}",
            self.title, self.description, self.coordinates.latitude, self.coordinates.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Category::Origin, MarkerStyle::Green)]
    #[case(Category::TouchPoint, MarkerStyle::Green)]
    #[case(Category::Hazard, MarkerStyle::Red)]
    #[case(Category::People, MarkerStyle::Red)]
    fn marker_style_follows_category(#[case] category: Category, #[case] style: MarkerStyle) {
        assert_eq!(category.marker_style(), style);
    }

    #[rstest]
    fn coordinates_map_longitude_to_x() {
        let coord: Coord<f64> = Coordinates::new(51.5, -0.1).into();
        assert_eq!(coord, Coord { x: -0.1, y: 51.5 });
        assert_eq!(Coordinates::from(coord), Coordinates::new(51.5, -0.1));
    }

    #[rstest]
    fn new_points_are_automated_and_unrendered() {
        let poi = PointOfInterest::new(Category::Origin, "Base", "", Coordinates::new(0.0, 0.0));
        assert!(!poi.user_submitted);
        assert!(poi.visual_handle.is_none());
        assert!(!poi.is_hazard());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    #[case(Category::Origin, "\"origin\"")]
    #[case(Category::Hazard, "\"hazard\"")]
    #[case(Category::TouchPoint, "\"touchPoint\"")]
    #[case(Category::People, "\"people\"")]
    fn category_uses_wire_names(#[case] category: Category, #[case] wire: &str) {
        let encoded = serde_json::to_string(&category).expect("category should serialise");
        assert_eq!(encoded, wire);
        assert_eq!(category.as_str(), wire.trim_matches('"'));
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn unknown_category_is_rejected() {
        let result: Result<Category, _> = serde_json::from_str("\"drone\"");
        assert!(result.is_err());
    }
}
