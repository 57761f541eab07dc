//! Wire shapes of the remote JSON document.
//!
//! A fetch returns the store's envelope:
//!
//! ```json
//! { "record": { "points": [ { "type": "hazard", "title": "Fire", ... } ] }, "metadata": {} }
//! ```
//!
//! while an update sends only `{ "points": [...] }`; the store adds the
//! `record` wrapper itself.

use firepath_core::{Category, Coordinates, PointOfInterest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::RemoteStoreError;

/// One element of the remote `points` array.
///
/// Every field is required; a missing or mistyped one fails the whole
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoiRecord {
    /// Category, serialised under the `type` key.
    #[serde(rename = "type")]
    pub category: Category,
    /// Display title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Position as `{ "latitude": .., "longitude": .. }`.
    pub coordinates: Coordinates,
    /// Provenance flag.
    pub user_submitted: bool,
}

impl From<PoiRecord> for PointOfInterest {
    fn from(record: PoiRecord) -> Self {
        Self::new(
            record.category,
            record.title,
            record.description,
            record.coordinates,
        )
        .with_user_submitted(record.user_submitted)
    }
}

impl From<&PointOfInterest> for PoiRecord {
    fn from(poi: &PointOfInterest) -> Self {
        Self {
            category: poi.category,
            title: poi.title.clone(),
            description: poi.description.clone(),
            coordinates: poi.coordinates,
            user_submitted: poi.user_submitted,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FetchEnvelope<P> {
    record: FetchedPoints<P>,
}

#[derive(Debug, Deserialize)]
struct FetchedPoints<P> {
    points: Vec<P>,
}

#[derive(Debug, Serialize)]
struct UpdateBody<'a, P> {
    points: &'a [P],
}

/// Decode a fetched envelope into its records, in document order.
///
/// # Errors
///
/// Returns [`RemoteStoreError::Parse`] for malformed JSON, a missing
/// `record.points` path, or any invalid element.
pub fn decode_points(body: &[u8]) -> Result<Vec<PoiRecord>, RemoteStoreError> {
    let envelope: FetchEnvelope<PoiRecord> = serde_json::from_slice(body)?;
    Ok(envelope.record.points)
}

/// Decode a fetched envelope into its raw JSON elements.
///
/// Elements are kept exactly as stored, including fields [`PoiRecord`] does
/// not model and categories it does not know.
///
/// # Errors
///
/// Returns [`RemoteStoreError::Parse`] for malformed JSON or a missing
/// `record.points` array.
pub fn decode_raw_points(body: &[u8]) -> Result<Vec<Value>, RemoteStoreError> {
    let envelope: FetchEnvelope<Value> = serde_json::from_slice(body)?;
    Ok(envelope.record.points)
}

/// Encode records as an update body, without the `record` wrapper.
///
/// # Errors
///
/// Returns [`RemoteStoreError::Parse`] if a record cannot be represented as
/// JSON (non-finite coordinates).
pub fn encode_points(records: &[PoiRecord]) -> Result<Vec<u8>, RemoteStoreError> {
    Ok(serde_json::to_vec(&UpdateBody { points: records })?)
}

/// Encode raw elements as an update body, without the `record` wrapper.
///
/// # Errors
///
/// Returns [`RemoteStoreError::Parse`] if serialisation fails.
pub fn encode_raw_points(points: &[Value]) -> Result<Vec<u8>, RemoteStoreError> {
    Ok(serde_json::to_vec(&UpdateBody { points })?)
}

/// Title of a raw element, if it is an object with a string `title`.
#[must_use]
pub fn raw_title(point: &Value) -> Option<&str> {
    point.get("title").and_then(Value::as_str)
}

/// Wrap an update body the way the store echoes it back on fetch.
///
/// Used by in-memory transports to emulate the store.
///
/// # Errors
///
/// Returns [`RemoteStoreError::Parse`] when `update` is not a JSON object.
pub fn wrap_record(update: &[u8]) -> Result<Vec<u8>, RemoteStoreError> {
    let record: Value = serde_json::from_slice(update)?;
    if !record.is_object() {
        return Err(RemoteStoreError::Parse {
            message: "update body must be a JSON object".to_owned(),
        });
    }
    Ok(serde_json::to_vec(&serde_json::json!({
        "record": record,
        "metadata": { "private": true },
    }))?)
}
