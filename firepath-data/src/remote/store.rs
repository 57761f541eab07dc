//! Read, replace and remove-by-title over the remote point list.
//!
//! Typed reads go through [`PoiRecord`]. Removal edits the raw JSON array
//! instead, so elements written by other clients keep fields and categories
//! this crate does not model.

use firepath_core::PointOfInterest;
use serde_json::Value;

use super::document::{
    PoiRecord, decode_points, decode_raw_points, encode_points, encode_raw_points, raw_title,
};
use super::error::RemoteStoreError;
use super::transport::DocumentTransport;

/// Result of [`RemoteStore::remove_by_title`].
#[derive(Debug, Clone, PartialEq)]
pub enum RemovalOutcome {
    /// The first record with the title was dropped before writing back.
    Removed {
        /// Array position of the removed record in the fetched snapshot.
        index: usize,
        /// The removed element, exactly as it was stored.
        record: Value,
    },
    /// No record matched; the snapshot was written back unchanged.
    Unmatched,
}

impl RemovalOutcome {
    /// Whether a record was removed.
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed { .. })
    }
}

/// Wire-level client for the remote point list.
///
/// Every call is a fresh round trip; nothing is cached between calls and
/// nothing is retried.
///
/// # Concurrency
///
/// [`remove_by_title`](Self::remove_by_title) is a read-modify-write with no
/// version check. Two concurrent removals that read the same snapshot both
/// write back their own edit, and the later write wins. Callers that need
/// stronger guarantees must serialise removals themselves.
#[derive(Debug)]
pub struct RemoteStore<T> {
    transport: T,
}

impl<T: DocumentTransport> RemoteStore<T> {
    /// Wrap a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch every record in document order.
    ///
    /// # Errors
    ///
    /// Propagates transport failures and returns
    /// [`RemoteStoreError::Parse`] when any element is malformed; no partial
    /// result is produced.
    pub async fn fetch_all(&self) -> Result<Vec<PoiRecord>, RemoteStoreError> {
        let body = self.transport.get_document().await?;
        let records = decode_points(&body)?;
        log::debug!("fetched {} remote points", records.len());
        Ok(records)
    }

    /// Fetch every record as unrendered [`PointOfInterest`] values.
    ///
    /// # Errors
    ///
    /// As for [`fetch_all`](Self::fetch_all).
    pub async fn fetch_points(&self) -> Result<Vec<PointOfInterest>, RemoteStoreError> {
        let records = self.fetch_all().await?;
        Ok(records.into_iter().map(PointOfInterest::from).collect())
    }

    /// Replace the remote array with `records`.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteStoreError::HttpStatus`] for any non-success status
    /// and propagates network failures.
    pub async fn replace_all(&self, records: &[PoiRecord]) -> Result<(), RemoteStoreError> {
        let body = encode_points(records)?;
        self.transport.put_document(body).await?;
        log::debug!("replaced remote document with {} points", records.len());
        Ok(())
    }

    /// Remove the first record whose title equals `title` exactly.
    ///
    /// The fetched array is always written back, with or without a match.
    /// Elements are handled as raw JSON and only their `title` is read, so
    /// everything else in the document round-trips untouched.
    ///
    /// # Errors
    ///
    /// Fails if either the fetch or the write fails. A failed fetch sends no
    /// write.
    pub async fn remove_by_title(&self, title: &str) -> Result<RemovalOutcome, RemoteStoreError> {
        let body = self.transport.get_document().await?;
        let mut points = decode_raw_points(&body)?;
        let outcome = match points.iter().position(|point| raw_title(point) == Some(title)) {
            Some(index) => RemovalOutcome::Removed {
                index,
                record: points.remove(index),
            },
            None => RemovalOutcome::Unmatched,
        };
        self.transport
            .put_document(encode_raw_points(&points)?)
            .await?;
        match &outcome {
            RemovalOutcome::Removed { index, .. } => {
                log::info!("removed remote point {title:?} at index {index}");
            }
            RemovalOutcome::Unmatched => {
                log::info!("no remote point titled {title:?}; document written back unchanged");
            }
        }
        Ok(outcome)
    }
}
