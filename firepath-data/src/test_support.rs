//! Test utilities for the remote store.
//!
//! [`MemoryTransport`] is a deterministic stand-in for
//! [`crate::remote::HttpDocumentTransport`]. It keeps the document in memory,
//! echoes `PUT` bodies back on `GET` the way the real store does, records
//! every request and can fail on demand.
//!
//! # Example
//!
//! ```
//! use firepath_core::{Category, Coordinates};
//! use firepath_data::remote::{PoiRecord, RemoteStore};
//! use firepath_data::test_support::MemoryTransport;
//!
//! let fire = PoiRecord {
//!     category: Category::Hazard,
//!     title: "Fire".to_owned(),
//!     description: "100 degrees C".to_owned(),
//!     coordinates: Coordinates::new(42.988, -81.240),
//!     user_submitted: false,
//! };
//! let store = RemoteStore::new(MemoryTransport::with_records(&[fire]));
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build()?;
//! let records = runtime.block_on(store.fetch_all())?;
//! assert_eq!(records.len(), 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::Barrier;

use crate::remote::{DocumentTransport, PoiRecord, RemoteStoreError, decode_points, wrap_record};

/// One request observed by [`MemoryTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    /// A document fetch.
    Get,
    /// A document replacement with its body.
    Put(Vec<u8>),
}

#[derive(Debug, Default)]
struct State {
    document: Vec<u8>,
    requests: Vec<RecordedRequest>,
    accepted_puts: usize,
    gated_reads: usize,
    get_failures: VecDeque<RemoteStoreError>,
    put_failures: VecDeque<RemoteStoreError>,
}

/// In-memory document store.
#[derive(Debug)]
pub struct MemoryTransport {
    state: Mutex<State>,
    gate: Option<Barrier>,
}

impl MemoryTransport {
    /// Store whose document holds `records`, wrapped as a fetch would return it.
    #[must_use]
    pub fn with_records(records: &[PoiRecord]) -> Self {
        let document = serde_json::json!({
            "record": { "points": records },
            "metadata": { "private": true },
        });
        Self::with_raw_document(document.to_string().into_bytes())
    }

    /// Store serving `document` verbatim, valid or not.
    #[must_use]
    pub fn with_raw_document(document: Vec<u8>) -> Self {
        Self {
            state: Mutex::new(State {
                document,
                ..State::default()
            }),
            gate: None,
        }
    }

    /// Hold each of the first `readers` fetches until all of them have taken
    /// their snapshot.
    ///
    /// Every gated reader therefore sees the same pre-mutation document,
    /// which makes interleavings of concurrent read-modify-write calls
    /// reproducible. Fetches after the first `readers` pass straight through.
    #[must_use]
    pub fn with_snapshot_gate(mut self, readers: usize) -> Self {
        self.gate = Some(Barrier::new(readers));
        self.lock().gated_reads = readers;
        self
    }

    /// Fail the next fetch with `error` instead of reading the document.
    pub fn fail_next_get(&self, error: RemoteStoreError) {
        self.lock().get_failures.push_back(error);
    }

    /// Reject the next replacement with `error`, leaving the document as is.
    pub fn fail_next_put(&self, error: RemoteStoreError) {
        self.lock().put_failures.push_back(error);
    }

    /// Current document bytes.
    #[must_use]
    pub fn document(&self) -> Vec<u8> {
        self.lock().document.clone()
    }

    /// Records currently stored, or an empty list if the document does not
    /// decode.
    #[must_use]
    pub fn records(&self) -> Vec<PoiRecord> {
        decode_points(&self.lock().document).unwrap_or_default()
    }

    /// Every request seen so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Number of replacements that were accepted.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.lock().accepted_puts
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl DocumentTransport for MemoryTransport {
    async fn get_document(&self) -> Result<Vec<u8>, RemoteStoreError> {
        let (snapshot, gated) = {
            let mut state = self.lock();
            state.requests.push(RecordedRequest::Get);
            if let Some(error) = state.get_failures.pop_front() {
                return Err(error);
            }
            let gated = state.gated_reads > 0;
            if gated {
                state.gated_reads -= 1;
            }
            (state.document.clone(), gated)
        };
        if let (true, Some(gate)) = (gated, &self.gate) {
            gate.wait().await;
        }
        Ok(snapshot)
    }

    async fn put_document(&self, body: Vec<u8>) -> Result<(), RemoteStoreError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest::Put(body.clone()));
        if let Some(error) = state.put_failures.pop_front() {
            return Err(error);
        }
        state.document = wrap_record(&body)?;
        state.accepted_puts += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firepath_core::{Category, Coordinates};
    use rstest::rstest;

    fn base() -> PoiRecord {
        PoiRecord {
            category: Category::Origin,
            title: "Base".to_owned(),
            description: String::new(),
            coordinates: Coordinates::new(0.0, 0.0),
            user_submitted: false,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn put_body_is_served_back_wrapped() {
        let transport = MemoryTransport::with_records(&[]);

        transport
            .put_document(br#"{"points":[]}"#.to_vec())
            .await
            .expect("put");
        let fetched = transport.get_document().await.expect("get");
        let value: serde_json::Value = serde_json::from_slice(&fetched).expect("json");

        assert_eq!(value["record"]["points"], serde_json::json!([]));
        assert_eq!(
            transport.requests(),
            [
                RecordedRequest::Put(br#"{"points":[]}"#.to_vec()),
                RecordedRequest::Get,
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn queued_failures_apply_once() {
        let transport = MemoryTransport::with_records(&[base()]);
        transport.fail_next_get(RemoteStoreError::Parse {
            message: "boom".to_owned(),
        });

        assert!(transport.get_document().await.is_err());
        assert!(transport.get_document().await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn gate_releases_after_all_readers_arrive() {
        let transport = MemoryTransport::with_records(&[base()]).with_snapshot_gate(2);

        let (a, b) = tokio::join!(transport.get_document(), transport.get_document());
        let later = transport.get_document().await.expect("ungated read");

        assert_eq!(a.expect("first"), b.expect("second"));
        assert_eq!(later, transport.document());
    }
}
