//! Client for the remote JSON point list.
//!
//! The remote side is a single document holding `{ "points": [...] }`.
//! [`RemoteStore`] reads and replaces it as a whole; there is no partial
//! update and no version check, so every write is last-write-wins.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use firepath_data::remote::{HttpDocumentTransport, HttpDocumentTransportConfig, RemoteStore};
//!
//! let config = HttpDocumentTransportConfig::new("https://api.example.com/v3/b/points", "key")
//!     .with_timeout(Duration::from_secs(10));
//! let store = RemoteStore::new(HttpDocumentTransport::with_config(config)?);
//!
//! let runtime = tokio::runtime::Runtime::new()?;
//! for record in runtime.block_on(store.fetch_all())? {
//!     println!("{}: {}", record.category, record.title);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod store;
mod transport;

pub use document::{
    PoiRecord, decode_points, decode_raw_points, encode_points, encode_raw_points, raw_title,
    wrap_record,
};
pub use error::{Operation, RemoteStoreError, TransportBuildError};
pub use store::{RemovalOutcome, RemoteStore};
pub use transport::{
    DEFAULT_USER_AGENT, DocumentTransport, HttpDocumentTransport, HttpDocumentTransportConfig,
    MASTER_KEY_HEADER,
};
