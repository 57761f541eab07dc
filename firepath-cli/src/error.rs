//! Error types emitted by the Firepath CLI.

use std::sync::Arc;

use firepath_core::GeofenceError;
use firepath_data::remote::{RemoteStoreError, TransportBuildError};
use firepath_data::sync::SyncError;
use thiserror::Error;

/// Errors emitted by the Firepath CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// `--exclude-index` points past the end of the remote list.
    #[error("exclude index {index} is out of range for {len} remote points")]
    ExcludeIndexOutOfRange { index: usize, len: usize },
    /// Constructing the HTTP transport failed.
    #[error("failed to build transport for {resource_url:?}: {source}")]
    BuildTransport {
        resource_url: String,
        #[source]
        source: TransportBuildError,
    },
    /// Starting an async runtime or the sync worker failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The remote store failed.
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),
    /// A queued background removal failed.
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// Avoidance boxes could not be derived.
    #[error("failed to derive avoidance boxes: {0}")]
    Geofence(#[from] GeofenceError),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
