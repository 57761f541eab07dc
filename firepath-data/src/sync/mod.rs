//! Sequencing of registry and remote operations.
//!
//! [`SyncCoordinator`] owns a background worker: a dedicated OS thread with
//! its own single-threaded Tokio runtime. Remote removals are queued to that
//! worker so the caller's thread never waits on the network unless it asks
//! to. The worker runs removals one at a time in queue order, so removals
//! from one coordinator never overwrite each other. Separate coordinators,
//! or separate processes, sharing a document can still lose an update. Loading runs on the caller's context because it must mutate the
//! caller's [`PoiRegistry`].
//!
//! The coordinator never reconciles local and remote state. A remote
//! removal leaves the registry alone, and local removal is a separate call
//! on the registry.
//!
//! # Example
//!
//! ```no_run
//! use firepath_core::PoiRegistry;
//! use firepath_data::remote::{HttpDocumentTransport, RemoteStore};
//! use firepath_data::sync::SyncCoordinator;
//!
//! let transport = HttpDocumentTransport::new("https://api.example.com/v3/b/points", "key")?;
//! let coordinator = SyncCoordinator::new(RemoteStore::new(transport))?;
//!
//! let mut registry = PoiRegistry::new();
//! let runtime = tokio::runtime::Runtime::new()?;
//! runtime.block_on(coordinator.load_from_remote(&mut registry))?;
//!
//! let pending = coordinator.remove_remote_and_local("Fire");
//! println!("{:?}", pending.wait()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;
use std::thread::JoinHandle;

use firepath_core::{PoiId, PoiRegistry};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::remote::{DocumentTransport, RemoteStore, RemoteStoreError, RemovalOutcome};

/// Name given to the background worker thread.
pub const WORKER_THREAD_NAME: &str = "firepath-sync";

type RemovalResult = Result<RemovalOutcome, RemoteStoreError>;

/// Errors surfaced by [`SyncCoordinator`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    /// The remote store failed.
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),
    /// The background worker stopped before reporting an outcome.
    #[error("background sync worker stopped before reporting")]
    WorkerGone,
}

struct RemovalJob {
    title: String,
    reply: oneshot::Sender<RemovalResult>,
}

/// Handle to a removal queued on the background worker.
///
/// Dropping the handle does not cancel the removal.
#[derive(Debug)]
#[must_use = "the removal runs regardless; keep the handle to learn its outcome"]
pub struct PendingRemoval {
    title: String,
    receiver: oneshot::Receiver<RemovalResult>,
}

impl PendingRemoval {
    /// Title being removed.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Await the outcome from async code.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] when the removal failed and
    /// [`SyncError::WorkerGone`] when the worker stopped first.
    pub async fn outcome(self) -> Result<RemovalOutcome, SyncError> {
        let result = self.receiver.await.map_err(|_| SyncError::WorkerGone)?;
        Ok(result?)
    }

    /// Block the current thread until the outcome arrives.
    ///
    /// Must not be called from inside an async runtime; use
    /// [`outcome`](Self::outcome) there.
    ///
    /// # Errors
    ///
    /// As for [`outcome`](Self::outcome).
    pub fn wait(self) -> Result<RemovalOutcome, SyncError> {
        let result = self
            .receiver
            .blocking_recv()
            .map_err(|_| SyncError::WorkerGone)?;
        Ok(result?)
    }
}

/// Orchestrates the registry and the remote store.
pub struct SyncCoordinator<T> {
    store: Arc<RemoteStore<T>>,
    jobs: mpsc::UnboundedSender<RemovalJob>,
    worker: JoinHandle<()>,
}

impl<T> std::fmt::Debug for SyncCoordinator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCoordinator")
            .field("worker", &self.worker.thread().name())
            .finish_non_exhaustive()
    }
}

impl<T: DocumentTransport + 'static> SyncCoordinator<T> {
    /// Start the background worker for `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the worker runtime or thread cannot be created.
    pub fn new(store: RemoteStore<T>) -> std::io::Result<Self> {
        let store = Arc::new(store);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (jobs, receiver) = mpsc::unbounded_channel();
        let worker_store = Arc::clone(&store);
        let worker = std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_owned())
            .spawn(move || {
                log::debug!("sync worker started");
                runtime.block_on(run_worker(worker_store, receiver));
                log::debug!("sync worker stopped");
            })?;
        Ok(Self {
            store,
            jobs,
            worker,
        })
    }

    /// The shared remote store.
    #[must_use]
    pub fn store(&self) -> &RemoteStore<T> {
        &self.store
    }

    /// Fetch every remote record and add it to `registry` in document order.
    ///
    /// Returns the new ids in the same order. Records arrive unrendered;
    /// drawing them is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Remote`] if the fetch fails, in which case
    /// `registry` is left untouched.
    pub async fn load_from_remote(
        &self,
        registry: &mut PoiRegistry,
    ) -> Result<Vec<PoiId>, SyncError> {
        let points = self.store.fetch_points().await?;
        let ids: Vec<PoiId> = points.into_iter().map(|poi| registry.add(poi)).collect();
        log::info!("loaded {} remote points into the registry", ids.len());
        Ok(ids)
    }

    /// Queue removal of the first remote record titled `title`.
    ///
    /// Runs on the background worker and returns at once. Removals start only
    /// after every earlier one has finished. The local registry is not
    /// touched; remove the matching entry there separately.
    pub fn remove_remote_and_local(&self, title: impl Into<String>) -> PendingRemoval {
        let title = title.into();
        let (reply, receiver) = oneshot::channel();
        let job = RemovalJob {
            title: title.clone(),
            reply,
        };
        if self.jobs.send(job).is_err() {
            log::warn!("sync worker is gone; removal of {title:?} was not queued");
        }
        PendingRemoval { title, receiver }
    }

    /// Stop accepting work and wait for queued and in-flight removals.
    ///
    /// Dropping the coordinator instead lets the worker finish in the
    /// background.
    pub fn shutdown(self) {
        let Self { jobs, worker, .. } = self;
        drop(jobs);
        if worker.join().is_err() {
            log::warn!("sync worker panicked");
        }
    }
}

async fn run_worker<T: DocumentTransport + 'static>(
    store: Arc<RemoteStore<T>>,
    mut receiver: mpsc::UnboundedReceiver<RemovalJob>,
) {
    while let Some(job) = receiver.recv().await {
        run_removal(&store, job).await;
    }
}

async fn run_removal<T: DocumentTransport>(store: &RemoteStore<T>, job: RemovalJob) {
    let RemovalJob { title, reply } = job;
    let result = store.remove_by_title(&title).await;
    if let Err(err) = &result {
        log::warn!("remote removal of {title:?} failed: {err}");
    }
    if reply.send(result).is_err() {
        log::debug!("removal of {title:?} finished after its caller went away");
    }
}
