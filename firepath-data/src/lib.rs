//! Remote synchronisation for the Firepath engine.
//!
//! Responsibilities:
//! - Read and replace the remote JSON point list.
//! - Sequence remote operations against the in-process registry.
//! - Keep network round trips off the caller's interactive thread.
//!
//! Boundaries:
//! - Domain rules live in `firepath-core`.
//! - No retries and no conflict detection; every write is last-write-wins.
//!
//! Invariants:
//! - The master key never reaches logs or `Debug` output.
//! - A failed fetch never mutates a registry.

#![forbid(unsafe_code)]

pub mod remote;
pub mod sync;

#[doc(hidden)]
pub mod test_support;
