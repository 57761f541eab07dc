//! Shared test harness modules for the Firepath CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod execution;
mod unit;
