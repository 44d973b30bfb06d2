//! Shared plumbing for the `stem-provision` and `stem-events` binaries.

pub mod cli;
pub mod events;
pub mod logging;
pub mod output;
pub mod progress;
pub mod provision;
