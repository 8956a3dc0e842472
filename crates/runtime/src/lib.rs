//! Host-side plumbing for `sim-core`.
//!
//! The engine itself is a pure, synchronous library; this crate supplies
//! what a host application needs around it: a periodic tick driver, a
//! file-backed scenario source for collision snapshots and actor lists,
//! and the zero-argument refresh convenience that re-pulls both.
pub mod driver;
pub mod error;
pub mod source;

pub use driver::TickDriver;
pub use error::RuntimeError;
pub use source::{FileSource, Scenario, ScenarioSource, refresh_from_source};
