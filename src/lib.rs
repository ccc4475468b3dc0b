//! Water-quality analysis client.
//!
//! Submits water-sample measurements to a remote prediction service,
//! classifies each returned parameter against fixed acceptable ranges, and
//! loads the active alert feed. Results are returned as render instructions
//! for whichever presentation layer drives the client.

pub mod analysis;
pub mod config;
pub mod ingest;
pub mod input;
pub mod logging;
pub mod model;
pub mod parameters;
pub mod render;
pub mod workflow;
