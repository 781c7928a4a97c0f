//! Health-risk inference core for the HealthGuard service.
//!
//! The [`inference`] module holds the pipeline; the remaining modules carry the
//! configuration, telemetry and error plumbing shared with the HTTP service.

pub mod config;
pub mod error;
pub mod inference;
pub mod telemetry;
