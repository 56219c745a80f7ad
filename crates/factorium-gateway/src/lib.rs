//! factorium gateway library entry.
//!
//! This crate wires config, the metrics registry, the computation seam, and
//! the factorial handler into an axum service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod compute;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
