//! factorium core: runtime-free primitives shared by the gateway and tests.
//!
//! This crate defines the error taxonomy, the `number` query parser, the JSON
//! reply bodies, and the exact factorial itself. It intentionally carries no
//! transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Malformed input is
//! always reported as `FactoError` so the gateway can map it to a status code.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod math;
pub mod protocol;

/// Shared result type.
pub use error::{FactoError, Result};
