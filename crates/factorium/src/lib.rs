//! Top-level facade crate for factorium.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use factorium_core::*;
}

pub mod gateway {
    pub use factorium_gateway::*;
}
