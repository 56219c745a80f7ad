//! HTTP entry points for the service endpoints.
//!
//! - `factorial`: `GET /factorial?number=<int>`

pub mod factorial;
