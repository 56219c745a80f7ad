//! HTTP-facing wire formats.
//!
//! - `query`: parsing of the raw `number` query parameter.
//! - `reply`: JSON bodies for the success and error replies.
//!
//! Parsers are panic-free: malformed input is reported as `FactoError`.

pub mod query;
pub mod reply;
