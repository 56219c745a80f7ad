//! Computation seam between the handler and the factorial.
//!
//! The handler only sees `Computation`; the production implementation adds the
//! simulated downstream latency. Tests swap in a zero delay or a failing impl.

mod delayed;

use async_trait::async_trait;
use num_bigint::BigUint;

use factorium_core::error::Result;

pub use delayed::DelayedFactorial;

#[async_trait]
pub trait Computation: Send + Sync {
    async fn compute(&self, n: u64) -> Result<BigUint>;
}
