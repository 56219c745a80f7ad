use std::time::Duration;

use async_trait::async_trait;
use num_bigint::BigUint;

use factorium_core::error::{FactoError, Result};
use factorium_core::math::factorial;

use super::Computation;

/// Sleeps for `delay`, then computes `n!` for `n <= max_number`.
///
/// Both steps run on the blocking pool: the wait holds a worker thread for its
/// full duration, like a synchronous call to a slow dependency. Inputs above
/// `max_number` fail before any thread is taken.
#[derive(Debug, Clone)]
pub struct DelayedFactorial {
    delay: Duration,
    max_number: u64,
}

impl DelayedFactorial {
    pub fn new(delay: Duration, max_number: u64) -> Self {
        Self { delay, max_number }
    }
}

#[async_trait]
impl Computation for DelayedFactorial {
    async fn compute(&self, n: u64) -> Result<BigUint> {
        if n > self.max_number {
            return Err(FactoError::Internal(format!(
                "{n} exceeds factorial.max_number ({})",
                self.max_number
            )));
        }

        let delay = self.delay;
        tokio::task::spawn_blocking(move || {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            factorial(n)
        })
        .await
        .map_err(|e| FactoError::Internal(format!("factorial task failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn zero_delay_computes_immediately() {
        let c = DelayedFactorial::new(Duration::ZERO, 100);
        let v = c.compute(20).await.unwrap();
        assert_eq!(v.to_string(), "2432902008176640000");
    }

    #[tokio::test]
    async fn delay_is_applied() {
        let c = DelayedFactorial::new(Duration::from_millis(50), 100);
        let started = Instant::now();
        let v = c.compute(3).await.unwrap();
        assert_eq!(v, BigUint::from(6u8));
        assert!(started.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn limit_is_inclusive() {
        let c = DelayedFactorial::new(Duration::ZERO, 10);
        assert_eq!(c.compute(10).await.unwrap(), BigUint::from(3_628_800u32));

        let err = c.compute(11).await.unwrap_err();
        assert!(matches!(err, FactoError::Internal(_)));
    }

    #[tokio::test]
    async fn huge_input_fails_fast() {
        let c = DelayedFactorial::new(Duration::from_secs(60), 10_000);
        let started = Instant::now();
        let err = c.compute(i64::MAX as u64).await.unwrap_err();
        assert!(matches!(err, FactoError::Internal(_)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
