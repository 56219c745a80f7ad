//! Shared application state for the factorium gateway.
//!
//! The metrics registry is created exactly once here and handed to both the
//! factorial handler and the `/metrics` route.

use std::sync::Arc;

use crate::compute::{Computation, DelayedFactorial};
use crate::config::ServiceConfig;
use crate::obs::FactorialMetrics;
use crate::transport::factorial::FactorialHandler;

#[derive(Clone)]
pub struct AppState {
    metrics: Arc<FactorialMetrics>,
    factorial: Arc<FactorialHandler>,
}

impl AppState {
    /// Build state with the configured simulated delay and input limit.
    pub fn new(cfg: &ServiceConfig) -> Self {
        let compute = DelayedFactorial::new(cfg.factorial.delay(), cfg.factorial.max_number);
        Self::with_computation(Arc::new(compute))
    }

    /// Build state around an explicit computation (tests, alternate backends).
    pub fn with_computation(compute: Arc<dyn Computation>) -> Self {
        let metrics = Arc::new(FactorialMetrics::new());
        let factorial = FactorialHandler::new(Arc::clone(&metrics), compute);

        Self {
            metrics,
            factorial: Arc::new(factorial),
        }
    }

    pub fn metrics(&self) -> Arc<FactorialMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn factorial(&self) -> Arc<FactorialHandler> {
        Arc::clone(&self.factorial)
    }
}
