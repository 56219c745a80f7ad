//! Axum router wiring.
//!
//! - `GET /factorial?number=<int>`
//! - `GET /metrics`

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            transport::factorial::FACTORIAL_ENDPOINT,
            get(transport::factorial::factorial),
        )
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
