//! `GET /factorial` handler.
//!
//! Outcomes:
//! - 200 with `{number, factorial}` when the computation succeeds
//! - 400 for unparseable input (counted as `ValueError`) or negative input
//!   (not counted as an exception)
//! - 500 for anything that fails while computing (counted as `UnexpectedError`)
//!
//! Every outcome increments the request counter once and records exactly one
//! latency observation.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use factorium_core::error::{ClientCode, FactoError, Result};
use factorium_core::protocol::query::parse_number;
use factorium_core::protocol::reply::{ErrorBody, FactorialBody};

use crate::app_state::AppState;
use crate::compute::Computation;
use crate::obs::FactorialMetrics;

pub const FACTORIAL_ENDPOINT: &str = "/factorial";

/// Result of one call, ready to be turned into an HTTP response.
#[derive(Debug)]
pub enum Reply {
    Computed(FactorialBody),
    Rejected(ClientCode),
}

impl Reply {
    pub fn status(&self) -> StatusCode {
        match self {
            Reply::Computed(_) => StatusCode::OK,
            Reply::Rejected(code) => StatusCode::from_u16(code.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Reply::Computed(body) => (status, Json(body)).into_response(),
            Reply::Rejected(code) => (status, Json(ErrorBody::from(code))).into_response(),
        }
    }
}

pub struct FactorialHandler {
    metrics: Arc<FactorialMetrics>,
    compute: Arc<dyn Computation>,
}

impl FactorialHandler {
    pub fn new(metrics: Arc<FactorialMetrics>, compute: Arc<dyn Computation>) -> Self {
        Self { metrics, compute }
    }

    /// Handle one request given the raw `number` parameter.
    pub async fn handle(&self, raw: Option<&str>) -> Reply {
        let started = Instant::now();

        let reply = match self.evaluate(raw).await {
            Ok(body) => {
                self.metrics.inc_request(FACTORIAL_ENDPOINT, 200);
                tracing::info!(
                    number = body.number,
                    status = 200,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "factorial computed"
                );
                Reply::Computed(body)
            }
            Err(e) => {
                let code = e.client_code().unwrap_or(ClientCode::Internal);
                let status = code.http_status();
                if let Some(exception) = code.exception_type() {
                    self.metrics.inc_exception(exception);
                }
                self.metrics.inc_request(FACTORIAL_ENDPOINT, status);

                let elapsed_ms = started.elapsed().as_millis() as u64;
                if code == ClientCode::Internal {
                    tracing::error!(error = %e, status, elapsed_ms, "factorial failed");
                } else {
                    tracing::warn!(error = %e, status, elapsed_ms, "factorial rejected");
                }
                Reply::Rejected(code)
            }
        };

        self.metrics.observe_latency(FACTORIAL_ENDPOINT, started.elapsed());

        reply
    }

    async fn evaluate(&self, raw: Option<&str>) -> Result<FactorialBody> {
        let n = parse_number(raw)?;
        let value = self.compute.compute(n).await.map_err(unexpected)?;
        FactorialBody::new(n, &value).map_err(unexpected)
    }
}

/// Anything failing after validation is reported as an internal error.
fn unexpected(e: FactoError) -> FactoError {
    match e {
        FactoError::Internal(_) => e,
        other => FactoError::Internal(other.to_string()),
    }
}

/// First `number` value in query order; later repeats are ignored.
fn first_number(pairs: &[(String, String)]) -> Option<&str> {
    pairs
        .iter()
        .find(|(k, _)| k == "number")
        .map(|(_, v)| v.as_str())
}

pub async fn factorial(
    State(app): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    app.factorial().handle(first_number(&pairs)).await.into_response()
}
