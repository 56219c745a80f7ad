//! End-to-end tests through the axum router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use factorium_core::math::factorial;
use factorium_gateway::app_state::AppState;
use factorium_gateway::compute::DelayedFactorial;
use factorium_gateway::router::build_router;

fn app_with_delay(delay: Duration) -> (Router, AppState) {
    let state = AppState::with_computation(Arc::new(DelayedFactorial::new(delay, 1_000)));
    (build_router(state.clone()), state)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn factorial_of_small_values() {
    let (router, _) = app_with_delay(Duration::ZERO);

    let (status, body) = get(&router, "/factorial?number=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"number":0,"factorial":1}"#);

    let (status, body) = get(&router, "/factorial?number=5").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"number":5,"factorial":120}"#);

    let (_, body) = get(&router, "/factorial?number=20").await;
    assert_eq!(body, r#"{"number":20,"factorial":2432902008176640000}"#);
}

#[tokio::test]
async fn factorial_is_exact_up_to_100() {
    let (router, state) = app_with_delay(Duration::ZERO);

    for n in 0..=100u64 {
        let (status, body) = get(&router, &format!("/factorial?number={n}")).await;
        assert_eq!(status, StatusCode::OK, "n={n}");
        assert_eq!(
            body,
            format!(r#"{{"number":{n},"factorial":{}}}"#, factorial(n)),
            "n={n}"
        );
    }

    let metrics = state.metrics();
    assert_eq!(metrics.request_count("/factorial", 200), 101);
    assert_eq!(metrics.latency_count("/factorial"), 101);
}

#[tokio::test]
async fn negative_input_is_rejected_without_exception() {
    let (router, state) = app_with_delay(Duration::ZERO);

    let (status, body) = get(&router, "/factorial?number=-7").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Please provide a non-negative integer."}"#);

    let metrics = state.metrics();
    assert_eq!(metrics.exception_count("ValueError"), 0);
    assert_eq!(metrics.exception_count("UnexpectedError"), 0);
    assert_eq!(metrics.request_count("/factorial", 400), 1);
    assert_eq!(metrics.latency_count("/factorial"), 1);
}

#[tokio::test]
async fn invalid_input_counts_value_error() {
    let (router, state) = app_with_delay(Duration::ZERO);

    for uri in [
        "/factorial?number=abc",
        "/factorial?number=",
        "/factorial",
        "/factorial?number=1.5",
    ] {
        let (status, body) = get(&router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri={uri}");
        assert_eq!(
            body,
            r#"{"error":"Invalid input. Please provide an integer."}"#,
            "uri={uri}"
        );
    }

    let metrics = state.metrics();
    assert_eq!(metrics.exception_count("ValueError"), 4);
    assert_eq!(metrics.request_count("/factorial", 400), 4);
    assert_eq!(metrics.latency_count("/factorial"), 4);
}

#[tokio::test]
async fn request_counter_matches_call_count() {
    let (router, state) = app_with_delay(Duration::ZERO);

    let uris = [
        "/factorial?number=3",
        "/factorial?number=-3",
        "/factorial?number=x",
        "/factorial?number=10",
        "/factorial",
    ];
    for uri in uris {
        get(&router, uri).await;
    }

    let metrics = state.metrics();
    let total: u64 = [200, 400, 500]
        .iter()
        .map(|s| metrics.request_count("/factorial", *s))
        .sum();
    assert_eq!(total, uris.len() as u64);
    assert_eq!(metrics.latency_count("/factorial"), uris.len() as u64);
}

#[tokio::test]
async fn success_latency_reflects_delay() {
    let (router, state) = app_with_delay(Duration::from_millis(150));

    let (status, _) = get(&router, "/factorial?number=6").await;
    assert_eq!(status, StatusCode::OK);

    // Buckets: 0.1 0.5 1 2 3 4 5 +Inf
    assert_eq!(
        state.metrics().latency_bucket_counts("/factorial"),
        vec![0, 1, 1, 1, 1, 1, 1, 1]
    );
}

#[tokio::test]
async fn repeated_number_uses_first_value() {
    let (router, state) = app_with_delay(Duration::ZERO);

    let (status, body) = get(&router, "/factorial?number=abc&number=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid input. Please provide an integer."}"#);

    let (status, body) = get(&router, "/factorial?number=4&number=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"number":4,"factorial":24}"#);

    let metrics = state.metrics();
    assert_eq!(metrics.exception_count("ValueError"), 1);
    assert_eq!(metrics.latency_count("/factorial"), 2);
}

#[tokio::test]
async fn digit_separators_are_accepted() {
    let (router, _) = app_with_delay(Duration::ZERO);

    let (status, body) = get(&router, "/factorial?number=1_0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"number":10,"factorial":3628800}"#);
}

#[tokio::test]
async fn input_above_limit_is_internal_error() {
    let (router, state) = app_with_delay(Duration::ZERO);

    let (status, body) = get(&router, "/factorial?number=9223372036854775807").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"error":"Internal server error"}"#);

    let metrics = state.metrics();
    assert_eq!(metrics.exception_count("UnexpectedError"), 1);
    assert_eq!(metrics.request_count("/factorial", 500), 1);
    assert_eq!(metrics.latency_count("/factorial"), 1);
}

#[tokio::test]
async fn metrics_endpoint_exposes_three_series() {
    let (router, _) = app_with_delay(Duration::ZERO);

    get(&router, "/factorial?number=4").await;
    get(&router, "/factorial?number=nope").await;

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/plain; version=0.0.4; charset=utf-8"
    );

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains(
        r#"factorial_requests_total{endpoint="/factorial",http_status="200"} 1"#
    ));
    assert!(text.contains(
        r#"factorial_requests_total{endpoint="/factorial",http_status="400"} 1"#
    ));
    assert!(text.contains(
        r#"factorial_exceptions_total{exception_type="ValueError"} 1"#
    ));
    assert!(text.contains(
        r#"factorial_request_latency_seconds_count{endpoint="/factorial"} 2"#
    ));
    assert!(text.contains(r#"le="+Inf""#));
}
