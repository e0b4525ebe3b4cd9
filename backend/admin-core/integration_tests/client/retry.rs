use crate::client::helpers::{anonymous_client, client_for};

use admin_core::client::{ApiClient, RequestDescriptor, RetryPolicy};
use admin_core::credentials::SessionTokenStore;
use admin_core::error::api_client::ApiClientError;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Retry behavior tests against a real HTTP server (wiremock)
// Each test uses the compressed schedule from helpers (20ms, 40ms, 80ms)
// ============================================================================

/// **VALUE**: Verifies the headline resilience scenario: 503 three times,
/// success on the 4th attempt, payload delivered to the caller.
///
/// **WHY THIS MATTERS**: This is the reason the client exists. During a
/// backend deploy, list pages briefly see 503s; operators should never
/// notice because the client rides out the outage.
///
/// **BUG THIS CATCHES**: Would catch the retry loop giving up early, not
/// re-dispatching the identical request, or consuming the success response
/// incorrectly after prior failures.
#[tokio::test]
async fn given_three_503s_then_success_when_send_called_then_returns_payload() {
    // GIVEN: /api/sources fails 3 times, then succeeds
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(3)
        .expect(3)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    let started = Instant::now();

    // WHEN: Sending one logical operation
    let payload = client
        .send(RequestDescriptor::get("/api/sources"))
        .await
        .expect("4th attempt should succeed");

    // THEN: Caller receives the payload after the full backoff sequence
    assert_eq!(payload, json!({"data": []}));
    assert!(
        started.elapsed() >= Duration::from_millis(140),
        "should have waited ~20+40+80ms across 3 backoffs, took {:?}",
        started.elapsed()
    );
}

/// **VALUE**: Verifies the retry bound: a persistently failing operation
/// makes exactly 4 attempts, then surfaces the final failure intact.
///
/// **WHY THIS MATTERS**: Without the bound, a dead backend would keep every
/// page spinning forever. With a wrong bound, the "4 total attempts"
/// contract operators plan around would be off.
///
/// **BUG THIS CATCHES**: Would catch an attempt-counter comparison mistake
/// (`<=` vs `<`) producing 3 or 5 attempts, and any downgrade of the final
/// error.
#[tokio::test]
async fn given_persistent_500_when_send_called_then_fails_after_four_attempts() {
    // GIVEN: /api/tags always returns 500
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database gone"))
        .expect(4)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());

    // WHEN: Sending the operation
    let err = client
        .send(RequestDescriptor::get("/api/tags"))
        .await
        .expect_err("exhausted retries must fail");

    // THEN: The last failure surfaces unchanged, detail intact
    let message = err.to_string();
    assert!(
        message.starts_with("HTTP 500 Internal Server Error: database gone"),
        "unexpected message: {message}"
    );
    assert!(err.is_retryable(), "error kind should survive exhaustion");

    // Mock expectations (exactly 4 requests) verified on server drop
}

/// **VALUE**: Verifies 4xx responses surface immediately with no retry and
/// no delay.
///
/// **WHY THIS MATTERS**: A 404 for `/api/sources/999` means the record is
/// gone; retrying would never help and would add seconds of latency to
/// every stale link an operator clicks.
///
/// **BUG THIS CATCHES**: Would catch 4xx leaking into the retryable set.
#[tokio::test]
async fn given_404_when_send_called_then_surfaces_immediately_without_retry() {
    // GIVEN: /api/sources/999 returns 404
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sources/999"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such source"))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());

    // WHEN: Sending the operation
    let err = client
        .send(RequestDescriptor::get("/api/sources/999"))
        .await
        .expect_err("404 must fail");

    // THEN: Surfaced on the first attempt; the expect(1) above verifies on
    // drop that no retry request ever arrived
    assert!(!err.is_retryable());
    assert!(
        err.to_string().starts_with("HTTP 404 Not Found: no such source"),
        "unexpected message: {}",
        err.to_string()
    );
}

/// **VALUE**: Verifies a client-side timeout is classified transient and
/// retried like a network failure.
///
/// **WHY THIS MATTERS**: A hung upstream looks like a timeout, not a 5xx.
/// If timeouts were non-retryable, the client would be resilient to crashes
/// but not to hangs - the more common failure mode behind load balancers.
///
/// **BUG THIS CATCHES**: Would catch reqwest timeout errors being mapped to
/// a non-retryable variant.
#[tokio::test]
async fn given_hung_server_when_send_called_then_timeout_is_retried() {
    // GIVEN: /api/users responds only after 500ms; client times out at 100ms
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .expect(2)
        .mount(&server)
        .await;

    let policy = RetryPolicy {
        max_retries: 1,
        initial_delay: Duration::from_millis(20),
        multiplier: 2.0,
        max_delay: Duration::from_millis(20),
    };
    let client = ApiClient::with_policy(
        &server.uri(),
        Arc::new(SessionTokenStore::new()),
        policy,
        Duration::from_millis(100),
    )
    .expect("client should build");

    // WHEN: Sending the operation
    let err = client
        .send(RequestDescriptor::get("/api/users"))
        .await
        .expect_err("both attempts should time out");

    // THEN: Classified as a timeout, and the mock saw the retry (expect(2))
    assert!(
        matches!(err, ApiClientError::Timeout { .. }),
        "expected Timeout, got {err:?}"
    );
}

/// **VALUE**: Verifies a connection-level failure (nothing listening) is
/// classified transient and retried up to the bound.
///
/// **WHY THIS MATTERS**: Connection refused is the canonical transient
/// transport failure; it must follow the same backoff sequence as a 5xx.
#[tokio::test]
async fn given_unreachable_server_when_send_called_then_transport_error_after_retries() {
    // GIVEN: A port with nothing listening
    let client = client_for(
        "http://127.0.0.1:1",
        Arc::new(SessionTokenStore::new()),
    );
    let started = Instant::now();

    // WHEN: Sending the operation
    let err = client
        .send(RequestDescriptor::get("/api/sources"))
        .await
        .expect_err("connection refused must fail");

    // THEN: Transport classification, full backoff sequence consumed
    assert!(
        matches!(err, ApiClientError::Transport { .. }),
        "expected Transport, got {err:?}"
    );
    assert!(
        started.elapsed() >= Duration::from_millis(140),
        "should have retried through the whole schedule"
    );
}
