use crate::client::helpers::anonymous_client;

use admin_core::client::RequestDescriptor;
use admin_core::error::api_client::ApiClientError;

use std::time::{Duration, Instant};

use serde::Deserialize;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Dispatch and payload handling tests for the public send API
// ============================================================================

/// **VALUE**: Verifies an empty 2xx body is tolerated as `Value::Null`.
///
/// **WHY THIS MATTERS**: DELETE endpoints and 204 responses legitimately
/// return nothing. If the client treated an empty body as a JSON parse
/// failure, every delete action in the console would report an error after
/// actually succeeding.
///
/// **BUG THIS CATCHES**: Would catch the empty-body branch being removed so
/// `serde_json::from_str("")` errors out.
#[tokio::test]
async fn given_empty_body_success_when_send_called_then_returns_null() {
    // GIVEN: A 204 with no body
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/tags/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());

    // WHEN: Sending the delete
    let payload = client
        .send(RequestDescriptor::delete("/api/tags/7"))
        .await
        .expect("204 should succeed");

    // THEN: Absent body surfaces as null
    assert_eq!(payload, Value::Null);
}

/// **VALUE**: Verifies the JSON body and extra headers are forwarded intact.
///
/// **WHY THIS MATTERS**: Form submissions are the console's bread and
/// butter. Matching on the exact body server-side proves nothing reorders,
/// re-serializes lossily, or drops caller headers along the way.
#[tokio::test]
async fn given_post_with_body_when_send_called_then_body_and_headers_forwarded() {
    // GIVEN: A server matching the exact body and a custom header
    let server = MockServer::start().await;

    let body = json!({"name": "Reuters World", "kind": "rss", "url": "https://example.com/feed"});

    Mock::given(method("POST"))
        .and(path("/api/sources"))
        .and(body_json(body.clone()))
        .and(header("X-Requested-By", "sources-page"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 14})))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());

    // WHEN: Sending the form submission
    let payload = client
        .send(
            RequestDescriptor::post("/api/sources")
                .with_header("X-Requested-By", "sources-page")
                .with_body(body),
        )
        .await
        .expect("create should succeed");

    // THEN: The created record comes back
    assert_eq!(payload, json!({"id": 14}));
}

/// **VALUE**: Verifies absolute URLs in a descriptor bypass the base URL.
///
/// **WHY THIS MATTERS**: Paginated backends hand out absolute `next` links.
/// If the client re-joined them onto the base URL, following a link would
/// produce a mangled request.
#[tokio::test]
async fn given_absolute_url_when_send_called_then_base_url_bypassed() {
    // GIVEN: A client whose base URL points at a dead port
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client("http://127.0.0.1:9");

    // WHEN: Sending to an absolute URL (as if following a server link)
    let payload = client
        .send(RequestDescriptor::get(format!(
            "{}/api/members",
            server.uri()
        )))
        .await
        .expect("absolute URL should reach the live server");

    // THEN: The request hit the absolute target, not the dead base
    assert_eq!(payload, json!({"page": 2}));
}

/// **VALUE**: Verifies a malformed 2xx body fails once, with no retry.
///
/// **WHY THIS MATTERS**: A 200 with garbage JSON is a backend bug, not a
/// transient outage. Retrying would re-issue an operation that already
/// succeeded server-side - disastrous for non-idempotent endpoints.
///
/// **BUG THIS CATCHES**: Would catch decode failures being classified
/// retryable.
#[tokio::test]
async fn given_malformed_json_when_send_called_then_json_error_without_retry() {
    // GIVEN: A 200 whose body is not JSON
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());

    // WHEN: Sending the operation
    let err = client
        .send(RequestDescriptor::get("/api/sources"))
        .await
        .expect_err("garbage body must fail");

    // THEN: Classified as a decode failure, surfaced on the first attempt
    assert!(
        matches!(err, ApiClientError::Json { .. }),
        "expected Json, got {err:?}"
    );
    assert!(!err.is_retryable());
}

/// **VALUE**: Verifies an unbuildable request (header value with a newline)
/// fails once, instantly, without a single wire dispatch.
///
/// **WHY THIS MATTERS**: A malformed header is a caller bug, as permanent
/// as a 4xx. Classified as transport it would burn the whole backoff
/// schedule - seconds of dead waiting - while the server never even sees a
/// request to log.
///
/// **BUG THIS CATCHES**: Would catch reqwest builder errors falling through
/// the transport catch-all into the retryable set.
#[tokio::test]
async fn given_invalid_header_value_when_send_called_then_fails_without_dispatch_or_retry() {
    // GIVEN: A live server that must never be reached
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());
    let started = Instant::now();

    // WHEN: Sending with a header value no request can carry
    let err = client
        .send(RequestDescriptor::get("/api/sources").with_header("X-Bad", "a\nb"))
        .await
        .expect_err("unbuildable request must fail");

    // THEN: Build classification, no retry delay, nothing hit the wire
    assert!(
        matches!(err, ApiClientError::Build { .. }),
        "expected Build, got {err:?}"
    );
    assert!(!err.is_retryable());
    assert!(
        started.elapsed() < Duration::from_millis(20),
        "local failure must not consume a backoff delay, took {:?}",
        started.elapsed()
    );

    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert!(requests.is_empty(), "no attempt should reach the server");
}

/// **VALUE**: Verifies an unparseable target fails before the first attempt.
///
/// **WHY THIS MATTERS**: URL resolution happens once per operation, ahead
/// of the retry loop; a path that cannot resolve is a caller bug and must
/// not enter the dispatch/backoff cycle at all.
#[tokio::test]
async fn given_unparseable_url_when_send_called_then_parse_error_without_dispatch() {
    let client = anonymous_client("http://127.0.0.1:9");

    let err = client
        .send(RequestDescriptor::get("http://[not-a-host/api"))
        .await
        .expect_err("unparseable URL must fail");

    assert!(
        matches!(err, ApiClientError::UrlParse { .. }),
        "expected UrlParse, got {err:?}"
    );
    assert!(!err.is_retryable());
}

/// **VALUE**: Verifies `send_as` deserializes payloads into caller types.
///
/// **WHY THIS MATTERS**: Pages work with typed records, not raw `Value`s;
/// this is the seam where the opaque payload becomes a domain struct.
#[tokio::test]
async fn given_typed_caller_when_send_as_called_then_payload_deserialized() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct TagRecord {
        id: u64,
        label: String,
    }

    // GIVEN: A tag record on the wire
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags/3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 3, "label": "energy"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = anonymous_client(&server.uri());

    // WHEN: Fetching through the typed helper
    let tag: TagRecord = client
        .send_as(RequestDescriptor::get("/api/tags/3"))
        .await
        .expect("typed fetch should succeed");

    // THEN: The struct is populated
    assert_eq!(
        tag,
        TagRecord {
            id: 3,
            label: "energy".to_string()
        }
    );
}
