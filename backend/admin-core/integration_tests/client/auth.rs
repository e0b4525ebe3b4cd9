use crate::client::helpers::client_for;

use admin_core::client::RequestDescriptor;
use admin_core::credentials::{SessionTokenStore, StaticTokenProvider};

use common::RedactedToken;

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Credential attachment tests
// The dispatched request is the observable: wiremock records every request
// ============================================================================

/// **VALUE**: Verifies a present token goes out as `Authorization: Bearer <token>`.
///
/// **WHY THIS MATTERS**: Every authenticated admin route depends on this
/// exact header shape. A missing "Bearer " prefix or a stale token means
/// every page turns into a 401 wall.
///
/// **BUG THIS CATCHES**: Would catch the prefix being dropped, the header
/// name changing, or the provider not being consulted at dispatch.
#[tokio::test]
async fn given_token_set_when_send_called_then_bearer_header_attached() {
    // GIVEN: A server that only matches the exact expected header
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/profile"))
        .and(header("Authorization", "Bearer session-token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "admin"})))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = Arc::new(StaticTokenProvider::new(RedactedToken::new(
        "session-token-123".to_string(),
    )));
    let client = client_for(&server.uri(), tokens);

    // WHEN: Sending an operation
    let result = client.send(RequestDescriptor::get("/api/profile")).await;

    // THEN: The mock matched, so the header was exactly right
    assert!(result.is_ok(), "request with bearer header should match");
}

/// **VALUE**: Verifies no Authorization header is sent when no token is set.
///
/// **WHY THIS MATTERS**: Pre-login routes (health, login itself) must go out
/// clean; an empty `Bearer ` header makes some backends reject the request
/// outright instead of treating it as anonymous.
///
/// **BUG THIS CATCHES**: Would catch the client sending `Bearer ` with an
/// empty token or a placeholder when the provider returns None.
#[tokio::test]
async fn given_no_token_when_send_called_then_no_authorization_header() {
    // GIVEN: A server accepting anything on /api/health
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri(), Arc::new(SessionTokenStore::new()));

    // WHEN: Sending without any token installed
    client
        .send(RequestDescriptor::get("/api/health"))
        .await
        .expect("health check should succeed");

    // THEN: The recorded request carries no Authorization header
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 1);
    assert!(
        requests[0].headers.get("authorization").is_none(),
        "anonymous dispatch must not carry an Authorization header"
    );
}

/// **VALUE**: Verifies the token is re-read from the store on every dispatch,
/// so login and logout take effect between operations.
///
/// **WHY THIS MATTERS**: The store's write lifecycle is external (login sets,
/// logout clears). If the client captured the token at construction, a
/// logged-out console would keep sending a dead token and a fresh login
/// would not take effect until restart.
///
/// **BUG THIS CATCHES**: Would catch the token being cached in the client
/// instead of read through the provider at dispatch time.
#[tokio::test]
async fn given_token_set_then_cleared_when_sending_then_each_dispatch_reflects_store() {
    // GIVEN: A permissive server and a shared session store
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(3)
        .mount(&server)
        .await;

    let store = Arc::new(SessionTokenStore::new());
    let client = client_for(&server.uri(), store.clone());
    let descriptor = || RequestDescriptor::get("/api/sources");

    // WHEN: Sending before login, after login, and after logout
    client.send(descriptor()).await.expect("anonymous send");

    store.set(RedactedToken::new("rotating-token".to_string()));
    assert!(store.is_authenticated());
    client.send(descriptor()).await.expect("authenticated send");

    store.clear();
    assert!(!store.is_authenticated());
    client.send(descriptor()).await.expect("post-logout send");

    // THEN: Only the middle request carried the token
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    assert_eq!(requests.len(), 3);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1]
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer rotating-token")
    );
    assert!(requests[2].headers.get("authorization").is_none());
}
