// Unit tests for ApiClientError classification and message shape

use crate::error::api_client::ApiClientError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

fn status_error(status: u16, status_text: &str, body: &str) -> ApiClientError {
    ApiClientError::Status {
        status: HttpStatusCode::from(status),
        status_text: status_text.to_string(),
        body: body.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

/// **VALUE**: Verifies 5xx responses are classified retryable and 4xx are not.
///
/// **WHY THIS MATTERS**: This predicate is the single decision point between
/// "back off and try again" and "surface to the operator now". Misclassifying
/// a 404 as retryable would add 7 seconds of pointless waiting to every
/// deleted-record lookup; misclassifying a 503 would defeat the resilience
/// the client exists for.
///
/// **BUG THIS CATCHES**: Would catch `is_retryable()` being rewired to the
/// wrong status predicate.
#[test]
fn given_status_errors_when_classified_then_only_5xx_retryable() {
    assert!(status_error(500, "Internal Server Error", "").is_retryable());
    assert!(status_error(503, "Service Unavailable", "").is_retryable());
    assert!(status_error(599, "", "").is_retryable());

    assert!(!status_error(400, "Bad Request", "").is_retryable());
    assert!(!status_error(404, "Not Found", "").is_retryable());
    assert!(!status_error(422, "Unprocessable Entity", "").is_retryable());
}

/// **VALUE**: Verifies transport failures and timeouts are retryable while
/// build, decode, and URL failures are not.
///
/// **WHY THIS MATTERS**: A connection reset may heal; malformed JSON from a
/// 200 response or a header value no request can carry never will. Retrying
/// those either re-issues a request that already succeeded at the HTTP
/// level or burns the backoff schedule without ever reaching the wire.
#[test]
fn given_non_status_errors_when_classified_then_only_io_failures_retryable() {
    let location = ErrorLocation::from(Location::caller());

    let transport = ApiClientError::Transport {
        message: "connection reset by peer".to_string(),
        location,
    };
    let timeout = ApiClientError::Timeout {
        message: "operation timed out".to_string(),
        location,
    };
    let build = ApiClientError::Build {
        message: "builder error: invalid header value".to_string(),
        location,
    };
    let json = ApiClientError::Json {
        message: "expected value at line 1".to_string(),
        location,
    };
    let url = ApiClientError::UrlParse {
        message: "relative URL without a base".to_string(),
        location,
    };

    assert!(transport.is_retryable());
    assert!(timeout.is_retryable());
    assert!(!build.is_retryable());
    assert!(!json.is_retryable());
    assert!(!url.is_retryable());
}

/// **VALUE**: Verifies the caller-facing message shape for non-2xx responses.
///
/// **WHY THIS MATTERS**: Admin pages display this message verbatim and some
/// existing callers match on the `HTTP <status> <statusText>: <body>` prefix.
/// Changing the shape breaks operator-facing error rendering.
///
/// **BUG THIS CATCHES**: Would catch a reworded `#[error(...)]` attribute on
/// the Status variant.
#[test]
fn given_status_error_when_displayed_then_message_has_http_shape() {
    let err = status_error(503, "Service Unavailable", "upstream pool exhausted");

    let message = err.to_string();

    assert!(
        message.starts_with("HTTP 503 Service Unavailable: upstream pool exhausted"),
        "unexpected message shape: {message}"
    );
}

/// **VALUE**: Verifies the raw body text survives into the error unmodified.
///
/// **WHY THIS MATTERS**: The client must never swallow or downgrade server
/// detail; operators debug backend incidents from this body text.
#[test]
fn given_status_error_then_body_text_preserved_verbatim() {
    let body = r#"{"error":"tag already exists","id":42}"#;

    let err = status_error(409, "Conflict", body);

    match err {
        ApiClientError::Status { body: preserved, .. } => assert_eq!(preserved, body),
        other => panic!("expected Status variant, got {other:?}"),
    }
}
