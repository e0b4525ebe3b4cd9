// Unit tests for RedactedToken
// The invariant: the raw value only ever escapes through as_str()

use crate::RedactedToken;

const SECRET: &str = "session-token-abc123-do-not-log";

/// **VALUE**: Verifies Debug output never contains the raw token.
///
/// **WHY THIS MATTERS**: Descriptors and errors get logged with `{:?}` all
/// over the codebase. If Debug leaked the bearer token, every log file would
/// become a credential store.
///
/// **BUG THIS CATCHES**: Would catch someone replacing the manual Debug impl
/// with `#[derive(Debug)]` during a refactor.
#[test]
fn given_token_when_debug_formatted_then_value_is_redacted() {
    let token = RedactedToken::new(SECRET.to_string());

    let debug = format!("{token:?}");

    assert!(!debug.contains(SECRET), "Debug output leaked the token");
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies Display output never contains the raw token.
///
/// **BUG THIS CATCHES**: Would catch a Display impl that forwards to the
/// inner string, which would leak tokens through error messages.
#[test]
fn given_token_when_display_formatted_then_value_is_redacted() {
    let token = RedactedToken::new(SECRET.to_string());

    let display = format!("{token}");

    assert!(!display.contains(SECRET), "Display output leaked the token");
    assert!(display.contains("REDACTED"));
}

/// **VALUE**: Verifies the deliberate escape hatch still works.
///
/// **WHY THIS MATTERS**: The client needs the raw value exactly once, when
/// building the Authorization header. If `as_str()` broke, every
/// authenticated request would fail.
#[test]
fn given_token_when_as_str_called_then_returns_raw_value() {
    let token = RedactedToken::new(SECRET.to_string());

    assert_eq!(token.as_str(), SECRET);
    assert_eq!(token.len(), SECRET.len());
    assert!(!token.is_empty());
}

/// **VALUE**: Verifies serialization is refused rather than silently leaking.
///
/// **WHY THIS MATTERS**: Config structs and request bodies are serialized
/// with serde. A token that serialized like a plain string would end up in
/// saved config files and request payloads.
///
/// **BUG THIS CATCHES**: Would catch someone swapping the refusing Serialize
/// impl for `#[derive(Serialize)]`.
#[test]
fn given_token_when_serialized_then_errors_instead_of_leaking() {
    let token = RedactedToken::new(SECRET.to_string());

    let result = serde_json::to_string(&token);

    assert!(result.is_err(), "Serialization should be refused");
}
