// Unit tests for RequestDescriptor
// The invariant under test: descriptors are immutable values whose only
// moving part across retries is the attempt counter

use crate::client::RequestDescriptor;

use reqwest::Method;
use serde_json::json;

/// **VALUE**: Verifies a fresh descriptor starts at attempt zero.
///
/// **WHY THIS MATTERS**: The retry bound is checked as `attempt < max_retries`.
/// If descriptors started at 1, every operation would lose one retry and the
/// "4 total attempts" contract would silently become 3.
///
/// **BUG THIS CATCHES**: Would catch an off-by-one introduced in the
/// constructor or a refactor that seeds the counter from elsewhere.
#[test]
fn given_new_descriptor_when_created_then_attempt_is_zero() {
    let descriptor = RequestDescriptor::get("/api/sources");

    assert_eq!(descriptor.attempt(), 0);
}

/// **VALUE**: Verifies `next_attempt()` advances only the counter.
///
/// **WHY THIS MATTERS**: A retry must re-dispatch the identical request -
/// same method, path, headers, body - and stay correlated in the logs. If
/// the successor lost the body or got a new correlation id, retries would
/// submit different requests and become untraceable.
///
/// **BUG THIS CATCHES**: Would catch a struct-update-syntax mistake that
/// regenerates the correlation id or drops fields when building the
/// successor.
#[test]
fn given_descriptor_when_next_attempt_then_only_counter_advances() {
    let original = RequestDescriptor::post("/api/sources")
        .with_header("X-Page", "3")
        .with_body(json!({"name": "Reuters", "kind": "rss"}));

    let successor = original.next_attempt();

    assert_eq!(successor.attempt(), 1);
    assert_eq!(successor.method(), &Method::POST);
    assert_eq!(successor.path(), original.path());
    assert_eq!(successor.headers(), original.headers());
    assert_eq!(successor.body(), original.body());
    assert_eq!(successor.correlation_id(), original.correlation_id());
}

/// **VALUE**: Verifies the original descriptor is untouched by succession.
///
/// **WHY THIS MATTERS**: The whole point of the immutable-descriptor design
/// is "at most one outstanding attempt per operation" without shared mutable
/// state. If `next_attempt()` mutated the original, a caller holding a
/// reference could observe a counter that changes under it.
///
/// **BUG THIS CATCHES**: Would catch a regression back to in-place counter
/// mutation.
#[test]
fn given_descriptor_when_next_attempt_then_original_unchanged() {
    let original = RequestDescriptor::get("/api/tags");

    let _second = original.next_attempt();
    let _third = original.next_attempt().next_attempt();

    assert_eq!(original.attempt(), 0);
}

/// **VALUE**: Verifies independent descriptors get distinct correlation ids.
///
/// **WHY THIS MATTERS**: Concurrent operations against the same endpoint are
/// told apart in the logs only by their correlation ids.
#[test]
fn given_two_descriptors_when_created_then_correlation_ids_differ() {
    let first = RequestDescriptor::get("/api/users");
    let second = RequestDescriptor::get("/api/users");

    assert_ne!(first.correlation_id(), second.correlation_id());
}
